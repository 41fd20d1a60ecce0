use std::path::PathBuf;

use anyhow::Context;
use asteroids_common::Viewport;
use asteroids_engine::{
    Engine, FixedStepClock, FrameOutcome, GameResult, JsonFileResults, MemoryResults, NullHud,
    ResultsStore, format_clock, format_score, load_result,
};
use asteroids_input::FrameInput;
use asteroids_kernel::GameConfig;
use asteroids_render::{BatchRenderer, MAX_INSTANCES, RecordingBackend};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asteroids-cli", about = "Headless tools for the asteroids engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, batch capacity and the effective game config
    Info {
        /// Game config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a deterministic game with scripted input on the recording backend
    Simulate {
        /// Maximum frames to run
        #[arg(short, long, default_value = "3600")]
        frames: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Game config file (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Press fire every N frames (0 = never)
        #[arg(long, default_value = "12")]
        fire_every: u64,
        /// Direction to hold while running
        #[arg(long, value_enum, default_value = "right")]
        turn: Turn,
        /// Viewport width
        #[arg(long, default_value = "800")]
        width: f64,
        /// Viewport height
        #[arg(long, default_value = "600")]
        height: f64,
        /// Write final score/time here on game over
        #[arg(long)]
        results: Option<PathBuf>,
        /// Run twice and check both runs agree
        #[arg(long)]
        verify: bool,
        /// Print the last rendered frame
        #[arg(long)]
        dump: bool,
    },
    /// Show the last stored game result
    Results {
        /// Results file written by the desktop app or `simulate --results`
        #[arg(default_value = "results.json")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Turn {
    Left,
    Right,
    None,
}

/// Scripted input for frame `n`.
fn scripted_input(n: u64, fire_every: u64, turn: Turn) -> FrameInput {
    FrameInput {
        rotate_left: turn == Turn::Left,
        rotate_right: turn == Turn::Right,
        fire: fire_every > 0 && n % fire_every == 0,
    }
}

struct RunSummary {
    frames: u64,
    score: u64,
    ended: Option<GameResult>,
    asteroids: usize,
    projectiles: usize,
    last_frame: String,
}

fn run<R: ResultsStore>(
    config: &GameConfig,
    viewport: Viewport,
    results: R,
    frames: u64,
    fire_every: u64,
    turn: Turn,
) -> anyhow::Result<RunSummary> {
    let renderer = BatchRenderer::new(RecordingBackend::keeping_last(1), viewport);
    let mut engine = Engine::new(
        config.clone(),
        renderer,
        FixedStepClock::per_second(60),
        results,
        NullHud,
    )?;
    engine.start()?;
    tracing::info!(seed = engine.seed(), frames, fire_every, "simulation started");

    let mut ended = None;
    for n in 0..frames {
        if let FrameOutcome::Ended(result) = engine.frame(&scripted_input(n, fire_every, turn))? {
            ended = Some(result);
            break;
        }
    }
    match &ended {
        Some(r) => {
            tracing::info!(score = r.score, frames = r.frames, "simulation ended on player hit")
        }
        None => {
            engine.cancel();
            tracing::info!(frames = engine.world().frame(), "simulation cancelled at frame limit");
        }
    }

    Ok(RunSummary {
        frames: engine.world().frame(),
        score: engine.score(),
        ended,
        asteroids: engine.world().asteroids().len(),
        projectiles: engine.world().projectiles().len(),
        last_frame: engine.renderer().backend().describe(),
    })
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(p) => GameConfig::from_path(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { config } => {
            let config = load_config(config.as_ref())?;
            println!("asteroids-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("batch capacity: {MAX_INSTANCES} instances");
            println!(
                "worst-case drawables: {} (1 ship + {} projectiles + {} asteroids)",
                config.max_drawables(),
                config.max_projectiles,
                config.max_asteroids
            );
            match config.validate(MAX_INSTANCES) {
                Ok(()) => println!("config: valid"),
                Err(e) => println!("config: INVALID ({e})"),
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Simulate {
            frames,
            seed,
            config,
            fire_every,
            turn,
            width,
            height,
            results,
            verify,
            dump,
        } => {
            let mut config = load_config(config.as_ref())?;
            config.seed = Some(seed);
            let viewport = Viewport::new(width, height);
            println!("Simulating: seed={seed}, frames<={frames}, viewport={width}x{height}");

            let summary = match &results {
                Some(path) => run(&config, viewport, JsonFileResults::new(path), frames, fire_every, turn)?,
                None => run(&config, viewport, MemoryResults::new(), frames, fire_every, turn)?,
            };

            println!(
                "Run: frames={}, {}, asteroids={}, projectiles={}",
                summary.frames,
                format_score(summary.score),
                summary.asteroids,
                summary.projectiles
            );
            match summary.ended {
                Some(r) => println!(
                    "Game over after {} frames, {}",
                    r.frames,
                    format_clock(r.elapsed_seconds)
                ),
                None => println!("Still alive, run cancelled"),
            }

            if verify {
                let again = run(&config, viewport, MemoryResults::new(), frames, fire_every, turn)?;
                let same = again.frames == summary.frames
                    && again.score == summary.score
                    && again.asteroids == summary.asteroids
                    && again.last_frame == summary.last_frame;
                tracing::info!(seed, same, "replay compared");
                println!("Replay: {}", if same { "OK" } else { "MISMATCH" });
                if !same {
                    anyhow::bail!("replay diverged with seed {seed}");
                }
            }

            if dump {
                print!("{}", summary.last_frame);
            }
        }
        Commands::Results { path } => {
            let store = JsonFileResults::new(&path);
            match load_result(&store)? {
                Some((score, seconds)) => {
                    println!("{}", format_score(score));
                    println!("{}", format_clock(seconds));
                }
                None => println!("no finished game in {}", path.display()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_fires_on_interval() {
        let fired: Vec<u64> = (0..30)
            .filter(|&n| scripted_input(n, 10, Turn::None).fire)
            .collect();
        assert_eq!(fired, [0, 10, 20]);
        assert!(!scripted_input(0, 0, Turn::None).fire);
        assert!(scripted_input(3, 0, Turn::Left).rotate_left);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        };
        let vp = Viewport::new(800.0, 600.0);
        let a = run(&config, vp, MemoryResults::new(), 600, 7, Turn::Right).unwrap();
        let b = run(&config, vp, MemoryResults::new(), 600, 7, Turn::Right).unwrap();
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.score, b.score);
        assert_eq!(a.last_frame, b.last_frame);
    }

    #[test]
    fn short_run_is_cancelled_and_logged() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_test_writer()
            .try_init();
        let config = GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        };
        let vp = Viewport::new(800.0, 600.0);
        let summary = run(&config, vp, MemoryResults::new(), 3, 0, Turn::None).unwrap();
        assert!(summary.ended.is_none());
        assert_eq!(summary.frames, 3);
    }
}
