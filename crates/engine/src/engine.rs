use std::time::{Duration, SystemTime, UNIX_EPOCH};

use asteroids_common::Viewport;
use asteroids_input::FrameInput;
use asteroids_kernel::{GameConfig, GameEvent, World};
use asteroids_render::{BatchRenderer, RenderBackend};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::EngineError;
use crate::hud::Hud;
use crate::results::{ResultsStore, save_result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Initializing,
    Running,
    Ended,
}

/// What a finished game hands to the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: u64,
    /// Whole seconds from `start` to the fatal frame.
    pub elapsed_seconds: u64,
    pub frames: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Continue,
    /// The player was hit; results are persisted and no frame may follow.
    Ended(GameResult),
}

/// A seed from the system clock, for hosts that don't fix one.
pub fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Owns the world, the renderer and the host collaborators, and runs frames.
pub struct Engine<B, C, R, H> {
    world: World,
    renderer: BatchRenderer<B>,
    clock: C,
    results: R,
    hud: H,
    state: EngineState,
    seed: u64,
    started_at: Duration,
    elapsed: Duration,
}

impl<B, C, R, H> Engine<B, C, R, H>
where
    B: RenderBackend,
    C: Clock,
    R: ResultsStore,
    H: Hud,
{
    /// Validate `config` against the renderer's batch capacity, build the world
    /// and spawn the opening wave. The engine starts out `Initializing`.
    pub fn new(
        config: GameConfig,
        renderer: BatchRenderer<B>,
        clock: C,
        results: R,
        hud: H,
    ) -> Result<Self, EngineError> {
        config.validate(renderer.capacity())?;
        let seed = config.seed.unwrap_or_else(entropy_seed);
        let viewport = renderer.viewport();
        let mut world = World::new(config, viewport, seed);
        world.spawn_initial_wave();

        tracing::info!(
            seed,
            width = viewport.width,
            height = viewport.height,
            capacity = renderer.capacity(),
            "engine initialized"
        );

        Ok(Self {
            world,
            renderer,
            clock,
            results,
            hud,
            state: EngineState::Initializing,
            seed,
            started_at: Duration::ZERO,
            elapsed: Duration::ZERO,
        })
    }

    /// Enter `Running` and stamp the start time. Starting twice is a no-op.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Initializing => {
                self.started_at = self.clock.now();
                self.state = EngineState::Running;
                self.hud.update(self.world.score(), 0);
                tracing::info!("game started");
                Ok(())
            }
            EngineState::Running => Ok(()),
            EngineState::Ended => Err(EngineError::AlreadyEnded),
        }
    }

    /// Run one frame against the sampled input.
    pub fn frame(&mut self, input: &FrameInput) -> Result<FrameOutcome, EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::NotRunning(self.state));
        }
        self.elapsed = self.clock.now().saturating_sub(self.started_at);

        self.world.simulate(input);
        self.render()?;

        if self.world.check_player_collision() {
            self.log_events();
            return self.end_game().map(FrameOutcome::Ended);
        }

        self.log_events();
        self.hud.update(self.world.score(), self.elapsed_seconds());
        Ok(FrameOutcome::Continue)
    }

    /// Stop without persisting anything.
    pub fn cancel(&mut self) {
        if self.state != EngineState::Ended {
            tracing::info!(score = self.world.score(), frame = self.world.frame(), "game cancelled");
            self.state = EngineState::Ended;
        }
    }

    /// New viewport for the world bounds, camera and canvas center. Applied
    /// from the next frame on.
    pub fn resize(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        self.world.set_viewport(viewport);
        self.renderer.resize(viewport);
    }

    fn render(&mut self) -> Result<(), EngineError> {
        let r = &mut self.renderer;
        r.begin();
        r.draw_body(self.world.player())?;
        for p in self.world.projectiles() {
            r.draw_body(p)?;
        }
        for a in self.world.asteroids() {
            r.draw_body(a)?;
        }
        r.end()?;
        Ok(())
    }

    fn end_game(&mut self) -> Result<GameResult, EngineError> {
        self.state = EngineState::Ended;
        let result = GameResult {
            score: self.world.score(),
            elapsed_seconds: self.elapsed_seconds(),
            frames: self.world.frame(),
        };
        tracing::info!(
            score = result.score,
            seconds = result.elapsed_seconds,
            frames = result.frames,
            "game over"
        );
        save_result(&mut self.results, &result)?;
        Ok(result)
    }

    fn log_events(&mut self) {
        let frame = self.world.frame();
        for event in self.world.drain_events() {
            match event {
                GameEvent::ProjectileFired { .. } => tracing::trace!(frame, ?event, "world event"),
                _ => tracing::debug!(frame, ?event, "world event"),
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u64 {
        self.world.score()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn renderer(&self) -> &BatchRenderer<B> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut BatchRenderer<B> {
        &mut self.renderer
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }
}
