mod overlay;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use asteroids_common::Viewport;
use asteroids_engine::{
    Engine, FrameOutcome, GameResult, HudText, JsonFileResults, SystemClock, format_clock,
    format_score,
};
use asteroids_input::{InputState, KeyBindings};
use asteroids_kernel::GameConfig;
use asteroids_render::{BatchRenderer, MAX_INSTANCES};
use asteroids_render_wgpu::{GpuContext, WgpuBackend};
use clap::Parser;
use glam::DVec2;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::overlay::Overlay;

type DesktopEngine = Engine<WgpuBackend, SystemClock, JsonFileResults, HudText>;

#[derive(Parser)]
#[command(name = "asteroids-desktop", about = "Asteroids desktop game")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Game config file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where final score and time are written on game over
    #[arg(long, default_value = "results.json")]
    results: PathBuf,

    /// Left click splits the asteroid under the cursor
    #[arg(long)]
    debug_click: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "600")]
    height: u32,
}

/// Host name for a physical key, matching the names in [`KeyBindings`].
fn key_name(key: KeyCode) -> Option<&'static str> {
    Some(match key {
        KeyCode::KeyA => "a",
        KeyCode::KeyD => "d",
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::Space => "Space",
        _ => return None,
    })
}

struct Settings {
    config: GameConfig,
    results: PathBuf,
    debug_click: bool,
    width: u32,
    height: u32,
}

/// Everything that exists once the window and GPU are up.
struct Session {
    window: Arc<Window>,
    engine: DesktopEngine,
    overlay: Overlay,
}

struct DesktopApp {
    settings: Settings,
    input: InputState,
    cursor: DVec2,
    session: Option<Session>,
    result: Option<GameResult>,
    error: Option<anyhow::Error>,
}

impl DesktopApp {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            input: InputState::new(KeyBindings::default()),
            cursor: DVec2::ZERO,
            session: None,
            result: None,
            error: None,
        }
    }

    fn start_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title("Asteroids")
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let overlay = Overlay::new(&window, &gpu);
        let backend = WgpuBackend::new(gpu, MAX_INSTANCES)?;

        let viewport = Viewport::new(f64::from(size.width.max(1)), f64::from(size.height.max(1)));
        let renderer = BatchRenderer::new(backend, viewport);
        let mut engine = Engine::new(
            self.settings.config.clone(),
            renderer,
            SystemClock::new(),
            JsonFileResults::new(&self.settings.results),
            HudText::default(),
        )?;
        engine.start()?;

        Ok(Session {
            window,
            engine,
            overlay,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = &mut self.session else {
            return;
        };
        if !session.engine.is_running() {
            return;
        }

        let texture = match session.engine.renderer().backend().gpu().acquire() {
            Ok(Some(t)) => t,
            Ok(None) => return,
            Err(e) => return self.fail(event_loop, e.into()),
        };
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        session
            .engine
            .renderer_mut()
            .backend_mut()
            .set_target(texture.texture.create_view(&wgpu::TextureViewDescriptor::default()));

        let outcome = session.engine.frame(&self.input.sample());
        session.engine.renderer_mut().backend_mut().take_target();

        match outcome {
            Ok(FrameOutcome::Continue) => {
                session.overlay.paint(
                    &session.window,
                    session.engine.renderer().backend().gpu(),
                    &view,
                    session.engine.hud(),
                );
                texture.present();
            }
            Ok(FrameOutcome::Ended(result)) => {
                texture.present();
                self.result = Some(result);
                event_loop.exit();
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.start_session(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(e) => self.fail(event_loop, e.context("startup failed")),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(session) = &mut self.session {
            session.overlay.on_window_event(&session.window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(session) = &mut self.session {
                    session.engine.cancel();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = &mut self.session {
                    let backend = session.engine.renderer_mut().backend_mut();
                    backend.gpu_mut().resize(size.width, size.height);
                    let (width, height) = backend.gpu().size();
                    session.engine.resize(f64::from(width), f64::from(height));
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if key == KeyCode::Escape && pressed {
                    if let Some(session) = &mut self.session {
                        session.engine.cancel();
                    }
                    event_loop.exit();
                } else if let Some(name) = key_name(key) {
                    self.input.set_key(name, pressed);
                }
            }
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = DVec2::new(position.x, position.y);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } if self.settings.debug_click => {
                if let Some(session) = &mut self.session {
                    let point = session.engine.world().viewport().screen_to_world(self.cursor);
                    if session.engine.world_mut().split_asteroid_at(point) {
                        tracing::debug!(x = point.x, y = point.y, "debug split");
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            if session.engine.is_running() {
                session.window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    tracing::info!("asteroids-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(Settings {
        config,
        results: cli.results,
        debug_click: cli.debug_click,
        width: cli.width,
        height: cli.height,
    });
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.error {
        return Err(err);
    }
    if let Some(result) = app.result {
        println!(
            "Game over! {}  {}  (saved to {})",
            format_score(result.score),
            format_clock(result.elapsed_seconds),
            app.settings.results.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids_input::Action;

    #[test]
    fn game_keys_have_bound_names() {
        let bindings = KeyBindings::default();
        for (key, action) in [
            (KeyCode::KeyA, Action::RotateLeft),
            (KeyCode::ArrowLeft, Action::RotateLeft),
            (KeyCode::KeyD, Action::RotateRight),
            (KeyCode::ArrowRight, Action::RotateRight),
            (KeyCode::Space, Action::Fire),
        ] {
            let name = key_name(key).unwrap();
            assert_eq!(bindings.action_for(name), Some(action));
        }
        assert_eq!(key_name(KeyCode::KeyW), None);
    }
}
