//! Winit application shell.
//!
//! [`App`] owns the window, the renderer, and the two timing loops. It
//! drives the whole lifecycle:
//!
//! - `resumed`: creates the (non-resizable) window and runs the strict
//!   renderer initialization sequence. A failure is reported and the
//!   event loop exits without starting the animation.
//! - frame tick: self-rescheduling via `ControlFlow::WaitUntil`; each
//!   tick draws a frame, measures the achieved frame rate, and
//!   schedules the next tick one period after it ran.
//! - display tick: once per second, copies the measured frame rate into
//!   the FPS pane.
//! - input: `W`/`S` adjust the camera depth; window close or Escape
//!   cancels the loop.

pub mod input;
pub mod panes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::errors::Result;
use crate::renderer::Renderer;
use crate::renderer::settings::RendererSettings;
use crate::renderer::sources::{EmbeddedShaders, ShaderSources};
use crate::spin::SpinState;
use crate::timing::{CancellationToken, FixedTick, FrameClock};

use self::panes::{ErrorCallback, StatusPanes, TitlePanes};

/// Interval of the FPS readout update.
const DISPLAY_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Everything that only exists once initialization has succeeded.
struct SceneLoop {
    renderer: Renderer,
    panes: TitlePanes,
    spin: SpinState,
    frame_clock: FrameClock,
    display_tick: FixedTick,
    next_frame_at: Instant,
}

/// Application builder and event loop handler.
///
/// ```rust,ignore
/// use gyre::App;
///
/// fn main() -> gyre::Result<()> {
///     env_logger::init();
///     App::new().with_title("Gyre").run()
/// }
/// ```
pub struct App {
    title: String,
    settings: RendererSettings,
    shader_sources: Box<dyn ShaderSources>,
    error_callback: Option<ErrorCallback>,
    cancel: CancellationToken,

    window: Option<Arc<Window>>,
    scene: Option<SceneLoop>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Gyre".into(),
            settings: RendererSettings::default(),
            shader_sources: Box::new(EmbeddedShaders),
            error_callback: None,
            cancel: CancellationToken::new(),
            window: None,
            scene: None,
        }
    }

    /// Sets the window title (also the base of the title-bar panes).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the renderer settings.
    #[must_use]
    pub fn with_settings(mut self, settings: RendererSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the shader source provider.
    #[must_use]
    pub fn with_shader_sources(mut self, sources: impl ShaderSources + 'static) -> Self {
        self.shader_sources = Box::new(sources);
        self
    }

    /// Supplies a callback invoked in place of the default error pane
    /// when initialization fails fatally.
    #[must_use]
    pub fn with_error_callback(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.error_callback = Some(Box::new(callback));
        self
    }

    /// A handle that stops the animation loop when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the application. Blocks until the loop is cancelled or the
    /// window is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self).map_err(Into::into)
    }

    /// A timer deadline was reached: run whichever of the two ticks are
    /// due, then leave rescheduling to `about_to_wait`.
    fn on_deadline(&mut self, event_loop: &ActiveEventLoop) {
        if self.cancel.is_cancelled() {
            event_loop.exit();
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        let now = Instant::now();
        if now >= scene.next_frame_at {
            if let Err(e) = scene.renderer.draw_frame(&mut scene.spin) {
                log::error!("Fatal render error: {e}");
                self.cancel.cancel();
                event_loop.exit();
                return;
            }
            // Measure after the draw and schedule relative to it; the
            // achieved rate drifts under load instead of catching up.
            let after = Instant::now();
            scene.frame_clock.tick(after);
            scene.next_frame_at = scene.frame_clock.next_deadline(after);
        }

        if scene.display_tick.poll(now) {
            let fps = scene.frame_clock.real_fps();
            scene.panes.set_fps(fps);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .expect("Failed to create window");
        let window = Arc::new(window);
        self.window = Some(window.clone());

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        log::info!("Initializing Renderer Backend...");

        let mut panes = TitlePanes::new(window.clone(), self.title.clone());
        let result = {
            let callback = &mut self.error_callback;
            let panes_ref = &mut panes;
            let mut report = move |message: &str| match callback.as_mut() {
                Some(callback) => callback(message),
                None => panes_ref.append_error(message),
            };
            Renderer::initialize(
                window.clone(),
                width,
                height,
                &self.settings,
                self.shader_sources.as_ref(),
                &mut report,
            )
        };

        match result {
            Ok(renderer) => {
                let now = Instant::now();
                let frame_clock = FrameClock::starting_at(self.settings.frame_period(), now);
                let display_tick = FixedTick::starting_at(DISPLAY_TICK_INTERVAL, now);
                let next_frame_at = frame_clock.next_deadline(now);
                event_loop.set_control_flow(ControlFlow::WaitUntil(next_frame_at));
                self.scene = Some(SceneLoop {
                    renderer,
                    panes,
                    spin: SpinState::new(),
                    frame_clock,
                    display_tick,
                    next_frame_at,
                });
            }
            Err(e) => {
                log::error!("Fatal Renderer Error: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.cancel.cancel();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    self.cancel.cancel();
                    event_loop.exit();
                } else if let Some(command) = input::translate_key(event.physical_key) {
                    if let Some(scene) = self.scene.as_mut() {
                        scene.spin.apply(command);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                // Frames are presented from the loop's own tick.
            }
            _ => {}
        }
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::ResumeTimeReached { .. }) {
            self.on_deadline(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.cancel.is_cancelled() {
            return;
        }
        if let Some(scene) = self.scene.as_ref() {
            let next = scene.next_frame_at.min(scene.display_tick.next_deadline());
            event_loop.set_control_flow(ControlFlow::WaitUntil(next));
        }
    }
}
