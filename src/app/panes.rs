//! Status display panes.
//!
//! The loop reports through two small surfaces: an FPS readout updated
//! once per second and an error readout for fatal startup failures.
//! [`StatusPanes`] is the seam; [`TitlePanes`] is the default desktop
//! implementation, writing both into the window title bar (errors are
//! also logged). Embedders with a real UI can supply their own panes or
//! an [`ErrorCallback`].

use std::sync::Arc;

use winit::window::Window;

/// The two readout surfaces the loop writes to.
pub trait StatusPanes {
    /// Replaces the FPS readout content.
    fn set_fps(&mut self, fps: u32);

    /// Appends a message to the error readout.
    fn append_error(&mut self, message: &str);
}

/// Caller-supplied sink for fatal initialization failures. Invoked at
/// most once, in place of the default error pane.
pub type ErrorCallback = Box<dyn FnMut(&str) + 'static>;

/// Default panes backed by the window title bar.
pub struct TitlePanes {
    window: Arc<Window>,
    base_title: String,
}

impl TitlePanes {
    #[must_use]
    pub fn new(window: Arc<Window>, base_title: impl Into<String>) -> Self {
        Self {
            window,
            base_title: base_title.into(),
        }
    }
}

impl StatusPanes for TitlePanes {
    fn set_fps(&mut self, fps: u32) {
        self.window
            .set_title(&format!("{} | {fps} fps", self.base_title));
    }

    fn append_error(&mut self, message: &str) {
        log::error!("{message}");
        self.window
            .set_title(&format!("{} | {message}", self.base_title));
    }
}
