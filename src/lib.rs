#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod errors;
pub mod renderer;
pub mod spin;
pub mod timing;

pub use app::App;
pub use app::panes::{ErrorCallback, StatusPanes};
pub use errors::{GyreError, Result};
pub use renderer::Renderer;
pub use renderer::context::{BackendAlias, DEFAULT_ALIASES, NO_CONTEXT_MESSAGE};
pub use renderer::settings::RendererSettings;
pub use renderer::sources::{EmbeddedShaders, ShaderSources, ShaderStage};
pub use spin::{SpinCommand, SpinState};
pub use timing::{CancellationToken, FixedTick, FrameClock};
