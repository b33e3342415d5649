//! Renderer Configuration
//!
//! [`RendererSettings`] is consumed once during [`Renderer::initialize`]
//! and carries every fixed render parameter: the clear color, depth
//! format, projection constants, and the target frame rate of the
//! animation loop.
//!
//! # Defaults
//!
//! | Field              | Description                         | Default           |
//! |--------------------|-------------------------------------|-------------------|
//! | `clear_color`      | Framebuffer clear color             | Opaque black      |
//! | `depth_format`     | Depth buffer texture format         | `Depth32Float`    |
//! | `power_preference` | GPU adapter selection strategy      | `HighPerformance` |
//! | `target_fps`       | Target frame tick rate              | `60`              |
//! | `fov_y_degrees`    | Vertical field of view              | `45.0`            |
//! | `z_near` / `z_far` | Projection clip planes              | `0.1` / `100.0`   |
//! | `backend_aliases`  | Context alias priority override     | `None` (built-in) |
//!
//! [`Renderer::initialize`]: crate::renderer::Renderer::initialize

use std::time::Duration;

use crate::renderer::context::BackendAlias;

/// Global configuration for renderer initialization.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Background clear color for the frame, applied at the start of
    /// every draw.
    pub clear_color: wgpu::Color,

    /// Depth buffer texture format. Depth testing is always enabled.
    pub depth_format: wgpu::TextureFormat,

    /// GPU adapter selection preference.
    ///
    /// - `HighPerformance`: prefer a discrete GPU
    /// - `LowPower`: prefer an integrated GPU
    pub power_preference: wgpu::PowerPreference,

    /// Target rate of the self-rescheduling frame tick. The achieved
    /// rate is measured separately and may drift below this under load.
    pub target_fps: u32,

    /// Vertical field of view of the fixed perspective projection,
    /// in degrees.
    pub fov_y_degrees: f32,

    /// Near clip plane distance.
    pub z_near: f32,

    /// Far clip plane distance.
    pub z_far: f32,

    /// Overrides the built-in context alias priority list
    /// ([`DEFAULT_ALIASES`](crate::renderer::context::DEFAULT_ALIASES))
    /// when set. Aliases are tried in order; the first success wins.
    pub backend_aliases: Option<Vec<BackendAlias>>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            depth_format: wgpu::TextureFormat::Depth32Float,
            power_preference: wgpu::PowerPreference::HighPerformance,
            target_fps: 60,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            backend_aliases: None,
        }
    }
}

impl RendererSettings {
    /// The fixed period between frame ticks, `1000 / target_fps` ms.
    #[must_use]
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }
}
