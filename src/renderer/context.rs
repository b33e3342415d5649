//! GPU Context Acquisition
//!
//! The [`GpuContext`] holds the core GPU handles: device, queue, surface,
//! and config, plus the viewport dimensions recorded at startup.
//!
//! Acquisition walks an ordered list of [`BackendAlias`] entries, the
//! different names under which a usable rendering context may be
//! obtained on a given machine. Each alias is probed in turn with an
//! explicit success/failure result; the first success wins and is
//! logged. When every alias fails, the error reporter is invoked exactly
//! once with [`NO_CONTEXT_MESSAGE`] and acquisition returns an error,
//! aborting the initialization sequence. This is a one-shot startup
//! operation with no retries beyond the alias list.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{GyreError, Result};
use crate::renderer::settings::RendererSettings;

/// One entry of the context alias priority list: a human-readable name
/// plus the backend mask handed to wgpu when probing under that name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendAlias {
    /// Name reported in logs when this alias succeeds.
    pub name: &'static str,
    /// Backends enabled for the probe.
    pub backends: wgpu::Backends,
}

/// Built-in alias priority list, best first.
pub const DEFAULT_ALIASES: [BackendAlias; 4] = [
    BackendAlias {
        name: "vulkan",
        backends: wgpu::Backends::VULKAN,
    },
    BackendAlias {
        name: "metal",
        backends: wgpu::Backends::METAL,
    },
    BackendAlias {
        name: "dx12",
        backends: wgpu::Backends::DX12,
    },
    BackendAlias {
        name: "gl",
        backends: wgpu::Backends::GL,
    },
];

/// Fixed message handed to the error reporter when every alias fails.
pub const NO_CONTEXT_MESSAGE: &str = "gyre: no GPU context available";

/// Walks `aliases` in order, returning the first successful probe
/// together with the alias that produced it.
///
/// On exhaustion, `report` is invoked exactly once with
/// [`NO_CONTEXT_MESSAGE`] and `Err(NoGpuContext)` is returned. `report`
/// is never invoked on success.
pub fn select_alias<'a, C>(
    aliases: &'a [BackendAlias],
    mut probe: impl FnMut(&BackendAlias) -> Option<C>,
    report: &mut dyn FnMut(&str),
) -> Result<(C, &'a BackendAlias)> {
    for alias in aliases {
        if let Some(context) = probe(alias) {
            log::info!("Context alias is: {}", alias.name);
            return Ok((context, alias));
        }
        log::debug!("context alias '{}' failed, trying next", alias.name);
    }
    report(NO_CONTEXT_MESSAGE);
    Err(GyreError::NoGpuContext)
}

/// Everything a successful alias probe yields.
struct Acquired {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// Core wgpu context holding GPU handles.
///
/// Created once during initialization and never recreated; the viewport
/// dimensions are fixed for the process lifetime (resizing is out of
/// scope). The depth texture matches the surface dimensions.
pub struct GpuContext {
    /// The wgpu device for GPU operations
    pub device: wgpu::Device,
    /// The command queue for submitting work
    pub queue: wgpu::Queue,
    /// The window surface for presentation
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration
    pub config: wgpu::SurfaceConfiguration,

    /// Depth buffer format
    pub depth_format: wgpu::TextureFormat,
    /// Depth buffer texture view
    pub depth_view: wgpu::TextureView,

    /// Viewport width in pixels, recorded at acquisition
    pub viewport_width: u32,
    /// Viewport height in pixels, recorded at acquisition
    pub viewport_height: u32,
}

impl GpuContext {
    /// Acquires a rendering context for `window`, probing each backend
    /// alias in priority order.
    ///
    /// Blocks on the async adapter and device requests; intended to be
    /// called once from the event loop thread during startup.
    pub fn acquire<W>(
        window: W,
        settings: &RendererSettings,
        width: u32,
        height: u32,
        report: &mut dyn FnMut(&str),
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Clone + Send + Sync + 'static,
    {
        let aliases = settings
            .backend_aliases
            .clone()
            .unwrap_or_else(|| DEFAULT_ALIASES.to_vec());

        let (acquired, _alias) = select_alias(
            &aliases,
            |alias| Self::probe(alias, window.clone(), settings, width, height),
            report,
        )?;

        let Acquired {
            surface,
            device,
            queue,
            config,
        } = acquired;

        surface.configure(&device, &config);
        let depth_view = Self::create_depth_texture(&device, &config, settings.depth_format);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_format: settings.depth_format,
            depth_view,
            viewport_width: width,
            viewport_height: height,
        })
    }

    /// Attempts a full context acquisition under one alias. Any failure
    /// along the way makes the whole alias fail; the walk moves on.
    fn probe<W>(
        alias: &BackendAlias,
        window: W,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Option<Acquired>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: alias.backends,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance.create_surface(window).ok()?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: settings.power_preference,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok()?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            ..Default::default()
        }))
        .ok()?;

        let mut config = surface.get_default_config(&adapter, width, height)?;
        // The loop paces itself; presentation must not block on vsync.
        config.present_mode = wgpu::PresentMode::AutoNoVsync;

        Some(Acquired {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigures the surface with the recorded startup dimensions.
    /// Used when a frame reports the surface as lost or outdated.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Returns the surface color format.
    #[must_use]
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the recorded viewport dimensions.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }
}
