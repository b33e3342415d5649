//! The rendering core: context acquisition, GPU resource setup, and the
//! per-frame draw sequence.
//!
//! Initialization is a strict ordered sequence that short-circuits on
//! the first failure:
//!
//! 1. [`GpuContext::acquire`] walks the backend alias list; on
//!    exhaustion the error reporter fires and nothing else runs.
//! 2. [`ScenePipeline::new`] compiles and links the shaders.
//! 3. [`SceneMeshes::upload`] uploads the static geometry.
//! 4. Projection setup: the perspective matrix is computed exactly once
//!    from the recorded viewport and written into each mesh's uniform
//!    buffer.
//!
//! After that, [`Renderer::draw_frame`] is the only per-frame entry
//! point.

pub mod context;
pub mod geometry;
pub mod pipeline;
pub mod settings;
pub mod sources;

use glam::{Mat4, Vec3};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{GyreError, Result};
use crate::spin::SpinState;

use self::context::GpuContext;
use self::geometry::SceneMeshes;
use self::pipeline::{MODEL_VIEW_OFFSET, MeshBinding, ScenePipeline};
use self::settings::RendererSettings;
use self::sources::ShaderSources;

/// The fixed perspective projection, computed once at startup from the
/// recorded viewport dimensions.
#[must_use]
pub fn projection_matrix(settings: &RendererSettings, width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height as f32;
    Mat4::perspective_rh(
        settings.fov_y_degrees.to_radians(),
        aspect,
        settings.z_near,
        settings.z_far,
    )
}

/// Per-mesh model-view matrix: translation by the mesh's fixed x offset
/// and the shared camera depth, then rotation around z by the current
/// angle.
///
/// Pure function of the animation state; the draw sequence is fully
/// determined by `(angle, z_shift)`.
#[must_use]
pub fn model_view(offset_x: f32, spin: &SpinState) -> Mat4 {
    Mat4::from_translation(Vec3::new(offset_x, 0.0, spin.z_shift))
        * Mat4::from_rotation_z(spin.angle)
}

/// Owns every GPU resource of the scene: context, pipelines, mesh
/// buffers, per-mesh uniform bindings, and the fixed projection.
pub struct Renderer {
    ctx: GpuContext,
    pipeline: ScenePipeline,
    meshes: SceneMeshes,
    triangle_binding: MeshBinding,
    square_binding: MeshBinding,
    projection: Mat4,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Runs the full initialization sequence against `window`.
    ///
    /// `report` is the error reporter; it is invoked exactly once, with
    /// a fixed message, if no backend alias yields a context. Any error
    /// aborts the sequence at the failing step.
    pub fn initialize<W>(
        window: W,
        width: u32,
        height: u32,
        settings: &RendererSettings,
        sources: &dyn ShaderSources,
        report: &mut dyn FnMut(&str),
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Clone + Send + Sync + 'static,
    {
        let ctx = GpuContext::acquire(window, settings, width, height, report)?;
        log::debug!("GPU context ready, viewport {width}x{height}");

        let pipeline = ScenePipeline::new(&ctx, sources, settings)?;
        log::debug!("scene pipeline linked");

        let meshes = SceneMeshes::upload(&ctx);
        let triangle_binding = pipeline.create_binding(&ctx.device, "Triangle Uniforms");
        let square_binding = pipeline.create_binding(&ctx.device, "Square Uniforms");

        let projection = projection_matrix(settings, ctx.viewport_width, ctx.viewport_height);
        for binding in [&triangle_binding, &square_binding] {
            ctx.queue.write_buffer(
                &binding.uniforms,
                0,
                bytemuck::bytes_of(&projection.to_cols_array_2d()),
            );
        }

        Ok(Self {
            ctx,
            pipeline,
            meshes,
            triangle_binding,
            square_binding,
            projection,
            clear_color: settings.clear_color,
        })
    }

    /// Draws one frame: clears color and depth, then draws the triangle
    /// and the square in fixed order with freshly built model-view
    /// matrices, and finally advances the rotation angle by one step.
    ///
    /// A lost or outdated surface reconfigures with the recorded
    /// dimensions and skips the frame.
    pub fn draw_frame(&mut self, spin: &mut SpinState) -> Result<()> {
        let frame = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                log::debug!("surface lost, reconfiguring");
                self.ctx.reconfigure();
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => {
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Validation => {
                return Err(GyreError::FrameAcquireFailed(
                    "validation error".to_string(),
                ));
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draws = [
            (&self.meshes.triangle, &self.triangle_binding),
            (&self.meshes.square, &self.square_binding),
        ];

        for (mesh, binding) in draws {
            let mv = model_view(mesh.offset_x, spin);
            self.ctx.queue.write_buffer(
                &binding.uniforms,
                MODEL_VIEW_OFFSET,
                bytemuck::bytes_of(&mv.to_cols_array_2d()),
            );
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for (mesh, binding) in draws {
                pass.set_pipeline(self.pipeline.for_topology(mesh.topology));
                pass.set_bind_group(0, &binding.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.position.slice(..));
                pass.set_vertex_buffer(1, mesh.color.slice(..));
                pass.draw(0..mesh.item_count, 0..1);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        spin.advance();
        Ok(())
    }

    /// The fixed projection matrix.
    #[must_use]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// The underlying GPU context.
    #[must_use]
    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }
}
