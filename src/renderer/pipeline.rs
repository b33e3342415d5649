//! Shader Pipeline
//!
//! Compiles the vertex and fragment stages fetched from the shader
//! source provider, then links them into one render pipeline per
//! primitive topology used by the scene (triangle list and triangle
//! strip; the topology is baked into a wgpu pipeline, so each gets its
//! own).
//!
//! Compilation and linking run inside wgpu validation error scopes so
//! failures surface as explicit errors. A failed stage or link logs the
//! diagnostic and aborts initialization; there is no partially-usable
//! pipeline state.
//!
//! The vertex layout is fixed by contract with the source provider:
//! `position` (three floats) at location 0, `color` (four floats) at
//! location 1, and a single uniform struct holding the projection and
//! model-view matrices at group 0, binding 0.

use std::borrow::Cow;
use std::mem;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::errors::{GyreError, Result};
use crate::renderer::context::GpuContext;
use crate::renderer::settings::RendererSettings;
use crate::renderer::sources::{SCENE_SHADER_ID, ShaderSources, ShaderStage};

/// The per-mesh uniform block, laid out exactly as the WGSL
/// `SceneUniforms` struct: projection first, model-view second.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
}

/// Byte offset of the model-view matrix inside [`SceneUniforms`].
/// The per-frame uniform write targets this offset, leaving the
/// projection half untouched.
pub const MODEL_VIEW_OFFSET: wgpu::BufferAddress = 64;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

/// Compiled and linked pipeline state. Immutable after initialization.
pub struct ScenePipeline {
    uniform_layout: wgpu::BindGroupLayout,
    list_pipeline: wgpu::RenderPipeline,
    strip_pipeline: wgpu::RenderPipeline,
}

/// Per-mesh uniform buffer and its bind group, resolved against the
/// pipeline's uniform layout.
pub struct MeshBinding {
    pub uniforms: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ScenePipeline {
    /// Fetches the scene shader sources, compiles both stages, and
    /// links the topology pipelines.
    pub fn new(
        ctx: &GpuContext,
        sources: &dyn ShaderSources,
        settings: &RendererSettings,
    ) -> Result<Self> {
        let vertex = compile_stage(ctx, sources, SCENE_SHADER_ID, ShaderStage::Vertex)?;
        let fragment = compile_stage(ctx, sources, SCENE_SHADER_ID, ShaderStage::Fragment)?;

        let uniform_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Scene Uniform Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[Some(&uniform_layout)],
                immediate_size: 0,
            });

        let list_pipeline = link(
            ctx,
            &pipeline_layout,
            &vertex,
            &fragment,
            wgpu::PrimitiveTopology::TriangleList,
            settings,
        )?;
        let strip_pipeline = link(
            ctx,
            &pipeline_layout,
            &vertex,
            &fragment,
            wgpu::PrimitiveTopology::TriangleStrip,
            settings,
        )?;

        Ok(Self {
            uniform_layout,
            list_pipeline,
            strip_pipeline,
        })
    }

    /// Creates a zero-initialized uniform buffer and bind group for one
    /// mesh.
    #[must_use]
    pub fn create_binding(&self, device: &wgpu::Device, label: &str) -> MeshBinding {
        let uniforms = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&SceneUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        MeshBinding {
            uniforms,
            bind_group,
        }
    }

    /// The pipeline matching a mesh's primitive topology.
    #[must_use]
    pub fn for_topology(&self, topology: wgpu::PrimitiveTopology) -> &wgpu::RenderPipeline {
        match topology {
            wgpu::PrimitiveTopology::TriangleStrip => &self.strip_pipeline,
            _ => &self.list_pipeline,
        }
    }
}

/// Compiles one shader stage inside a validation error scope.
/// A diagnostic fails the whole initialization.
fn compile_stage(
    ctx: &GpuContext,
    sources: &dyn ShaderSources,
    id: &str,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule> {
    let source = sources
        .source(id, stage)
        .ok_or_else(|| GyreError::ShaderSourceMissing {
            id: id.to_string(),
            stage,
        })?;

    let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = ctx
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{id}.{}", stage.suffix())),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(source.into_owned())),
        });

    if let Some(error) = pollster::block_on(error_scope.pop()) {
        log::error!("{stage} shader '{id}' failed to compile: {error}");
        return Err(GyreError::ShaderCompileFailed {
            id: id.to_string(),
            stage,
            message: error.to_string(),
        });
    }

    Ok(module)
}

/// Links the compiled stages into a render pipeline for one topology,
/// again inside a validation error scope.
fn link(
    ctx: &GpuContext,
    layout: &wgpu::PipelineLayout,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
    settings: &RendererSettings,
) -> Result<wgpu::RenderPipeline> {
    let vertex_buffers = [
        wgpu::VertexBufferLayout {
            array_stride: (mem::size_of::<f32>() * 3) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: (mem::size_of::<f32>() * 4) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRIBUTES,
        },
    ];

    let error_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = ctx
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: vertex,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.color_format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: settings.depth_format,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

    if let Some(error) = pollster::block_on(error_scope.pop()) {
        log::error!("Could not initialise shader pipeline: {error}");
        return Err(GyreError::PipelineLinkFailed(error.to_string()));
    }

    Ok(pipeline)
}
