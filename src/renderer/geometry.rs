//! Static Geometry Store
//!
//! Two hardcoded meshes, each a position table plus a parallel per-vertex
//! color table: a triangle drawn as a list and a square drawn as a
//! strip. [`MeshData`] is the CPU-side table; [`MeshBuffer`] is its
//! uploaded form with the item metadata recorded alongside the buffer
//! handles. Upload happens once at startup; the buffers are immutable
//! afterwards.
//!
//! This store has no dependency on shader state. Binding geometry to the
//! pipeline's attributes happens at draw time.

use wgpu::util::DeviceExt;

use crate::renderer::context::GpuContext;

/// Components per position vertex.
pub const POSITION_ITEM_SIZE: u32 = 3;

/// Components per color vertex (RGBA).
pub const COLOR_ITEM_SIZE: u32 = 4;

/// CPU-side mesh definition.
#[derive(Debug, Clone, Copy)]
pub struct MeshData {
    pub label: &'static str,
    /// Flat xyz position table, [`POSITION_ITEM_SIZE`] floats per vertex.
    pub positions: &'static [f32],
    /// Flat RGBA color table, [`COLOR_ITEM_SIZE`] floats per vertex,
    /// parallel to `positions`.
    pub colors: &'static [f32],
    pub topology: wgpu::PrimitiveTopology,
    /// Fixed x translation applied to this mesh every frame.
    pub offset_x: f32,
}

impl MeshData {
    /// Number of vertices in the position table.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        (self.positions.len() as u32) / POSITION_ITEM_SIZE
    }

    /// Number of vertices in the color table. Matches
    /// [`item_count`](Self::item_count) for well-formed meshes.
    #[must_use]
    pub fn color_item_count(&self) -> u32 {
        (self.colors.len() as u32) / COLOR_ITEM_SIZE
    }
}

/// The triangle: three vertices, one color per corner, drawn to the
/// left of center.
pub const TRIANGLE: MeshData = MeshData {
    label: "triangle",
    positions: &[
        0.0, 1.333, 0.0, //
        -1.155, -0.667, 0.0, //
        1.155, -0.667, 0.0,
    ],
    colors: &[
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
    ],
    topology: wgpu::PrimitiveTopology::TriangleList,
    offset_x: -1.5,
};

/// The square: four vertices in strip order, drawn to the right of
/// center.
pub const SQUARE: MeshData = MeshData {
    label: "square",
    positions: &[
        1.0, 1.0, 0.0, //
        -1.0, 1.0, 0.0, //
        1.0, -1.0, 0.0, //
        -1.0, -1.0, 0.0,
    ],
    colors: &[
        1.0, 1.0, 0.0, 1.0, //
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
    ],
    topology: wgpu::PrimitiveTopology::TriangleStrip,
    offset_x: 1.5,
};

/// A mesh uploaded to the GPU: one vertex buffer per attribute plus the
/// recorded item metadata. Immutable after upload.
pub struct MeshBuffer {
    pub position: wgpu::Buffer,
    pub position_item_size: u32,
    pub color: wgpu::Buffer,
    pub color_item_size: u32,
    pub item_count: u32,
    pub topology: wgpu::PrimitiveTopology,
    pub offset_x: f32,
}

impl MeshBuffer {
    /// Uploads one mesh as static vertex buffers (written once, drawn
    /// many times).
    #[must_use]
    pub fn upload(ctx: &GpuContext, data: &MeshData) -> Self {
        let position = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(data.label),
                contents: bytemuck::cast_slice(data.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let color = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(data.label),
                contents: bytemuck::cast_slice(data.colors),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            position,
            position_item_size: POSITION_ITEM_SIZE,
            color,
            color_item_size: COLOR_ITEM_SIZE,
            item_count: data.item_count(),
            topology: data.topology,
            offset_x: data.offset_x,
        }
    }
}

/// The two static meshes of the scene, uploaded in draw order.
pub struct SceneMeshes {
    pub triangle: MeshBuffer,
    pub square: MeshBuffer,
}

impl SceneMeshes {
    #[must_use]
    pub fn upload(ctx: &GpuContext) -> Self {
        Self {
            triangle: MeshBuffer::upload(ctx, &TRIANGLE),
            square: MeshBuffer::upload(ctx, &SQUARE),
        }
    }
}
