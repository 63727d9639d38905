use wgpu::util::DeviceExt;

use crate::error::RenderError;

use super::{MeshData, Vertex};

/// GPU-resident static mesh: one vertex buffer, one index buffer.
///
/// Geometry is uploaded once at creation and never rewritten. Both buffer
/// handles are released exactly once when the mesh drops, so bind/draw
/// after destruction is unrepresentable.
pub struct StaticMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl StaticMesh {
    /// Validates `data` and uploads it as immutable GPU buffers.
    ///
    /// Allocation failures inside wgpu are reported through the device's
    /// uncaptured-error channel and are fatal; the `Err` path here covers
    /// data that violates the mesh invariants.
    pub fn create(device: &wgpu::Device, data: &MeshData) -> Result<Self, RenderError> {
        data.validate()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("girru mesh vbo"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("girru mesh ibo"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count(),
        })
    }

    /// Vertex layout shared by every `StaticMesh`; pipelines are built
    /// against this.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        Vertex::layout()
    }

    /// Makes this mesh's vertex and index buffers the active drawing
    /// target of `rpass`.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    /// Issues the indexed draw for the whole mesh (6 indices for the
    /// quad). A pipeline must already be set and `bind` must have been
    /// called on the same pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}
