//! Mesh geometry on the GPU.

use asset::{MeshData, MeshVertex};
use bytemuck::{Pod, Zeroable};
use wgpu::{
    Buffer, BufferUsages, Device, IndexFormat, RenderPass, VertexBufferLayout, VertexStepMode,
    util::DeviceExt,
};

/// Vertex: position + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
    };
}

impl From<&MeshVertex> for Vertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            pos: v.position,
            uv: v.uv,
        }
    }
}

/// Immutable indexed mesh, drawn with a single call.
pub struct GpuMesh {
    vertex_buf: Buffer,
    index_buf: Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &Device, label: &str, mesh: &MeshData) -> Self {
        let vertices: Vec<Vertex> = mesh.vertices.iter().map(Vertex::from).collect();
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} VB")),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} IB")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: BufferUsages::INDEX,
        });
        Self {
            vertex_buf,
            index_buf,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn draw(&self, rpass: &mut RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        rpass.set_index_buffer(self.index_buf.slice(..), IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        assert_eq!(Vertex::LAYOUT.array_stride, 20);
        assert_eq!(Vertex::LAYOUT.attributes[1].offset, 12);
    }

    #[test]
    fn mesh_vertex_converts_to_gpu_layout() {
        let v = Vertex::from(&MeshVertex::new([1.0, 2.0, 3.0], [0.25, 0.75]));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.75]);
    }
}
