
use wgpu::{util::DeviceExt, Device};

use super::vertex::Vertex3D;
use crate::gfx::geometry::GeometryData;

/// Immutable vertex data plus its GPU buffers
///
/// Holds two index buffers over the same vertices: triangles for filled
/// drawing and a line list of triangle edges for wireframe drawing.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    edge_indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    edge_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub edge_index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        let edge_indices = geometry.edge_indices();

        Self {
            index_count: indices.len() as u32,
            edge_index_count: edge_indices.len() as u32,
            vertices,
            indices,
            edge_indices,
            vertex_buffer: None,
            index_buffer: None,
            edge_buffer: None,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some()
    }

    /// Uploads vertex and index data; a no-op once uploaded
    pub fn init_gpu_resources(&mut self, device: &Device) {
        if self.is_uploaded() {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));

        self.edge_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Edge Index Buffer"),
            contents: bytemuck::cast_slice(&self.edge_indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_edges(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_mesh_edges(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(edge_buffer)) = (&mesh.vertex_buffer, &mesh.edge_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.edge_index_count, 0, 0..1);
    }
}
