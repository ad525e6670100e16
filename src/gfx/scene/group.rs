//! Scene graph nodes
//!
//! A [`Group`] owns its child [`Shape`]s outright. Everything outside the
//! group refers to a child through a [`ShapeId`], which stays valid for the
//! group's lifetime because children are never removed.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::Device;

use super::{mesh::Mesh, transform::Transform};
use crate::{
    gfx::resources::material::MaterialId,
    wgpu_utils::uniform_buffer::UniformBuffer,
};

/// Handle to a shape inside a [`Group`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-shape uniform: world matrix and the matrix for transforming normals
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl ShapeUniform {
    pub fn from_world_matrix(world: Matrix4<f32>) -> Self {
        let normal = world
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model: world.into(),
            normal: normal.into(),
        }
    }
}

type ShapeUBO = UniformBuffer<ShapeUniform>;

pub struct ShapeGpuResources {
    transform_ubo: ShapeUBO,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable leaf: mesh, material reference and fixed local transform
pub struct Shape {
    pub name: String,
    pub mesh: Mesh,
    pub material_id: MaterialId,
    pub transform: Transform,
    pub gpu_resources: Option<ShapeGpuResources>,
}

impl Shape {
    pub fn new(name: &str, mesh: Mesh, material_id: &str, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            mesh,
            material_id: material_id.to_string(),
            transform,
            gpu_resources: None,
        }
    }

    /// Creates mesh buffers and the transform bind group
    ///
    /// `layout` is the per-shape layout the render pipelines were built with.
    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        self.mesh.init_gpu_resources(device);

        if self.gpu_resources.is_some() {
            return;
        }

        let transform_ubo = ShapeUBO::new(device);
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Transform Bind Group", self.name)),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.binding_resource(),
            }],
        });

        self.gpu_resources = Some(ShapeGpuResources {
            transform_ubo,
            transform_bind_group,
        });
    }

    /// Writes the world matrix to the GPU if it changed since the last call
    pub fn update_transform(&mut self, queue: &wgpu::Queue, world: Matrix4<f32>) {
        if let Some(gpu) = &mut self.gpu_resources {
            gpu.transform_ubo
                .update_content(queue, ShapeUniform::from_world_matrix(world));
        }
    }

    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|gpu| &gpu.transform_bind_group)
    }
}

/// A transform node owning a flat list of shapes
///
/// Only the group's own transform is meant to change after construction;
/// children keep their local offsets.
#[derive(Default)]
pub struct Group {
    pub name: String,
    pub transform: Transform,
    children: Vec<Shape>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::identity(),
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        self.children.push(shape);
        ShapeId(self.children.len() - 1)
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.children[id.0]
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Group matrix composed with the shape's local matrix
    pub fn world_matrix(&self, id: ShapeId) -> Matrix4<f32> {
        self.transform.matrix() * self.children[id.0].transform.matrix()
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for shape in &mut self.children {
            shape.init_gpu_resources(device, layout);
        }
    }

    /// Pushes every child's world matrix to the GPU
    pub fn update_transforms(&mut self, queue: &wgpu::Queue) {
        let group_matrix = self.transform.matrix();
        for shape in &mut self.children {
            let world = group_matrix * shape.transform.matrix();
            shape.update_transform(queue, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_box, scene::transform::EulerXyz};
    use cgmath::{Point3, Transform as _};
    use std::f32::consts::FRAC_PI_2;

    fn unit_box(name: &str, transform: Transform) -> Shape {
        Shape::new(name, Mesh::from_geometry(&generate_box(1.0, 1.0, 1.0)), "default", transform)
    }

    #[test]
    fn ids_index_in_insertion_order() {
        let mut group = Group::new("test");
        let a = group.add(unit_box("a", Transform::identity()));
        let b = group.add(unit_box("b", Transform::identity()));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(group.shape(b).name, "b");
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn world_matrix_applies_group_rotation_to_child_offset() {
        let mut group = Group::new("test");
        let id = group.add(unit_box("a", Transform::from_translation(0.0, 0.0, 1.0)));
        group.transform.set_euler(EulerXyz::new(0.0, FRAC_PI_2, 0.0));

        let p = group.world_matrix(id).transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
        // the child's own offset is untouched
        assert_eq!(group.shape(id).transform.position.z, 1.0);
    }

    #[test]
    fn normal_matrix_of_rigid_transform_is_the_rotation() {
        let world = Transform::from_translation(3.0, 4.0, 5.0)
            .with_euler(EulerXyz::new(0.3, 0.2, 0.1))
            .matrix();
        let uniform = ShapeUniform::from_world_matrix(world);
        for col in 0..3 {
            for row in 0..3 {
                assert!((uniform.normal[col][row] - uniform.model[col][row]).abs() < 1e-5);
            }
        }
    }
}
