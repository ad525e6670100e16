//! Phong material system
//!
//! Materials are stored in a [`MaterialManager`] and shapes reference them
//! by ID, so one material (the window glass, for example) can be shared by
//! several shapes. Color and wireframe state are plain fields; the GPU copy
//! is refreshed every frame and only written when it actually changed.

use std::collections::HashMap;
use wgpu::Device;

use crate::{gfx::color::hex_to_linear, wgpu_utils::uniform_buffer::UniformBuffer};

/// Material ID for referencing materials
pub type MaterialId = String;

/// Which faces of a material are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Back faces are culled
    #[default]
    Front,
    /// Both faces are drawn and lit from the viewer's side
    Double,
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Blinn-Phong material
pub struct Material {
    pub name: String,
    /// Diffuse color as `0xRRGGBB` (sRGB)
    pub color: u32,
    /// Specular color as `0xRRGGBB` (sRGB)
    pub specular: u32,
    pub shininess: f32,
    pub wireframe: bool,
    pub side: Side,

    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            color: 0xcccccc,
            specular: 0x111111,
            shininess: 30.0,
            wireframe: false,
            side: Side::Front,
            gpu: None,
        }
    }
}

impl Material {
    pub fn new(name: &str, color: u32) -> Self {
        Self {
            name: name.to_string(),
            color,
            ..Default::default()
        }
    }

    /// Builder pattern: draw both faces
    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }

    pub fn set_color(&mut self, color: u32) {
        self.color = color & 0xffffff;
    }

    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = hex_to_linear(self.color);
        MaterialUniform {
            color: [r, g, b, 1.0],
            specular: hex_to_linear(self.specular),
            shininess: self.shininess,
        }
    }

    /// Creates the uniform buffer on first use and syncs the current state
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) {
        if self.gpu.is_none() {
            let ubo = MaterialUBO::new(device);
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} Material Bind Group", self.name)),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.binding_resource(),
                }],
            });
            self.gpu = Some(MaterialGpu { ubo, bind_group });
        }

        let uniform = self.uniform();
        if let Some(gpu) = &mut self.gpu {
            gpu.ubo.update_content(queue, uniform);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the scene
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = material.name.clone();
        self.materials.insert(id.clone(), material);
        id
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Material for rendering, falling back to the default when missing
    pub fn get_material_for_object(&self, id: &str) -> &Material {
        self.materials.get(id).unwrap_or(&self.default_material)
    }

    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Syncs every material (and the fallback) to the GPU
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}
