//! Global uniform bindings for camera and light data
//!
//! Everything here is shared by every draw call and bound at group 0 in
//! all render pipelines.

use cgmath::{InnerSpace, Vector3};

use crate::{
    gfx::{camera::CameraUniform, color::hex_to_linear},
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in `phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// Ambient color premultiplied by intensity, linear
    ambient: [f32; 4],
    /// Unit vector from the scene toward the light
    light_direction: [f32; 4],
    /// Directional color premultiplied by intensity, linear
    light_color: [f32; 4],
}

/// Ambient plus one directional light
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    /// The light shines from here toward the origin
    pub directional_position: [f32; 3],
    pub directional_color: u32,
    pub directional_intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 0.6,
            directional_position: [10.0, 20.0, 15.0],
            directional_color: 0xffffff,
            directional_intensity: 0.8,
        }
    }
}

impl LightConfig {
    /// Direction toward the light, pointing away from the origin
    pub fn direction(&self) -> Vector3<f32> {
        let [x, y, z] = self.directional_position;
        let v = Vector3::new(x, y, z);
        if v.magnitude2() == 0.0 {
            Vector3::unit_y()
        } else {
            v.normalize()
        }
    }
}

fn premultiplied(hex: u32, intensity: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear(hex);
    [r * intensity, g * intensity, b * intensity, 1.0]
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

pub fn global_content(camera: CameraUniform, light: &LightConfig) -> GlobalUBOContent {
    let d = light.direction();
    GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        ambient: premultiplied(light.ambient_color, light.ambient_intensity),
        light_direction: [d.x, d.y, d.z, 0.0],
        light_color: premultiplied(light.directional_color, light.directional_intensity),
    }
}

/// Writes camera and light data for the frame
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: &LightConfig,
) {
    ubo.update_content(queue, global_content(camera, light));
}

/// Layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_points_from_above_front_right() {
        let d = LightConfig::default().direction();
        assert!((d.magnitude() - 1.0).abs() < 1e-6);
        assert!(d.x > 0.0 && d.y > 0.0 && d.z > 0.0);
        assert!(d.y > d.z && d.z > d.x);
    }

    #[test]
    fn intensities_scale_white() {
        let content = global_content(CameraUniform::default(), &LightConfig::default());
        assert!((content.ambient[0] - 0.6).abs() < 1e-6);
        assert!((content.light_color[2] - 0.8).abs() < 1e-6);
        assert_eq!(content.light_direction[3], 0.0);
    }

    #[test]
    fn degenerate_position_falls_back_to_overhead() {
        let light = LightConfig {
            directional_position: [0.0; 3],
            ..Default::default()
        };
        assert_eq!(light.direction(), Vector3::unit_y());
    }

    #[test]
    fn uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }
}
