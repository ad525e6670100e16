use wgpu::Device;

use super::house::{build_house, House};
use crate::gfx::{
    camera::PerspectiveCamera,
    resources::{material::MaterialManager, LightConfig},
};

/// Sky blue
pub const BACKGROUND_COLOR: u32 = 0x87ceeb;

/// Main scene: camera, house, materials and lights
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub house: House,
    pub material_manager: MaterialManager,
    pub lights: LightConfig,
    pub background: u32,
}

impl Scene {
    /// Creates the house scene for a viewport of the given size
    pub fn new(width: u32, height: u32) -> Self {
        let mut material_manager = MaterialManager::new();
        let house = build_house(&mut material_manager);

        let mut camera = PerspectiveCamera::default();
        camera.resize_projection(width, height);

        Self {
            camera,
            house,
            material_manager,
            lights: LightConfig::default(),
            background: BACKGROUND_COLOR,
        }
    }

    /// Recomputes the camera matrices
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }

    /// Uploads meshes and creates per-shape bind groups
    pub fn init_gpu_resources(&mut self, device: &Device, shape_layout: &wgpu::BindGroupLayout) {
        self.house.group.init_gpu_resources(device, shape_layout);
    }

    /// Pushes transforms and materials to the GPU for the coming frame
    pub fn sync_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        material_layout: &wgpu::BindGroupLayout,
    ) {
        self.house.group.update_transforms(queue);
        self.material_manager
            .update_all_gpu_resources(device, queue, material_layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn new_scene_uses_window_aspect_and_default_camera() {
        let scene = Scene::new(1200, 800);
        assert!((scene.camera.aspect - 1.5).abs() < 1e-6);
        assert_eq!(scene.camera.position, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.background, 0x87ceeb);
        assert_eq!(scene.material_manager.len(), 5);
    }

    #[test]
    fn update_refreshes_camera_uniform() {
        let mut scene = Scene::new(800, 800);
        scene.camera.position.y = 1.5;
        scene.update();
        assert_eq!(scene.camera.uniform.view_position[1], 1.5);
    }
}
