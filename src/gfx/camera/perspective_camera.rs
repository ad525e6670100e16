use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// Eye position, padded to a vec4 for alignment
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}

/// Free-standing perspective camera looking down -Z
///
/// The camera has no orientation of its own: it is translated, never
/// rotated, so the view matrix is a pure translation by `-position`.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub position: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        let mut camera = Self::new(75.0, 1.0, 0.1, 1000.0);
        camera.reset_position();
        camera
    }
}

impl PerspectiveCamera {
    pub const DEFAULT_POSITION: Vector3<f32> = Vector3::new(0.0, 0.0, 5.0);

    /// Camera at the origin
    ///
    /// # Arguments
    /// * `fovy_degrees` - Vertical field of view
    /// * `aspect` - Width over height
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Vector3::zero(),
            fovy: Deg(fovy_degrees),
            aspect,
            znear,
            zfar,
            uniform: CameraUniform::default(),
        }
    }

    /// Back to (0, 0, 5)
    pub fn reset_position(&mut self) {
        self.position = Self::DEFAULT_POSITION;
    }

    /// Recomputes the aspect ratio; sizes with a zero side are ignored
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::from_translation(-self.position);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn update_view_proj(&mut self) {
        let p = self.position;
        self.uniform.view_position = [p.x, p.y, p.z, 1.0];
        self.uniform.view_proj = self.build_view_projection_matrix().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_75_degree_view_from_z_5() {
        let camera = PerspectiveCamera::default();
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.fovy, Deg(75.0));
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 1000.0);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero_sides() {
        let mut camera = PerspectiveCamera::default();
        camera.resize_projection(1600, 800);
        assert_eq!(camera.aspect, 2.0);
        camera.resize_projection(1600, 0);
        assert_eq!(camera.aspect, 2.0);
        camera.resize_projection(0, 800);
        assert_eq!(camera.aspect, 2.0);
        camera.update_view_proj();
    }

    #[test]
    fn origin_projects_to_screen_center_inside_depth_range() {
        let mut camera = PerspectiveCamera::default();
        camera.resize_projection(1200, 800);
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn raising_the_camera_moves_the_scene_down() {
        let mut camera = PerspectiveCamera::default();
        camera.position.y = 1.0;
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.y / clip.w < 0.0);
    }

    #[test]
    fn uniform_tracks_position() {
        let mut camera = PerspectiveCamera::default();
        camera.position = Vector3::new(0.0, 2.0, 7.0);
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [0.0, 2.0, 7.0, 1.0]);
    }
}
