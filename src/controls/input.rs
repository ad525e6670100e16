//! Pointer, keyboard and wheel handling
//!
//! Dragging rotates the house group in world space; keys move the camera
//! and spin the group about its own Y axis; the wheel dollies the camera.
//! Camera depth and height are clamped to fixed ranges.

use cgmath::Deg;
use log::debug;

use crate::gfx::{
    camera::PerspectiveCamera,
    scene::transform::{EulerXyz, Transform},
};

/// Step for every keyboard move, in world units or radians
pub const MOVE_SPEED: f32 = 0.3;
/// World units per wheel delta unit
pub const WHEEL_SCALE: f32 = 0.01;
pub const CAMERA_Z_RANGE: (f32, f32) = (3.0, 10.0);
pub const CAMERA_Y_RANGE: (f32, f32) = (-2.0, 5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Drag state and the last observed pointer position (logical pixels)
#[derive(Debug, Clone, Copy, Default)]
pub struct InputController {
    pub drag: DragState,
    pub last_pointer: (f32, f32),
}

fn clamp_camera_z(camera: &mut PerspectiveCamera) {
    let (min, max) = CAMERA_Z_RANGE;
    camera.position.z = camera.position.z.clamp(min, max);
}

fn clamp_camera_y(camera: &mut PerspectiveCamera) {
    let (min, max) = CAMERA_Y_RANGE;
    camera.position.y = camera.position.y.clamp(min, max);
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn pointer_down(&mut self) {
        self.drag = DragState::Dragging;
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Rotates `group` by the pointer delta while dragging
    ///
    /// One logical pixel is one degree: horizontal motion turns about Y,
    /// vertical motion about X. The position is remembered in every state.
    pub fn pointer_move(&mut self, x: f32, y: f32, group: &mut Transform) {
        if self.is_dragging() {
            let (last_x, last_y) = self.last_pointer;
            let pitch = cgmath::Rad::from(Deg(y - last_y)).0;
            let yaw = cgmath::Rad::from(Deg(x - last_x)).0;
            group.rotate_world(EulerXyz::new(pitch, yaw, 0.0).to_quaternion());
        }
        self.last_pointer = (x, y);
    }

    /// Applies a key press; matching is case-insensitive
    ///
    /// Camera ranges are enforced after every press, recognised or not.
    pub fn key_down(&mut self, key: &str, camera: &mut PerspectiveCamera, group: &mut Transform) {
        match key.to_lowercase().as_str() {
            "w" => camera.position.y += MOVE_SPEED,
            "s" => camera.position.y -= MOVE_SPEED,
            "a" => group.add_euler_y(MOVE_SPEED),
            "d" => group.add_euler_y(-MOVE_SPEED),
            "z" => camera.position.z -= MOVE_SPEED,
            "x" => camera.position.z += MOVE_SPEED,
            _ => {}
        }
        clamp_camera_z(camera);
        clamp_camera_y(camera);
    }

    /// Dollies the camera; positive `delta_y` moves it away from the house
    pub fn wheel(&mut self, delta_y: f32, camera: &mut PerspectiveCamera) {
        camera.position.z += delta_y * WHEEL_SCALE;
        clamp_camera_z(camera);
    }

    /// Restores the initial view; drag state is left alone
    pub fn reset(&mut self, camera: &mut PerspectiveCamera, group: &mut Transform) {
        group.reset_rotation();
        camera.reset_position();
        debug!("View reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::tests::quat_approx_eq;
    use cgmath::{One, Quaternion, Vector3};

    fn setup() -> (InputController, PerspectiveCamera, Transform) {
        (
            InputController::new(),
            PerspectiveCamera::default(),
            Transform::identity(),
        )
    }

    #[test]
    fn x_key_backs_off_until_the_far_limit() {
        let (mut input, mut camera, mut group) = setup();
        for _ in 0..3 {
            input.key_down("x", &mut camera, &mut group);
        }
        assert!((camera.position.z - 5.9).abs() < 1e-5);

        for _ in 0..6 {
            input.key_down("x", &mut camera, &mut group);
        }
        assert!((camera.position.z - 7.7).abs() < 1e-4);

        for _ in 0..8 {
            input.key_down("x", &mut camera, &mut group);
        }
        assert_eq!(camera.position.z, 10.0);
    }

    #[test]
    fn z_key_stops_at_the_near_limit() {
        let (mut input, mut camera, mut group) = setup();
        for _ in 0..20 {
            input.key_down("Z", &mut camera, &mut group);
        }
        assert_eq!(camera.position.z, 3.0);
    }

    #[test]
    fn height_stays_in_range() {
        let (mut input, mut camera, mut group) = setup();
        for _ in 0..40 {
            input.key_down("w", &mut camera, &mut group);
            assert!(camera.position.y <= 5.0);
        }
        assert_eq!(camera.position.y, 5.0);
        for _ in 0..80 {
            input.key_down("S", &mut camera, &mut group);
            assert!(camera.position.y >= -2.0);
        }
        assert_eq!(camera.position.y, -2.0);
    }

    #[test]
    fn unknown_key_still_clamps() {
        let (mut input, mut camera, mut group) = setup();
        camera.position.z = 42.0;
        camera.position.y = -9.0;
        input.key_down("q", &mut camera, &mut group);
        assert_eq!(camera.position, Vector3::new(0.0, -2.0, 10.0));
        assert_eq!(group.rotation, Quaternion::one());
    }

    #[test]
    fn a_and_d_turn_the_group_about_y() {
        let (mut input, mut camera, mut group) = setup();
        input.key_down("a", &mut camera, &mut group);
        assert!((group.euler().y - MOVE_SPEED).abs() < 1e-5);
        input.key_down("D", &mut camera, &mut group);
        input.key_down("d", &mut camera, &mut group);
        assert!((group.euler().y + MOVE_SPEED).abs() < 1e-5);
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn wheel_dolly_is_scaled_and_clamped() {
        let (mut input, mut camera, _) = setup();
        input.wheel(100.0, &mut camera);
        assert!((camera.position.z - 6.0).abs() < 1e-5);
        input.wheel(-1000.0, &mut camera);
        assert_eq!(camera.position.z, 3.0);
        input.wheel(5000.0, &mut camera);
        assert_eq!(camera.position.z, 10.0);
    }

    #[test]
    fn drag_rotates_by_pointer_delta_in_degrees() {
        let (mut input, _, mut group) = setup();
        input.pointer_down();
        input.pointer_move(10.0, 20.0, &mut group);

        let expected = EulerXyz::new(20f32.to_radians(), 10f32.to_radians(), 0.0).to_quaternion();
        assert!(quat_approx_eq(group.rotation, expected));
        assert_eq!(input.last_pointer, (10.0, 20.0));
    }

    #[test]
    fn drag_deltas_compose_in_world_space() {
        let (mut input, _, mut group) = setup();
        input.pointer_down();
        input.pointer_move(30.0, 0.0, &mut group);
        input.pointer_move(30.0, 15.0, &mut group);

        let yaw = EulerXyz::new(0.0, 30f32.to_radians(), 0.0).to_quaternion();
        let pitch = EulerXyz::new(15f32.to_radians(), 0.0, 0.0).to_quaternion();
        assert!(quat_approx_eq(group.rotation, pitch * yaw));
    }

    #[test]
    fn moves_while_idle_only_track_the_pointer() {
        let (mut input, _, mut group) = setup();
        input.pointer_move(50.0, 60.0, &mut group);
        assert_eq!(group.rotation, Quaternion::one());
        assert_eq!(input.last_pointer, (50.0, 60.0));

        input.pointer_down();
        input.pointer_up();
        input.pointer_move(70.0, 60.0, &mut group);
        assert_eq!(group.rotation, Quaternion::one());
        assert_eq!(input.drag, DragState::Idle);
    }

    #[test]
    fn reset_restores_view_but_not_drag_state() {
        let (mut input, mut camera, mut group) = setup();
        input.pointer_down();
        input.pointer_move(40.0, 40.0, &mut group);
        input.key_down("w", &mut camera, &mut group);
        input.wheel(150.0, &mut camera);

        input.reset(&mut camera, &mut group);
        assert_eq!(group.rotation, Quaternion::one());
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 5.0));
        assert!(input.is_dragging());
        assert_eq!(input.last_pointer, (40.0, 40.0));
    }
}
