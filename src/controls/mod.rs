//! Interaction state and event dispatch
//!
//! All mutable viewer state lives in [`ViewerState`]. The host translates
//! window events into [`ViewerEvent`]s and feeds them to
//! [`ViewerState::handle`], which routes each kind to its handler.

pub mod appearance;
pub mod input;

pub use appearance::{Command, RoofColor, WallColor, CONTROL_IDS};
pub use input::{DragState, InputController};

use log::debug;

use crate::gfx::scene::Scene;

/// Viewer-level event, already in logical pixels and browser-style deltas
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    PointerDown,
    PointerMove { x: f32, y: f32 },
    PointerUp,
    KeyDown(String),
    /// Positive values move the camera away
    Wheel { delta_y: f32 },
    Resize { width: u32, height: u32 },
    Command(Command),
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
}

impl Response {
    pub const NONE: Response = Response { redraw: false };
    pub const REDRAW: Response = Response { redraw: true };
}

pub struct ViewerState {
    pub scene: Scene,
    pub input: InputController,
}

impl ViewerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: Scene::new(width, height),
            input: InputController::new(),
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Response {
        match event {
            ViewerEvent::PointerDown => self.pointer_down(),
            ViewerEvent::PointerMove { x, y } => self.pointer_move(x, y),
            ViewerEvent::PointerUp => self.pointer_up(),
            ViewerEvent::KeyDown(key) => self.key_down(&key),
            ViewerEvent::Wheel { delta_y } => self.wheel(delta_y),
            ViewerEvent::Resize { width, height } => self.resize(width, height),
            ViewerEvent::Command(command) => self.command(command),
        }
    }

    pub fn pointer_down(&mut self) -> Response {
        self.input.pointer_down();
        Response::NONE
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Response {
        self.input
            .pointer_move(x, y, &mut self.scene.house.group.transform);
        Response::NONE
    }

    pub fn pointer_up(&mut self) -> Response {
        self.input.pointer_up();
        Response::NONE
    }

    pub fn key_down(&mut self, key: &str) -> Response {
        let scene = &mut self.scene;
        self.input
            .key_down(key, &mut scene.camera, &mut scene.house.group.transform);
        Response::REDRAW
    }

    pub fn wheel(&mut self, delta_y: f32) -> Response {
        self.input.wheel(delta_y, &mut self.scene.camera);
        Response::NONE
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Response {
        self.scene.resize(width, height);
        Response::NONE
    }

    pub fn command(&mut self, command: Command) -> Response {
        debug!("Command: {}", command);
        let scene = &mut self.scene;
        match command {
            Command::SetRoofColor(color) => {
                appearance::set_roof_color(&mut scene.material_manager, &scene.house, color)
            }
            Command::SetWallColor(color) => {
                appearance::set_wall_color(&mut scene.material_manager, &scene.house, color)
            }
            Command::ToggleWireframe => {
                appearance::toggle_wireframe(&mut scene.material_manager, &scene.house)
            }
            Command::ResetView => self
                .input
                .reset(&mut scene.camera, &mut scene.house.group.transform),
        }
        Response::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::{tests::quat_approx_eq, EulerXyz};
    use cgmath::{One, Quaternion, Vector3};

    fn state() -> ViewerState {
        ViewerState::new(1200, 800)
    }

    #[test]
    fn keys_request_a_redraw_and_wheel_does_not() {
        let mut state = state();
        assert!(state.handle(ViewerEvent::KeyDown("x".into())).redraw);
        assert!(state.handle(ViewerEvent::KeyDown("?".into())).redraw);
        assert!(!state.handle(ViewerEvent::Wheel { delta_y: 100.0 }).redraw);
    }

    #[test]
    fn drag_through_events_rotates_the_house() {
        let mut state = state();
        state.handle(ViewerEvent::PointerMove { x: 0.0, y: 0.0 });
        state.handle(ViewerEvent::PointerDown);
        state.handle(ViewerEvent::PointerMove { x: 10.0, y: 20.0 });
        state.handle(ViewerEvent::PointerUp);

        let expected = EulerXyz::new(20f32.to_radians(), 10f32.to_radians(), 0.0).to_quaternion();
        assert!(quat_approx_eq(state.scene.house.group.transform.rotation, expected));
        assert_eq!(state.input.drag, DragState::Idle);
    }

    #[test]
    fn reset_command_restores_the_initial_view() {
        let mut state = state();
        state.handle(ViewerEvent::KeyDown("w".into()));
        state.handle(ViewerEvent::KeyDown("a".into()));
        state.handle(ViewerEvent::Wheel { delta_y: 250.0 });
        state.handle(ViewerEvent::Command(Command::ResetView));

        assert_eq!(state.scene.house.group.transform.rotation, Quaternion::one());
        assert_eq!(state.scene.camera.position, Vector3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn style_commands_reach_the_materials() {
        let mut state = state();
        state.handle(ViewerEvent::Command(Command::SetRoofColor(RoofColor::Green)));
        state.handle(ViewerEvent::Command(Command::SetWallColor(WallColor::Gray)));
        state.handle(ViewerEvent::Command(Command::ToggleWireframe));

        let scene = &state.scene;
        let roof = scene.material_manager.get_material(scene.house.roof_material()).unwrap();
        let walls = scene.material_manager.get_material(scene.house.walls_material()).unwrap();
        assert_eq!(roof.color, 0x44ff44);
        assert_eq!(walls.color, 0xb0b0b0);
        assert!(roof.wireframe && walls.wireframe);
    }

    #[test]
    fn children_keep_their_offsets_through_interaction() {
        let mut state = state();
        let before: Vec<_> = state.scene.house.group.shapes().map(|s| s.transform).collect();
        state.handle(ViewerEvent::PointerDown);
        state.handle(ViewerEvent::PointerMove { x: 35.0, y: -12.0 });
        state.handle(ViewerEvent::KeyDown("d".into()));
        let after: Vec<_> = state.scene.house.group.shapes().map(|s| s.transform).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut state = state();
        state.handle(ViewerEvent::Resize { width: 500, height: 1000 });
        assert!((state.scene.camera.aspect - 0.5).abs() < 1e-6);
        state.handle(ViewerEvent::Resize { width: 500, height: 0 });
        assert!((state.scene.camera.aspect - 0.5).abs() < 1e-6);
        state.handle(ViewerEvent::Resize { width: 0, height: 800 });
        assert!((state.scene.camera.aspect - 0.5).abs() < 1e-6);
        state.scene.update();
    }
}
