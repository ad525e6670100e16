//! # User Interface Module
//!
//! Dear ImGui overlay for the house viewer: the [`UiManager`] wires ImGui
//! into winit and wgpu, and [`house_control_panel`] draws the buttons that
//! map to [`Command`](crate::controls::Command)s.
//!
//! When the panel is hovered or focused it captures the mouse or keyboard
//! and the scene does not see those events.

pub mod manager;
pub mod panel;

pub use manager::{UiCapture, UiManager};
pub use panel::house_control_panel;
