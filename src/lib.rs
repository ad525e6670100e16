//! House Viewer
//!
//! An interactive 3D house on wgpu and winit: drag to rotate the house,
//! keys and wheel to move the camera, and an ImGui panel to recolor the
//! roof and walls or switch them to wireframe.

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

pub use app::HouseApp;
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};

/// Opens the viewer window and blocks until it closes
pub fn run(config: ViewerConfig) -> Result<()> {
    HouseApp::new(config)?.run()
}
