//! # Graphics Module
//!
//! Everything between the viewer state and the GPU:
//!
//! - **Camera** ([`camera`]) - Perspective camera looking down -Z
//! - **Geometry** ([`geometry`]) - Procedural box, cone and plane meshes
//! - **Scene** ([`scene`]) - The house group, transforms and meshes
//! - **Resources** ([`resources`]) - Materials, lights and render targets
//! - **Rendering** ([`rendering`]) - Surface, pipelines and the frame

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::PerspectiveCamera;
pub use rendering::render_engine::RenderEngine;
