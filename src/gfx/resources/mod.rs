//! GPU resource management
//!
//! Uniform bindings, materials and render target textures.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig};
pub use material::{Material, MaterialId, MaterialManager, Side};
pub use texture_resource::TextureResource;
