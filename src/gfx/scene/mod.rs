//! # Scene Module
//!
//! The scene graph for the house viewer: a single [`Group`] of [`Shape`]s
//! with fixed local transforms, the camera looking at it and the materials
//! the shapes reference.
//!
//! ```
//! use house_viewer::gfx::scene::Scene;
//!
//! let scene = Scene::new(1200, 800);
//! assert_eq!(scene.house.group.len(), 6);
//! ```

pub mod group;
pub mod house;
pub mod mesh;
pub mod scene;
pub mod transform;
pub mod vertex;

pub use group::{Group, Shape, ShapeId};
pub use house::{build_house, House};
pub use mesh::{DrawMesh, Mesh};
pub use scene::Scene;
pub use transform::{EulerXyz, Transform};
pub use vertex::Vertex3D;
