/// shapes3d core library - procedural meshes and camera math
///
/// This library provides the stateless core of the renderer: primitive mesh
/// generation, transformation and projection matrices, a fly-camera
/// controller, and the light/material data the shading code consumes.

pub mod controller;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod procgen;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use controller::{CameraController, MoveInput};
pub use error::MeshError;
pub use geometry::{face_normal, MeshData, Vertex, VERTEX_STRIDE};
pub use lighting::{Light, LightRig, Material, MAX_LIGHTS};
pub use procgen::{create_cube, create_cylinder, create_plane, create_sphere};
pub use projection::{look_at, orthographic, perspective, Camera, ProjectionMode};
pub use transform::Transform;
