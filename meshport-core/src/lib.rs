//! Core data structures for meshport
//!
//! This crate provides the host-neutral scene model a Meshroom import is
//! projected into: points, point clouds, triangle meshes, transforms,
//! cameras, and the scene/collection containers that hold them.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod transform;
pub mod camera;
pub mod scene;
pub mod traits;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use transform::*;
pub use camera::*;
pub use scene::*;
pub use traits::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
