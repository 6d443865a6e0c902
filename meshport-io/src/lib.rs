//! Readers for Meshroom project outputs
//!
//! This crate parses the two JSON inputs of an import — the project graph
//! and the SfM camera file — and loads the geometry the resolved cache
//! paths point at (PLY point clouds and PLY/OBJ meshes).

pub mod error;
pub mod graph;
pub mod sfm;
pub mod ply;
pub mod obj;

pub use error::*;
pub use graph::{GraphNode, ProjectGraph, ResolvedOutputs};
pub use sfm::{Intrinsic, PoseTransform, SfmData, View};

use meshport_core::{Point3f, PointCloud, TriangleMesh};

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud<Point3f>>;
}

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh>;
}

/// Auto-detect format and read a point cloud
pub fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<PointCloud<Point3f>> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("ply") => ply::PlyReader::read_point_cloud(path),
        other => Err(IoError::InvalidFormat {
            format: format!("unsupported point cloud format: {:?}", other),
        }),
    }
}

/// Auto-detect format and read a mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => obj::ObjReader::read_mesh(path),
        Some("ply") => ply::PlyReader::read_mesh(path),
        other => Err(IoError::InvalidFormat {
            format: format!("unsupported mesh format: {:?}", other),
        }),
    }
}
