//! PLY format support
//!
//! The structure-from-motion step writes its sparse cloud as a small PLY
//! file (positions plus uchar vertex colors); meshes occasionally come
//! through as PLY too.

use crate::error::{IoError, Result};
use crate::{MeshReader, PointCloudReader};
use meshport_core::{Point3f, PointCloud, TriangleMesh, Vector3f};
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct PlyReader;

impl PointCloudReader for PlyReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<Point3f>> {
        let (cloud, _) = Self::read_colored_point_cloud(path)?;
        Ok(cloud)
    }
}

impl PlyReader {
    /// Read vertex positions plus per-vertex RGB colors when present
    ///
    /// Colors are `None` unless every vertex carries red/green/blue
    /// properties.
    pub fn read_colored_point_cloud<P: AsRef<Path>>(
        path: P,
    ) -> Result<(PointCloud<Point3f>, Option<Vec<[u8; 3]>>)> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut points = Vec::new();
        let mut colors = Vec::new();
        let mut has_colors = true;

        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;
                points.push(Point3f::new(x, y, z));

                if has_colors {
                    match (
                        extract_color_component(vertex, "red"),
                        extract_color_component(vertex, "green"),
                        extract_color_component(vertex, "blue"),
                    ) {
                        (Some(r), Some(g), Some(b)) => colors.push([r, g, b]),
                        _ => has_colors = false,
                    }
                }
            }
        }

        let colors = (has_colors && !colors.is_empty()).then_some(colors);
        Ok((PointCloud::from_points(points), colors))
    }
}

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;
                vertices.push(Point3f::new(x, y, z));
            }
        }

        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                let indices = extract_face_indices(face)?;
                if indices.len() >= 3 {
                    faces.push([indices[0], indices[1], indices[2]]);
                }
            }
        }

        // Vertex normals when every vertex carries them
        let normals = if let Some(vertex_element) = ply.payload.get("vertex") {
            let mut normals = Vec::new();
            let mut has_normals = true;

            for vertex in vertex_element {
                if let (Ok(nx), Ok(ny), Ok(nz)) = (
                    extract_property_value(vertex, "nx"),
                    extract_property_value(vertex, "ny"),
                    extract_property_value(vertex, "nz"),
                ) {
                    normals.push(Vector3f::new(nx, ny, nz));
                } else {
                    has_normals = false;
                    break;
                }
            }

            (has_normals && !normals.is_empty()).then_some(normals)
        } else {
            None
        };

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        if let Some(normals) = normals {
            mesh.set_normals(normals);
        }

        Ok(mesh)
    }
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        _ => Err(IoError::ParseError {
            message: format!("Property '{}' not found or invalid type", name),
        }),
    }
}

/// Extract a color component as u8, if present
fn extract_color_component(element: &DefaultElement, name: &str) -> Option<u8> {
    match element.get(name)? {
        Property::UChar(val) => Some(*val),
        Property::Int(val) => Some((*val).clamp(0, 255) as u8),
        Property::UInt(val) => Some((*val).min(255) as u8),
        _ => None,
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    match element
        .get("vertex_indices")
        .or_else(|| element.get("vertex_index"))
    {
        Some(Property::ListInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        _ => Err(IoError::ParseError {
            message: "Face indices not found".to_string(),
        }),
    }
}
