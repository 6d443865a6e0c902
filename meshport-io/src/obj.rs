//! OBJ format support
//!
//! Dense and textured meshes come out of the photogrammetry pipeline as
//! Wavefront OBJ. Polygons are fan-triangulated; texture coordinates and
//! normals are remapped per vertex when present.

use crate::error::{IoError, Result};
use crate::MeshReader;
use meshport_core::{Point3f, TriangleMesh, Vector3f};
use std::path::Path;

pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let obj = obj::Obj::load(path.as_ref()).map_err(|e| IoError::ParseError {
            message: format!("OBJ read failed: {}", e),
        })?;
        let data = obj.data;

        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let mut faces = Vec::new();
        let mut uvs = vec![[0.0f32, 0.0f32]; vertices.len()];
        let mut normals = vec![Vector3f::new(0.0, 0.0, 1.0); vertices.len()];
        let mut has_uvs = false;
        let mut has_normals = false;

        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let indices: Vec<usize> = poly.0.iter().map(|tuple| tuple.0).collect();
                    if indices.len() < 3 {
                        continue;
                    }
                    // fan triangulation handles quads and n-gons
                    for i in 1..indices.len() - 1 {
                        faces.push([indices[0], indices[i], indices[i + 1]]);
                    }

                    for tuple in &poly.0 {
                        if let Some(uv_index) = tuple.1 {
                            if let Some(uv) = data.texture.get(uv_index) {
                                uvs[tuple.0] = *uv;
                                has_uvs = true;
                            }
                        }
                        if let Some(normal_index) = tuple.2 {
                            if let Some(normal) = data.normal.get(normal_index) {
                                normals[tuple.0] = Vector3f::new(normal[0], normal[1], normal[2]);
                                has_normals = true;
                            }
                        }
                    }
                }
            }
        }

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        if has_uvs {
            mesh.set_uvs(uvs);
        }
        if has_normals {
            mesh.set_normals(normals);
        }

        Ok(mesh)
    }
}
