//! Scene and collection containers
//!
//! A `Scene` stands in for the host application's scene graph: named
//! collections of objects plus global render settings. Imports project
//! photogrammetry data into these containers; nothing here touches the
//! filesystem.

use crate::camera::SceneCamera;
use crate::mesh::TriangleMesh;
use crate::point::Point3f;
use crate::point_cloud::PointCloud;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// Global render settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
        }
    }
}

/// A point cloud placed in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudObject {
    pub name: String,
    pub points: PointCloud<Point3f>,
    pub colors: Option<Vec<[u8; 3]>>,
    pub transform: Transform3D,
}

/// A mesh placed in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshObject {
    pub name: String,
    pub mesh: TriangleMesh,
    pub transform: Transform3D,
}

/// Any object a collection can hold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneObject {
    Camera(SceneCamera),
    PointCloud(PointCloudObject),
    Mesh(MeshObject),
}

impl SceneObject {
    pub fn name(&self) -> &str {
        match self {
            SceneObject::Camera(camera) => &camera.name,
            SceneObject::PointCloud(cloud) => &cloud.name,
            SceneObject::Mesh(mesh) => &mesh.name,
        }
    }
}

/// A named group of objects with optional child collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub objects: Vec<SceneObject>,
    pub children: Vec<Collection>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a child collection and return a mutable reference to it
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut Collection {
        self.children.push(Collection::new(name));
        self.children.last_mut().unwrap()
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Total object count, including child collections
    pub fn object_count(&self) -> usize {
        self.objects.len() + self.children.iter().map(Collection::object_count).sum::<usize>()
    }
}

/// The host-neutral scene graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub collections: Vec<Collection>,
    pub render: RenderSettings,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level collection and return a mutable reference to it
    pub fn add_collection(&mut self, name: impl Into<String>) -> &mut Collection {
        self.collections.push(Collection::new(name));
        self.collections.last_mut().unwrap()
    }

    /// All cameras in the scene, in collection order
    pub fn cameras(&self) -> Vec<&SceneCamera> {
        fn collect<'a>(collection: &'a Collection, out: &mut Vec<&'a SceneCamera>) {
            for object in &collection.objects {
                if let SceneObject::Camera(camera) = object {
                    out.push(camera);
                }
            }
            for child in &collection.children {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        for collection in &self.collections {
            collect(collection, &mut out);
        }
        out
    }

    /// Mutable access to all cameras in the scene
    pub fn cameras_mut(&mut self) -> Vec<&mut SceneCamera> {
        fn collect<'a>(collection: &'a mut Collection, out: &mut Vec<&'a mut SceneCamera>) {
            for object in &mut collection.objects {
                if let SceneObject::Camera(camera) = object {
                    out.push(camera);
                }
            }
            for child in &mut collection.children {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        for collection in &mut self.collections {
            collect(collection, &mut out);
        }
        out
    }

    /// All mesh objects in the scene
    pub fn meshes(&self) -> Vec<&MeshObject> {
        fn collect<'a>(collection: &'a Collection, out: &mut Vec<&'a MeshObject>) {
            for object in &collection.objects {
                if let SceneObject::Mesh(mesh) = object {
                    out.push(mesh);
                }
            }
            for child in &collection.children {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        for collection in &self.collections {
            collect(collection, &mut out);
        }
        out
    }

    /// All point cloud objects in the scene
    pub fn point_clouds(&self) -> Vec<&PointCloudObject> {
        fn collect<'a>(collection: &'a Collection, out: &mut Vec<&'a PointCloudObject>) {
            for object in &collection.objects {
                if let SceneObject::PointCloud(cloud) = object {
                    out.push(cloud);
                }
            }
            for child in &collection.children {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        for collection in &self.collections {
            collect(collection, &mut out);
        }
        out
    }

    /// Total object count across all collections
    pub fn object_count(&self) -> usize {
        self.collections.iter().map(Collection::object_count).sum()
    }
}
