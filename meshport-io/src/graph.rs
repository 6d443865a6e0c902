//! Meshroom project graph parsing and cache path resolution
//!
//! A `.mg` project file is a JSON document whose `graph` object maps node
//! names to processing-step records. Each record declares its node type,
//! unique ids, and output path templates. Resolving a template against
//! the project's cache directory yields the on-disk location of that
//! step's artifacts.

use crate::error::{IoError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Cache directory name, always a sibling of the project file
pub const CACHE_DIR_NAME: &str = "MeshroomCache";

/// Structure-from-motion node: camera poses and the sparse cloud
pub const SFM_NODE: &str = "StructureFromMotion_1";
/// Dense-scene preparation node: per-view undistorted images
pub const PREPARE_DENSE_NODE: &str = "PrepareDenseScene_1";
/// Meshing node: the dense mesh
pub const MESHING_NODE: &str = "Meshing_1";
/// Texturing node: the textured mesh
pub const TEXTURING_NODE: &str = "Texturing_1";

/// One processing step in the project graph
#[derive(Debug, Clone, Deserialize)]
pub struct GraphNode {
    #[serde(rename = "nodeType")]
    pub node_type: String,
    #[serde(default)]
    pub uids: HashMap<String, String>,
    #[serde(default)]
    pub outputs: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProjectFile {
    graph: HashMap<String, GraphNode>,
}

/// A parsed project graph together with its resolved cache root
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    nodes: HashMap<String, GraphNode>,
    cache_root: PathBuf,
}

/// Output paths resolved from the graph
///
/// Each entry is `None` when its producing node (or the node's uid or
/// output key) is absent from the graph; the corresponding import step is
/// then skipped. No existence checks happen here.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOutputs {
    pub cameras_sfm: Option<PathBuf>,
    pub sparse_cloud: Option<PathBuf>,
    pub undistorted_dir: Option<PathBuf>,
    pub dense_mesh: Option<PathBuf>,
    pub textured_mesh: Option<PathBuf>,
}

impl ProjectGraph {
    /// Parse a `.mg` project file
    ///
    /// Missing or malformed project files are fatal; everything resolved
    /// from the graph afterwards degrades per-node instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path)?;
        let project: ProjectFile =
            serde_json::from_str(&text).map_err(|source| IoError::Json {
                path: path.display().to_string(),
                source,
            })?;
        let cache_root = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(CACHE_DIR_NAME);
        Ok(Self {
            nodes: project.graph,
            cache_root,
        })
    }

    /// The `MeshroomCache` directory next to the project file
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Look up a node by name
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.get(name)
    }

    /// Resolve a named output template of a named node
    pub fn node_output(&self, node_name: &str, output_name: &str) -> Option<PathBuf> {
        let node = self.nodes.get(node_name)?;
        let template = node.outputs.get(output_name)?.as_str()?;
        self.expand_template(template, node)
    }

    /// Resolve the output paths the importer consumes
    pub fn resolve(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            cameras_sfm: self.node_output(SFM_NODE, "outputViewsAndPoses"),
            sparse_cloud: self.sparse_cloud_path(),
            undistorted_dir: self.node_output(PREPARE_DENSE_NODE, "output"),
            dense_mesh: self.node_output(MESHING_NODE, "output"),
            textured_mesh: self.node_output(TEXTURING_NODE, "outputMesh"),
        }
    }

    /// The sparse cloud sits at a fixed name under the SfM node's cache
    /// folder; it is not a declared output template.
    fn sparse_cloud_path(&self) -> Option<PathBuf> {
        let node = self.nodes.get(SFM_NODE)?;
        let uid0 = node.uids.get("0")?;
        Some(
            self.cache_root
                .join(&node.node_type)
                .join(uid0)
                .join("cloud_and_poses.ply"),
        )
    }

    fn expand_template(&self, template: &str, node: &GraphNode) -> Option<PathBuf> {
        let uid0 = node.uids.get("0")?;
        let expanded = template
            .replace("{cache}", &self.cache_root.to_string_lossy())
            .replace("{nodeType}", &node.node_type)
            .replace("{uid0}", uid0);
        Some(PathBuf::from(expanded))
    }
}
