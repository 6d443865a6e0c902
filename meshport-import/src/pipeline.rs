//! The import pipeline
//!
//! An [`Importer`] is an explicit value: construct it with options, feed
//! it a project file and a scene, read the report. There is no ambient
//! registration state; an optional point-cloud renderer collaborator can
//! be injected for hosts that display sparse clouds outside the scene
//! graph.

use crate::cameras;
use crate::error::Result;
use crate::meshes;
use crate::options::ImportOptions;
use crate::report::{ImportReport, ImportWarning, MeshKind, PipelineStep};
use crate::sparse;
use log::info;
use meshport_core::{Collection, Point3f, PointCloud, Scene};
use meshport_io::ProjectGraph;
use std::path::Path;

/// Collaborator that draws point clouds instead of placing them in the scene
pub trait PointCloudRenderer {
    fn render_cloud(&mut self, name: &str, points: &PointCloud<Point3f>, colors: Option<&[[u8; 3]]>);
}

/// Imports a Meshroom project into a [`Scene`]
pub struct Importer {
    options: ImportOptions,
    cloud_renderer: Option<Box<dyn PointCloudRenderer>>,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            cloud_renderer: None,
        }
    }

    /// Inject a point-cloud renderer; without one, sparse clouds become
    /// scene objects
    pub fn with_point_cloud_renderer(mut self, renderer: Box<dyn PointCloudRenderer>) -> Self {
        self.cloud_renderer = Some(renderer);
        self
    }

    /// Run the import, appending one collection to the scene
    ///
    /// Fatal errors come from the two mandatory inputs (project graph and
    /// SfM camera file); every other problem lands in the report as a
    /// warning. Already-created scene objects are not rolled back on
    /// failure.
    pub fn import<P: AsRef<Path>>(&mut self, project_path: P, scene: &mut Scene) -> Result<ImportReport> {
        let project_path = project_path.as_ref();
        info!("importing Meshroom project {}", project_path.display());

        let graph = ProjectGraph::load(project_path)?;
        let outputs = graph.resolve();
        let mut report = ImportReport::default();

        let collection_name = project_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("meshroom")
            .to_string();
        let mut container = Collection::new(collection_name);

        if self.options.views {
            let mut views = Collection::new("Views");
            match &outputs.cameras_sfm {
                Some(sfm_path) => cameras::import_cameras(
                    sfm_path,
                    outputs.undistorted_dir.as_deref(),
                    &self.options,
                    &mut views,
                    &mut scene.render,
                    &mut report,
                )?,
                None => report.warn(ImportWarning::MissingNode(PipelineStep::StructureFromMotion)),
            }
            container.children.push(views);
        }

        if self.options.sparse {
            sparse::import_sparse(
                outputs.sparse_cloud.as_deref(),
                &mut container,
                self.cloud_renderer.as_deref_mut(),
                &mut report,
            )?;
        }

        if self.options.dense {
            meshes::import_mesh(
                outputs.dense_mesh.as_deref(),
                MeshKind::Dense,
                &mut container,
                &mut report,
            )?;
        }

        if self.options.textured {
            meshes::import_mesh(
                outputs.textured_mesh.as_deref(),
                MeshKind::Textured,
                &mut container,
                &mut report,
            )?;
        }

        scene.collections.push(container);

        info!(
            "imported {} cameras, {} meshes, {} sparse points ({} warnings)",
            report.cameras,
            report.meshes,
            report.sparse_points,
            report.warnings.len()
        );
        Ok(report)
    }
}
