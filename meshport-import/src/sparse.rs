//! Sparse point cloud import

use crate::error::Result;
use crate::pipeline::PointCloudRenderer;
use crate::report::{ImportReport, ImportWarning, PipelineStep};
use meshport_core::{Collection, PointCloudObject, SceneObject, Transform3D};
use meshport_io::ply::PlyReader;
use std::path::Path;

/// Object name the sparse reconstruction imports under
pub const SPARSE_CLOUD_NAME: &str = "sparse cloud SFM";

pub(crate) fn import_sparse(
    cloud_path: Option<&Path>,
    collection: &mut Collection,
    renderer: Option<&mut (dyn PointCloudRenderer + 'static)>,
    report: &mut ImportReport,
) -> Result<()> {
    let Some(path) = cloud_path else {
        report.warn(ImportWarning::MissingNode(PipelineStep::StructureFromMotion));
        return Ok(());
    };

    if !path.is_file() {
        // Newer pipeline versions write an Alembic archive in place of the
        // expected PLY; tell those apart from a reconstruction that never ran.
        let alembic = path.with_extension("abc");
        if alembic.is_file() {
            report.warn(ImportWarning::SparseCloudWrongFormat { found: alembic });
        } else {
            report.warn(ImportWarning::SparseCloudMissing {
                path: path.to_path_buf(),
            });
        }
        return Ok(());
    }

    let (points, colors) = PlyReader::read_colored_point_cloud(path)?;
    report.sparse_points = points.len();

    match renderer {
        Some(renderer) => renderer.render_cloud(SPARSE_CLOUD_NAME, &points, colors.as_deref()),
        None => collection.add_object(SceneObject::PointCloud(PointCloudObject {
            name: SPARSE_CLOUD_NAME.to_string(),
            points,
            colors,
            transform: Transform3D::identity(),
        })),
    }

    Ok(())
}
