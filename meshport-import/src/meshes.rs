//! Dense and textured mesh import

use crate::error::Result;
use crate::report::{ImportReport, ImportWarning, MeshKind};
use meshport_core::{Collection, MeshObject, SceneObject, Transform3D};
use std::path::Path;

pub(crate) fn import_mesh(
    mesh_path: Option<&Path>,
    kind: MeshKind,
    collection: &mut Collection,
    report: &mut ImportReport,
) -> Result<()> {
    let Some(path) = mesh_path else {
        report.warn(ImportWarning::MissingNode(kind.step()));
        return Ok(());
    };

    if !path.is_file() {
        report.warn(ImportWarning::MeshMissing {
            kind,
            path: path.to_path_buf(),
        });
        return Ok(());
    }

    let mesh = meshport_io::read_mesh(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| kind.to_string());

    // pipeline meshes are already in the scene frame; force identity placement
    collection.add_object(SceneObject::Mesh(MeshObject {
        name,
        mesh,
        transform: Transform3D::identity(),
    }));
    report.meshes += 1;

    Ok(())
}
