//! Import report and warning taxonomy
//!
//! Recoverable problems never abort the import; they are logged and
//! collected here so callers can surface them after the fact.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline steps whose outputs the importer consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    StructureFromMotion,
    PrepareDenseScene,
    Meshing,
    Texturing,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::StructureFromMotion => "structure-from-motion",
            PipelineStep::PrepareDenseScene => "dense-scene preparation",
            PipelineStep::Meshing => "meshing",
            PipelineStep::Texturing => "texturing",
        };
        f.write_str(name)
    }
}

/// Which mesh artifact an import step targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Dense,
    Textured,
}

impl MeshKind {
    pub fn step(self) -> PipelineStep {
        match self {
            MeshKind::Dense => PipelineStep::Meshing,
            MeshKind::Textured => PipelineStep::Texturing,
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshKind::Dense => f.write_str("dense mesh"),
            MeshKind::Textured => f.write_str("textured mesh"),
        }
    }
}

/// Non-fatal problems encountered during an import
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    #[error("{0} node is missing from the project graph; step skipped")]
    MissingNode(PipelineStep),

    #[error("sparse cloud not found (reconstruction missing?): {}", .path.display())]
    SparseCloudMissing { path: PathBuf },

    #[error("sparse cloud has the wrong format: found {} instead of a .ply", .found.display())]
    SparseCloudWrongFormat { found: PathBuf },

    #[error("{kind} file is missing, step skipped: {}", .path.display())]
    MeshMissing { kind: MeshKind, path: PathBuf },

    #[error("background image for view {view_id} is missing: {}", .path.display())]
    ViewImageMissing { view_id: String, path: PathBuf },

    #[error("view {view_id} has no EXIF focal length metadata; view skipped")]
    ViewMissingFocal { view_id: String },

    #[error("view {view_id} references unknown pose {pose_id}; view skipped")]
    DanglingPose { view_id: String, pose_id: String },

    #[error("view {view_id} references unknown intrinsic {intrinsic_id}; view skipped")]
    DanglingIntrinsic { view_id: String, intrinsic_id: String },
}

/// Summary of what an import produced
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub cameras: usize,
    pub sparse_points: usize,
    pub meshes: usize,
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    /// Record a warning, logging it for interactive callers
    pub fn warn(&mut self, warning: ImportWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
