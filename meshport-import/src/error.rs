//! Error types for the import pipeline

use thiserror::Error;

/// Errors that abort an import or scene edit
///
/// Everything recoverable surfaces as an [`crate::ImportWarning`] in the
/// report instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("read error: {0}")]
    Read(#[from] meshport_io::IoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("camera not found in scene: {name}")]
    CameraNotFound { name: String },
}

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
