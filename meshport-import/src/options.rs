//! Import options

use meshport_core::ImageDepth;

/// What to import and how
///
/// Defaults mirror the import dialog: views, undistorted images, the
/// sparse cloud and the textured mesh are on; the dense mesh is off
/// because it is rarely useful once texturing ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Import views as cameras with background images
    pub views: bool,
    /// Prefer undistorted per-view images over the originals
    pub undistorted: bool,
    /// Composite background images in front of or behind geometry
    pub image_depth: ImageDepth,
    /// Import the sparse SfM point cloud
    pub sparse: bool,
    /// Import the dense mesh
    pub dense: bool,
    /// Import the textured mesh
    pub textured: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            views: true,
            undistorted: true,
            image_depth: ImageDepth::Front,
            sparse: true,
            dense: false,
            textured: true,
        }
    }
}
