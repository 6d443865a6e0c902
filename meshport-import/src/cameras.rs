//! Per-view camera mapping
//!
//! Each SfM view becomes one scene camera. The sensor width is taken from
//! the image's EXIF focal length, the lens focal length derives from the
//! pixel focal length, and the principal point turns into normalized lens
//! shifts. The pose rotation needs a 180-degree flip about local X to
//! match the scene's camera axis convention.

use crate::error::Result;
use crate::options::ImportOptions;
use crate::report::{ImportReport, ImportWarning};
use meshport_core::{
    BackgroundImage, Collection, RenderSettings, SceneCamera, SceneObject, Transform3D, Vector3f,
};
use meshport_io::{SfmData, View};
use std::path::{Path, PathBuf};

/// Lens focal length in millimeters
///
/// `px_focal_length` is in pixels relative to the larger image dimension;
/// scaling by the sensor width converts to millimeters.
pub fn lens_mm(px_focal_length: f64, width: u32, height: u32, sensor_width_mm: f64) -> f64 {
    let max_dimension = width.max(height) as f64;
    (px_focal_length / max_dimension) * sensor_width_mm
}

/// Normalized lens shift of the principal point from the image center
pub fn principal_shift(principal_point: f64, dimension: u32) -> f64 {
    let dimension = dimension as f64;
    (principal_point - dimension / 2.0) / dimension
}

/// World transform for a camera pose
///
/// Row-major rotation composed with the 180-degree X flip, placed at the
/// pose center.
pub fn camera_pose(rotation: &[f64; 9], center: &[f64; 3]) -> Transform3D {
    let mut rows = [0.0f32; 9];
    for (slot, value) in rows.iter_mut().zip(rotation) {
        *slot = *value as f32;
    }
    (Transform3D::from_rotation_rows(rows) * Transform3D::rot_x_180()).with_translation(
        Vector3f::new(center[0] as f32, center[1] as f32, center[2] as f32),
    )
}

fn background_image_path(
    view: &View,
    undistorted_dir: Option<&Path>,
    prefer_undistorted: bool,
) -> PathBuf {
    match undistorted_dir {
        Some(dir) if prefer_undistorted => dir.join(format!("{}.exr", view.view_id)),
        _ => PathBuf::from(&view.path),
    }
}

pub(crate) fn import_cameras(
    sfm_path: &Path,
    undistorted_dir: Option<&Path>,
    options: &ImportOptions,
    collection: &mut Collection,
    render: &mut RenderSettings,
    report: &mut ImportReport,
) -> Result<()> {
    let sfm = SfmData::from_file(sfm_path)?;
    let poses = sfm.poses_by_id();
    let intrinsics = sfm.intrinsics_by_id();

    // render resolution follows the first view, not each view
    if let Some(first) = sfm.views.first() {
        *render = RenderSettings {
            resolution_x: first.width,
            resolution_y: first.height,
        };
    }

    for view in &sfm.views {
        let Some(pose) = poses.get(view.pose_id.as_str()).copied() else {
            report.warn(ImportWarning::DanglingPose {
                view_id: view.view_id.clone(),
                pose_id: view.pose_id.clone(),
            });
            continue;
        };
        let Some(intrinsic) = intrinsics.get(view.intrinsic_id.as_str()).copied() else {
            report.warn(ImportWarning::DanglingIntrinsic {
                view_id: view.view_id.clone(),
                intrinsic_id: view.intrinsic_id.clone(),
            });
            continue;
        };
        let Some(sensor_width) = view.exif_focal_length() else {
            report.warn(ImportWarning::ViewMissingFocal {
                view_id: view.view_id.clone(),
            });
            continue;
        };

        let image_path = background_image_path(view, undistorted_dir, options.undistorted);
        if !image_path.is_file() {
            report.warn(ImportWarning::ViewImageMissing {
                view_id: view.view_id.clone(),
                path: image_path.clone(),
            });
        }

        let camera = SceneCamera {
            name: format!("View {}", view.view_id),
            sensor_width: sensor_width as f32,
            lens: lens_mm(intrinsic.px_focal_length, view.width, view.height, sensor_width) as f32,
            shift_x: principal_shift(intrinsic.principal_point[0], view.width) as f32,
            shift_y: principal_shift(intrinsic.principal_point[1], view.height) as f32,
            display_size: 0.25,
            background: Some(BackgroundImage {
                path: image_path,
                depth: options.image_depth,
            }),
            transform: camera_pose(&pose.rotation, &pose.center),
        };
        collection.add_object(SceneObject::Camera(camera));
        report.cameras += 1;
    }

    Ok(())
}
