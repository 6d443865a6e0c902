//! Focal-length propagation across view cameras
//!
//! After manually tuning one camera, its focal, shift and sensor
//! parameters can be copied to every other imported view camera.

use crate::error::{ImportError, Result};
use meshport_core::Scene;

/// Name prefix of cameras created by the view importer
pub const VIEW_CAMERA_PREFIX: &str = "View ";

/// Copy lens parameters from a source camera to all view cameras
///
/// Returns the number of cameras updated. Cameras whose names do not
/// start with [`VIEW_CAMERA_PREFIX`] are left untouched.
pub fn propagate_focal(scene: &mut Scene, source_name: &str) -> Result<usize> {
    let source = scene
        .cameras()
        .into_iter()
        .find(|camera| camera.name == source_name)
        .ok_or_else(|| ImportError::CameraNotFound {
            name: source_name.to_string(),
        })?;
    let (lens, shift_x, shift_y, sensor_width) =
        (source.lens, source.shift_x, source.shift_y, source.sensor_width);

    let mut updated = 0;
    for camera in scene.cameras_mut() {
        if camera.name.starts_with(VIEW_CAMERA_PREFIX) {
            camera.lens = lens;
            camera.shift_x = shift_x;
            camera.shift_y = shift_y;
            camera.sensor_width = sensor_width;
            updated += 1;
        }
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshport_core::{SceneCamera, SceneObject};

    fn camera(name: &str, lens: f32) -> SceneObject {
        let mut camera = SceneCamera::new(name);
        camera.lens = lens;
        SceneObject::Camera(camera)
    }

    #[test]
    fn copies_parameters_to_prefixed_cameras_only() {
        let mut scene = Scene::new();
        let collection = scene.add_collection("project");
        collection.add_object(camera("View 1001", 27.0));
        collection.add_object(camera("View 1002", 31.0));
        collection.add_object(camera("Hero", 85.0));

        let updated = propagate_focal(&mut scene, "View 1001").unwrap();
        assert_eq!(updated, 2);

        let cameras = scene.cameras();
        assert_eq!(cameras[1].lens, 27.0);
        assert_eq!(cameras[2].lens, 85.0);
    }

    #[test]
    fn unknown_source_is_an_error() {
        let mut scene = Scene::new();
        assert!(matches!(
            propagate_focal(&mut scene, "View 9").unwrap_err(),
            ImportError::CameraNotFound { .. }
        ));
    }
}
