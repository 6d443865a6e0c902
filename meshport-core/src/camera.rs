//! Scene camera entities

use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a camera background image composites relative to scene geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageDepth {
    /// Semi-transparent preview in front of the objects
    #[default]
    Front,
    /// Image behind the objects
    Back,
}

/// A background image attached to a camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub path: PathBuf,
    pub depth: ImageDepth,
}

/// A camera entity with physical lens parameters
///
/// Lens and sensor width are in millimeters; shifts are the normalized
/// principal-point offsets from the image center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCamera {
    pub name: String,
    pub sensor_width: f32,
    pub lens: f32,
    pub shift_x: f32,
    pub shift_y: f32,
    pub display_size: f32,
    pub background: Option<BackgroundImage>,
    pub transform: Transform3D,
}

impl SceneCamera {
    /// Create a camera with default display parameters and no background
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sensor_width: 36.0,
            lens: 50.0,
            shift_x: 0.0,
            shift_y: 0.0,
            display_size: 0.25,
            background: None,
            transform: Transform3D::identity(),
        }
    }
}
