//! Structure-from-motion camera file parsing
//!
//! The SfM node writes a JSON document with three parallel tables: views
//! (one per photographed image), poses (rigid transforms keyed by pose
//! id), and intrinsics (sensor/lens parameters keyed by intrinsic id).
//! Meshroom encodes most numeric fields as JSON strings; the readers here
//! accept both encodings.

use crate::error::{IoError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Metadata key carrying the EXIF focal length in millimeters
pub const EXIF_FOCAL_KEY: &str = "Exif:FocalLength";

/// One photographed image
#[derive(Debug, Clone, Deserialize)]
pub struct View {
    #[serde(rename = "viewId")]
    pub view_id: String,
    #[serde(rename = "poseId")]
    pub pose_id: String,
    #[serde(rename = "intrinsicId")]
    pub intrinsic_id: String,
    pub path: String,
    #[serde(deserialize_with = "de_u32")]
    pub width: u32,
    #[serde(deserialize_with = "de_u32")]
    pub height: u32,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl View {
    /// EXIF focal length in millimeters, when the image carried one
    pub fn exif_focal_length(&self) -> Option<f64> {
        match self.metadata.get(EXIF_FOCAL_KEY)? {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// A camera pose: row-major 3x3 rotation plus world-space center
#[derive(Debug, Clone, Deserialize)]
pub struct PoseTransform {
    #[serde(deserialize_with = "de_f64_9")]
    pub rotation: [f64; 9],
    #[serde(deserialize_with = "de_f64_3")]
    pub center: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pose {
    pub transform: PoseTransform,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoseEntry {
    #[serde(rename = "poseId")]
    pub pose_id: String,
    pub pose: Pose,
}

/// Sensor/lens parameters, potentially shared across views
#[derive(Debug, Clone, Deserialize)]
pub struct Intrinsic {
    #[serde(rename = "intrinsicId")]
    pub intrinsic_id: String,
    #[serde(rename = "pxFocalLength", deserialize_with = "de_f64")]
    pub px_focal_length: f64,
    #[serde(rename = "principalPoint", deserialize_with = "de_f64_2")]
    pub principal_point: [f64; 2],
}

/// The parsed camera file
#[derive(Debug, Clone, Deserialize)]
pub struct SfmData {
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default)]
    pub intrinsics: Vec<Intrinsic>,
    #[serde(default)]
    pub poses: Vec<PoseEntry>,
}

impl SfmData {
    /// Parse a camera/pose JSON file; missing or malformed files are fatal
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| IoError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Pose transforms keyed by pose id
    pub fn poses_by_id(&self) -> HashMap<&str, &PoseTransform> {
        self.poses
            .iter()
            .map(|entry| (entry.pose_id.as_str(), &entry.pose.transform))
            .collect()
    }

    /// Intrinsics keyed by intrinsic id
    pub fn intrinsics_by_id(&self) -> HashMap<&str, &Intrinsic> {
        self.intrinsics
            .iter()
            .map(|intrinsic| (intrinsic.intrinsic_id.as_str(), intrinsic))
            .collect()
    }
}

/// A JSON number or its string encoding
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

impl NumOrStr {
    fn to_f64<E: serde::de::Error>(&self) -> std::result::Result<f64, E> {
        match self {
            NumOrStr::Num(n) => Ok(*n),
            NumOrStr::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid number {s:?}"))),
        }
    }
}

fn de_f64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    NumOrStr::deserialize(deserializer)?.to_f64()
}

fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = NumOrStr::deserialize(deserializer)?.to_f64::<D::Error>()?;
    Ok(value as u32)
}

fn de_f64_array<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> std::result::Result<[f64; N], D::Error> {
    let items = Vec::<NumOrStr>::deserialize(deserializer)?;
    if items.len() != N {
        return Err(serde::de::Error::invalid_length(
            items.len(),
            &"a fixed-size numeric array",
        ));
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(&items) {
        *slot = item.to_f64()?;
    }
    Ok(out)
}

fn de_f64_2<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<[f64; 2], D::Error> {
    de_f64_array::<D, 2>(d)
}

fn de_f64_3<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<[f64; 3], D::Error> {
    de_f64_array::<D, 3>(d)
}

fn de_f64_9<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<[f64; 9], D::Error> {
    de_f64_array::<D, 9>(d)
}
