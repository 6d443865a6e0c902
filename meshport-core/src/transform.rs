//! 3D transformation utilities

use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points and scene objects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation from a flattened row-major 3x3 matrix
    ///
    /// This is the encoding photogrammetry pose files use for camera
    /// orientation.
    pub fn from_rotation_rows(rows: [f32; 9]) -> Self {
        let rotation = Matrix3::new(
            rows[0], rows[1], rows[2], //
            rows[3], rows[4], rows[5], //
            rows[6], rows[7], rows[8],
        );
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// A 180-degree rotation about the local X axis
    ///
    /// Photogrammetry tools look down +Z while the scene convention looks
    /// down -Z; composing with this rotation reconciles the two.
    pub fn rot_x_180() -> Self {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI);
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Replace the translation part, keeping the rotation
    pub fn with_translation(mut self, translation: Vector3<f32>) -> Self {
        self.matrix[(0, 3)] = translation.x;
        self.matrix[(1, 3)] = translation.y;
        self.matrix[(2, 3)] = translation.z;
        self
    }

    /// Get the translation part
    pub fn translation_part(&self) -> Vector3<f32> {
        Vector3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}
