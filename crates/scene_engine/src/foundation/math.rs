//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene graph. All
//! transforms compose translate ∘ rotate ∘ scale so the three channels can
//! be mutated independently.

pub use nalgebra::{
    Matrix3, Matrix4,
    Quaternion,
    Unit,
    Vector2, Vector3, Vector4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local transform: position, rotation, and scale as independent channels
///
/// Deliberately not stored as a single matrix so that writing one channel
/// never disturbs the others. [`Transform::to_matrix`] composes the
/// channels in the fixed T·R·S order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in the parent's space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Compose the channels into a transformation matrix (T·R·S order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }

    /// Apply this transform to a direction vector (no translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.to_matrix().transform_vector(&vector)
    }
}

/// Extract the translation column of a transformation matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}
