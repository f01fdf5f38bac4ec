/// Object transforms and the model matrices built from them
use nalgebra::{Matrix4, Vector3};

/// Position, Euler rotation (degrees) and per-axis scale of an object.
///
/// The model matrix is rebuilt on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Degrees around X (pitch), Y (yaw) and Z (roll)
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    /// `T * Ry * Rx * Rz * S`: yaw, then pitch, then roll
    pub fn model_matrix(&self) -> Matrix4<f32> {
        translation_matrix(&self.position)
            * rotation_matrix(&self.rotation)
            * scale_matrix(&self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Rotation matrix from Euler angles in degrees, applied in Y, X, Z order
pub fn rotation_matrix(degrees: &Vector3<f32>) -> Matrix4<f32> {
    let rx = Matrix4::new_rotation(Vector3::new(degrees.x.to_radians(), 0.0, 0.0));
    let ry = Matrix4::new_rotation(Vector3::new(0.0, degrees.y.to_radians(), 0.0));
    let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, degrees.z.to_radians()));

    ry * rx * rz
}

pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(offset)
}

pub fn scale_matrix(scale: &Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_nonuniform_scaling(scale)
}
