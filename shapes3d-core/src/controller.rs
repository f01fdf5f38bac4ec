/// First-person fly camera driven by device-independent input
use nalgebra::{Point3, Vector3};

use crate::projection::{Camera, ProjectionMode};

const PITCH_LIMIT: f32 = 89.0;

/// One frame's worth of movement and look input.
///
/// Axis values are expected in `-1.0..=1.0`; look deltas are in input units
/// (pixels, key presses) and get scaled by the controller's sensitivity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub sprint: bool,
}

impl MoveInput {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    /// Degrees; -90 looks down -Z
    pub yaw: f32,
    /// Degrees, kept inside +/-89 so the view never flips
    pub pitch: f32,
    pub mouse_sensitivity: f32,
    /// World units per second
    pub move_speed: f32,
    pub sprint_move_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
            mouse_sensitivity: 0.2,
            move_speed: 5.0,
            sprint_move_speed: 20.0,
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit view direction for the current yaw and pitch
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();

        Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
    }

    /// Turn, then move the camera along its own axes for `dt` seconds
    pub fn apply(&mut self, camera: &mut Camera, input: &MoveInput, dt: f32) {
        self.yaw += input.yaw * self.mouse_sensitivity;
        self.pitch = (self.pitch + input.pitch * self.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let forward = self.forward();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward).normalize();

        let speed = if input.sprint {
            self.sprint_move_speed
        } else {
            self.move_speed
        };
        let motion = forward * input.forward + right * input.right + up * input.up;

        camera.position += motion * speed * dt;
        camera.target = camera.position + forward;
    }

    /// Put the camera back at its start pose; the viewport aspect is kept
    pub fn reset(&mut self, camera: &mut Camera) {
        camera.position = Point3::new(0.0, 0.0, 5.0);
        camera.target = Point3::origin();
        camera.up = Vector3::y();
        camera.fov = 60.0;
        camera.ortho_height = 6.0;
        camera.near = 0.1;
        camera.far = 100.0;
        camera.mode = ProjectionMode::Perspective;

        self.yaw = -90.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_looks_down_negative_z() {
        let controller = CameraController::new();
        assert!((controller.forward() - Vector3::new(0.0, 0.0, -1.0)).norm() < EPSILON);
    }

    #[test]
    fn test_move_forward_and_sprint() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let input = MoveInput {
            forward: 1.0,
            ..MoveInput::default()
        };

        controller.apply(&mut camera, &input, 0.5);
        assert!((camera.position - Point3::new(0.0, 0.0, 2.5)).norm() < EPSILON);
        assert!((camera.target - Point3::new(0.0, 0.0, 1.5)).norm() < EPSILON);

        let sprint = MoveInput {
            sprint: true,
            ..input
        };
        controller.apply(&mut camera, &sprint, 0.1);
        assert!((camera.position - Point3::new(0.0, 0.0, 0.5)).norm() < EPSILON);
    }

    #[test]
    fn test_strafe_and_rise() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let input = MoveInput {
            right: 1.0,
            up: 1.0,
            ..MoveInput::default()
        };

        controller.apply(&mut camera, &input, 1.0);
        assert!((camera.position - Point3::new(5.0, 5.0, 5.0)).norm() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let look_up = MoveInput {
            pitch: 10_000.0,
            ..MoveInput::default()
        };

        controller.apply(&mut camera, &look_up, 0.016);
        assert_eq!(controller.pitch, PITCH_LIMIT);
        assert!(controller.forward().y < 1.0);
        assert!(camera.target.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut controller = CameraController::new();
        let mut camera = Camera::new(100, 50);
        camera.toggle_mode();
        controller.apply(
            &mut camera,
            &MoveInput {
                forward: 1.0,
                yaw: 45.0,
                ..MoveInput::default()
            },
            1.0,
        );

        controller.reset(&mut camera);
        assert_eq!(camera, Camera::new(100, 50));
        assert_eq!(controller, CameraController::new());
        assert_eq!(controller.yaw, -90.0);

        // The first step after a reset heads toward the origin, not off along +X
        controller.apply(
            &mut camera,
            &MoveInput {
                forward: 1.0,
                ..MoveInput::default()
            },
            0.2,
        );
        assert!((camera.position - Point3::new(0.0, 0.0, 4.0)).norm() < EPSILON);
    }
}
