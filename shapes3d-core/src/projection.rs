/// Camera and projection utilities
///
/// All matrices follow the right-handed OpenGL convention: the camera looks
/// down -Z in view space and clip-space depth runs from -1 at the near plane
/// to +1 at the far plane.
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// World-to-view matrix.
///
/// The rows are the camera's right, up and backward basis vectors, each
/// paired with the translation `-dot(basis, eye)`.
pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
    let forward = (eye - target).normalize();
    let right = up.cross(&forward).normalize();
    let true_up = forward.cross(&right).normalize();
    let eye = eye.coords;

    #[rustfmt::skip]
    let view = Matrix4::new(
        right.x,   right.y,   right.z,   -right.dot(&eye),
        true_up.x, true_up.y, true_up.z, -true_up.dot(&eye),
        forward.x, forward.y, forward.z, -forward.dot(&eye),
        0.0,       0.0,       0.0,       1.0,
    );
    view
}

/// Perspective projection; `fov` is the vertical field of view in radians
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let focal = 1.0 / (fov / 2.0).tan();

    #[rustfmt::skip]
    let projection = Matrix4::new(
        focal / aspect, 0.0,   0.0,                         0.0,
        0.0,            focal, 0.0,                         0.0,
        0.0,            0.0,   (near + far) / (near - far), (2.0 * far * near) / (near - far),
        0.0,            0.0,   -1.0,                        0.0,
    );
    projection
}

/// Symmetric orthographic projection `height` units tall
pub fn orthographic(height: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let width = height * aspect;

    #[rustfmt::skip]
    let projection = Matrix4::new(
        2.0 / width, 0.0,          0.0,                0.0,
        0.0,         2.0 / height, 0.0,                0.0,
        0.0,         0.0,          -2.0 / (far - near), -(far + near) / (far - near),
        0.0,         0.0,          0.0,                1.0,
    );
    projection
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Height of the orthographic frustum
    pub ortho_height: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: 60.0,
            ortho_height: 6.0,
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        look_at(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                orthographic(self.ortho_height, self.aspect, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to screen space.
    ///
    /// `view_projection` is passed in so callers can build it once per frame.
    /// Returns `(x, y, depth)` with `y` growing downwards and depth in NDC
    /// (-1 near, +1 far), or `None` when the point is behind the camera or
    /// outside the depth range.
    pub fn project_to_screen(
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.fov, 60.0);
        assert_eq!(camera.ortho_height, 6.0);
    }

    #[test]
    fn test_look_at_places_origin_in_front() {
        let view = look_at(
            &Point3::new(0.0, 0.0, 5.0),
            &Point3::origin(),
            &Vector3::y(),
        );

        // Right-handed: things in front of the camera have negative view-space z
        let origin = view.transform_point(&Point3::origin());
        assert!((origin - Point3::new(0.0, 0.0, -5.0)).norm() < EPSILON);

        // The third row is the backward basis, so distance along forward is +5
        let forward_distance = -(view * Vector4::new(0.0, 0.0, 0.0, 1.0)).z;
        assert!((forward_distance - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Point3::new(3.0, 2.0, -4.0);
        let target = Point3::new(-1.0, 0.5, 2.0);
        let up = Vector3::y();

        let ours = look_at(&eye, &target, &up);
        let reference = Matrix4::look_at_rh(&eye, &target, &up);
        assert!((ours - reference).norm() < EPSILON);
    }

    #[test]
    fn test_perspective_depth_range() {
        let (near, far) = (0.1, 100.0);
        let projection = perspective(60.0_f32.to_radians(), 1.5, near, far);

        let near_centre = projection.transform_point(&Point3::new(0.0, 0.0, -near));
        let far_centre = projection.transform_point(&Point3::new(0.0, 0.0, -far));
        assert!((near_centre.z + 1.0).abs() < 1e-4);
        assert!((far_centre.z - 1.0).abs() < 1e-4);

        let reference = Matrix4::new_perspective(1.5, 60.0_f32.to_radians(), near, far);
        assert!((projection - reference).norm() < EPSILON);
    }

    #[test]
    fn test_perspective_inverse_round_trip() {
        let projection = perspective(45.0_f32.to_radians(), 16.0 / 9.0, 0.5, 50.0);
        let inverse = projection.try_inverse().expect("projection is invertible");

        let point = Point3::new(0.0, 0.0, -0.5);
        let clip = projection * point.to_homogeneous();
        let restored = inverse * clip;
        let restored = restored.xyz() / restored.w;
        assert!((restored - point.coords).norm() < 1e-4);

        let off_axis = Point3::new(0.1, -0.2, -3.0);
        let ndc = projection.transform_point(&off_axis);
        let back = inverse.transform_point(&ndc);
        assert!((back - off_axis).norm() < 1e-3);
    }

    #[test]
    fn test_orthographic_extents() {
        let projection = orthographic(6.0, 2.0, 0.1, 100.0);

        let top_right = projection.transform_point(&Point3::new(6.0, 3.0, -0.1));
        assert!((top_right.x - 1.0).abs() < EPSILON);
        assert!((top_right.y - 1.0).abs() < EPSILON);
        assert!((top_right.z + 1.0).abs() < EPSILON);

        let far = projection.transform_point(&Point3::new(0.0, 0.0, -100.0));
        assert!((far.z - 1.0).abs() < EPSILON);

        let reference = Matrix4::new_orthographic(-6.0, 6.0, -3.0, 3.0, 0.1, 100.0);
        assert!((projection - reference).norm() < EPSILON);
    }

    #[test]
    fn test_camera_modes() {
        let mut camera = Camera::new(800, 400);
        let perspective_matrix = camera.projection_matrix();
        camera.toggle_mode();
        assert_eq!(camera.mode, ProjectionMode::Orthographic);
        assert_eq!(
            camera.projection_matrix(),
            orthographic(6.0, 2.0, 0.1, 100.0)
        );
        camera.toggle_mode();
        assert_eq!(camera.projection_matrix(), perspective_matrix);
    }

    #[test]
    fn test_project_to_screen() {
        let camera = Camera::new(80, 40);
        let view_projection = camera.view_projection();

        let (x, y, depth) =
            Camera::project_to_screen(&view_projection, &Point3::origin(), 80, 40).unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);

        // Higher in the world means higher on screen
        let (_, above, _) =
            Camera::project_to_screen(&view_projection, &Point3::new(0.0, 1.0, 0.0), 80, 40)
                .unwrap();
        assert!(above < y);

        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(Camera::project_to_screen(&view_projection, &behind, 80, 40).is_none());
    }
}
