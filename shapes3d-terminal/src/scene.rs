/// Everything the render loop owns between frames
use log::{debug, info};
use nalgebra::Vector3;
use shapes3d_core::{
    create_cube, create_cylinder, create_plane, create_sphere, Camera, CameraController,
    LightRig, Material, MeshData, ProjectionMode, Transform, MAX_LIGHTS,
};

use crate::error::{AppError, AppResult};
use crate::input::{Command, MaterialField};

/// Seconds of motion produced by one movement key press
pub const KEY_STEP_SECONDS: f32 = 0.1;

const FOV_STEP: f32 = 5.0;
const ORTHO_STEP: f32 = 0.5;
const COEFFICIENT_STEP: f32 = 0.05;
const SHININESS_STEP: f32 = 2.0;
const LIGHT_STEP: f32 = 0.25;
const NEAR_STEP: f32 = 0.05;
const MIN_NEAR: f32 = 0.01;
const FAR_STEP: f32 = 10.0;
const MAX_FAR: f32 = 1000.0;
const SPEED_STEP: f32 = 1.0;
const MIN_SPEED: f32 = 0.5;

/// Colours `v` steps a light through
pub const LIGHT_PALETTE: [[f32; 3]; 7] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Colours `b` steps the background through
pub const BACKGROUND_PALETTE: [[f32; 3]; 4] = [
    [0.1, 0.1, 0.1],
    [0.0, 0.0, 0.0],
    [0.3, 0.3, 0.3],
    [0.05, 0.05, 0.2],
];

/// Next palette entry after `current`; the first one when `current` is not listed
fn next_in_palette(palette: &[[f32; 3]], current: &Vector3<f32>) -> Vector3<f32> {
    let next = palette
        .iter()
        .position(|color| Vector3::from(*color) == *current)
        .map_or(0, |index| (index + 1) % palette.len());
    Vector3::from(palette[next])
}

/// Startup parameters for the demo scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub sphere_segments: u32,
    pub cylinder_segments: u32,
    pub plane_subdivisions: u32,
    pub active_lights: usize,
    pub orthographic: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 64,
            cylinder_segments: 32,
            plane_subdivisions: 10,
            active_lights: MAX_LIGHTS,
            orthographic: false,
        }
    }
}

/// A lit mesh placed in the world
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshData,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(name: &'static str, mesh: MeshData, transform: Transform) -> AppResult<Self> {
        mesh.validate()
            .map_err(|source| AppError::Mesh { name, source })?;
        debug!(
            "{name}: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(Self {
            name,
            mesh,
            transform,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub controller: CameraController,
    pub lights: LightRig,
    pub material: Material,
    pub background: Vector3<f32>,
    pub objects: Vec<SceneObject>,
    /// Unlit sphere drawn at every active light
    pub light_marker: MeshData,
    /// Slot edited by the light commands, active or not
    pub selected_light: usize,
}

impl SceneState {
    /// Build the demo scene: cube, sphere and cylinder above a floor plane
    pub fn new(config: &SceneConfig, width: u32, height: u32) -> AppResult<Self> {
        let objects = vec![
            SceneObject::new("cube", create_cube(1.0), Transform::new())?,
            SceneObject::new(
                "plane",
                create_plane(5.0, 5.0, config.plane_subdivisions),
                Transform::from_position(-2.5, -1.0, 2.5),
            )?,
            SceneObject::new(
                "sphere",
                create_sphere(0.5, config.sphere_segments),
                Transform::from_position(-1.5, 0.0, 0.0),
            )?,
            SceneObject::new(
                "cylinder",
                create_cylinder(0.5, 1.0, config.cylinder_segments),
                Transform::from_position(1.5, 0.0, 0.0),
            )?,
        ];

        let mut camera = Camera::new(width, height);
        if config.orthographic {
            camera.mode = ProjectionMode::Orthographic;
        }

        let mut lights = LightRig::default();
        lights.set_active(config.active_lights);

        info!(
            "scene ready: {} objects, {} of {} lights active",
            objects.len(),
            lights.active(),
            MAX_LIGHTS
        );

        Ok(Self {
            camera,
            controller: CameraController::new(),
            lights,
            material: Material::default(),
            background: Vector3::from(BACKGROUND_PALETTE[0]),
            objects,
            light_marker: create_sphere(0.25, 16),
            selected_light: 0,
        })
    }

    /// Apply one command; returns `false` when the app should stop
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Move(input) => {
                if !input.is_idle() {
                    self.controller
                        .apply(&mut self.camera, &input, KEY_STEP_SECONDS);
                }
            }
            Command::ToggleProjection => self.camera.toggle_mode(),
            Command::Lights(delta) => {
                let active = (self.lights.active() as i32 + delta).max(0) as usize;
                self.lights.set_active(active.min(MAX_LIGHTS));
            }
            Command::Zoom(direction) => match self.camera.mode {
                ProjectionMode::Perspective => {
                    self.camera.fov = (self.camera.fov + direction * FOV_STEP).clamp(5.0, 175.0);
                }
                ProjectionMode::Orthographic => {
                    self.camera.ortho_height =
                        (self.camera.ortho_height + direction * ORTHO_STEP).max(ORTHO_STEP);
                }
            },
            Command::Material(field, direction) => {
                let material = &mut self.material;
                match field {
                    MaterialField::Ambient => material.ambient_k += direction * COEFFICIENT_STEP,
                    MaterialField::Diffuse => material.diffuse_k += direction * COEFFICIENT_STEP,
                    MaterialField::Specular => {
                        material.specular_k += direction * COEFFICIENT_STEP
                    }
                    MaterialField::Shininess => material.shininess += direction * SHININESS_STEP,
                }
                *material = material.clamped();
            }
            Command::SelectLight => {
                self.selected_light = (self.selected_light + 1) % MAX_LIGHTS;
            }
            Command::MoveLight(steps) => {
                if let Some(light) = self.lights.light_mut(self.selected_light) {
                    light.position += steps * LIGHT_STEP;
                }
            }
            Command::CycleLightColor => {
                if let Some(light) = self.lights.light_mut(self.selected_light) {
                    light.color = next_in_palette(&LIGHT_PALETTE, &light.color);
                }
            }
            Command::CycleBackground => {
                self.background = next_in_palette(&BACKGROUND_PALETTE, &self.background);
            }
            Command::NearPlane(direction) => {
                let camera = &mut self.camera;
                let limit = (camera.far - NEAR_STEP).max(MIN_NEAR);
                camera.near = (camera.near + direction * NEAR_STEP).clamp(MIN_NEAR, limit);
            }
            Command::FarPlane(direction) => {
                let camera = &mut self.camera;
                let limit = (camera.near + NEAR_STEP).min(MAX_FAR);
                camera.far = (camera.far + direction * FAR_STEP).clamp(limit, MAX_FAR);
            }
            Command::MoveSpeed(direction) => {
                let controller = &mut self.controller;
                controller.move_speed =
                    (controller.move_speed + direction * SPEED_STEP).max(MIN_SPEED);
            }
            Command::SprintSpeed(direction) => {
                let controller = &mut self.controller;
                controller.sprint_move_speed =
                    (controller.sprint_move_speed + direction * SPEED_STEP).max(MIN_SPEED);
            }
            Command::ResetCamera => {
                self.controller.reset(&mut self.camera);
                info!("camera reset");
            }
            Command::Quit => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use shapes3d_core::MoveInput;

    fn scene() -> SceneState {
        SceneState::new(&SceneConfig::default(), 80, 24).unwrap()
    }

    #[test]
    fn test_scene_contents() {
        let scene = scene();
        let names: Vec<_> = scene.objects.iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["cube", "plane", "sphere", "cylinder"]);
        assert_eq!(scene.lights.active(), MAX_LIGHTS);
        assert_eq!(scene.camera.mode, ProjectionMode::Perspective);
        assert_eq!(scene.light_marker.vertex_count(), 17 * 17);
    }

    #[test]
    fn test_config_is_honoured() {
        let config = SceneConfig {
            sphere_segments: 8,
            cylinder_segments: 1,
            plane_subdivisions: 0,
            active_lights: 9,
            orthographic: true,
        };
        let scene = SceneState::new(&config, 80, 24).unwrap();

        assert_eq!(scene.camera.mode, ProjectionMode::Orthographic);
        assert_eq!(scene.lights.active(), MAX_LIGHTS);
        assert_eq!(scene.objects[1].mesh.vertex_count(), 4);
        assert_eq!(scene.objects[2].mesh.vertex_count(), 81);
        assert_eq!(scene.objects[3].mesh, create_cylinder(0.5, 1.0, 3));
    }

    #[test]
    fn test_light_count_stays_in_range() {
        let mut scene = scene();
        assert!(scene.apply(Command::Lights(1)));
        assert_eq!(scene.lights.active(), MAX_LIGHTS);

        for _ in 0..10 {
            scene.apply(Command::Lights(-1));
        }
        assert_eq!(scene.lights.active(), 0);
    }

    #[test]
    fn test_zoom_follows_projection_mode() {
        let mut scene = scene();
        scene.apply(Command::Zoom(1.0));
        assert_eq!(scene.camera.fov, 65.0);

        scene.apply(Command::ToggleProjection);
        scene.apply(Command::Zoom(-1.0));
        assert_eq!(scene.camera.ortho_height, 5.5);
        assert_eq!(scene.camera.fov, 65.0);
    }

    #[test]
    fn test_material_edits_are_clamped() {
        let mut scene = scene();
        for _ in 0..30 {
            scene.apply(Command::Material(MaterialField::Ambient, 1.0));
            scene.apply(Command::Material(MaterialField::Shininess, -1.0));
        }
        assert_eq!(scene.material.ambient_k, 1.0);
        assert_eq!(scene.material.shininess, Material::MIN_SHININESS);
    }

    #[test]
    fn test_move_reset_and_quit() {
        let mut scene = scene();
        scene.apply(Command::Move(MoveInput {
            forward: 1.0,
            ..MoveInput::default()
        }));
        assert!(scene.camera.position.z < 5.0);

        scene.apply(Command::ResetCamera);
        assert_eq!(scene.camera.position, Point3::new(0.0, 0.0, 5.0));
        assert!(!scene.apply(Command::Quit));
    }

    #[test]
    fn test_light_editing_targets_selected_slot() {
        let mut scene = scene();
        let untouched = *scene.lights.light(0).unwrap();

        scene.apply(Command::SelectLight);
        assert_eq!(scene.selected_light, 1);
        scene.apply(Command::MoveLight(Vector3::new(0.0, 0.0, -1.0)));
        scene.apply(Command::MoveLight(Vector3::new(1.0, 0.0, 0.0)));

        let moved = scene.lights.light(1).unwrap();
        assert_eq!(moved.position, Point3::new(-1.75, 2.0, 1.75));
        assert_eq!(*scene.lights.light(0).unwrap(), untouched);

        // Green is followed by blue in the palette
        scene.apply(Command::CycleLightColor);
        assert_eq!(scene.lights.light(1).unwrap().color, Vector3::new(0.0, 0.0, 1.0));

        for _ in 0..MAX_LIGHTS - 1 {
            scene.apply(Command::SelectLight);
        }
        assert_eq!(scene.selected_light, 0);
    }

    #[test]
    fn test_inactive_light_can_still_be_edited() {
        let mut scene = scene();
        scene.lights.set_active(0);
        scene.apply(Command::MoveLight(Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(scene.lights.light(0).unwrap().position.y, 2.25);
        assert_eq!(scene.lights.effective(0).unwrap().color, Vector3::zeros());
    }

    #[test]
    fn test_colour_palettes_wrap() {
        let mut scene = scene();
        for _ in 0..BACKGROUND_PALETTE.len() {
            scene.apply(Command::CycleBackground);
        }
        assert_eq!(scene.background, Vector3::from(BACKGROUND_PALETTE[0]));

        let off_palette = Vector3::new(0.5, 0.25, 0.75);
        assert_eq!(
            next_in_palette(&LIGHT_PALETTE, &off_palette),
            Vector3::from(LIGHT_PALETTE[0])
        );
    }

    #[test]
    fn test_clip_planes_stay_ordered() {
        let mut scene = scene();
        for _ in 0..10 {
            scene.apply(Command::NearPlane(-1.0));
        }
        assert_eq!(scene.camera.near, MIN_NEAR);

        for _ in 0..200 {
            scene.apply(Command::FarPlane(1.0));
        }
        assert_eq!(scene.camera.far, MAX_FAR);

        for _ in 0..200 {
            scene.apply(Command::FarPlane(-1.0));
        }
        assert!(scene.camera.far > scene.camera.near);
        scene.apply(Command::NearPlane(1.0));
        assert!(scene.camera.near < scene.camera.far);
    }

    #[test]
    fn test_speed_edits_change_motion() {
        let mut scene = scene();
        scene.apply(Command::MoveSpeed(1.0));
        assert_eq!(scene.controller.move_speed, 6.0);
        for _ in 0..30 {
            scene.apply(Command::SprintSpeed(-1.0));
        }
        assert_eq!(scene.controller.sprint_move_speed, MIN_SPEED);

        scene.apply(Command::Move(MoveInput {
            forward: 1.0,
            ..MoveInput::default()
        }));
        let travelled = 5.0 - scene.camera.position.z;
        assert!((travelled - 6.0 * KEY_STEP_SECONDS).abs() < 1e-5);
    }
}
