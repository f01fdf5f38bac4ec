/// Per-vertex Blinn-Phong lighting for the software rasterizer
use nalgebra::{Point3, Vector3};
use shapes3d_core::{LightRig, Material};

/// Colour of a surface point lit by every slot of the rig.
///
/// Inactive slots are black and so contribute nothing, ambient included.
/// The result is clamped to `[0, 1]` per channel.
pub fn blinn_phong(
    position: &Point3<f32>,
    normal: &Vector3<f32>,
    eye: &Point3<f32>,
    lights: &LightRig,
    material: &Material,
) -> Vector3<f32> {
    let Some(normal) = normal.try_normalize(0.0) else {
        return Vector3::zeros();
    };
    let to_eye = (eye - position).try_normalize(0.0).unwrap_or(normal);

    let mut color = Vector3::zeros();
    for light in lights.iter_effective() {
        let Some(to_light) = (light.position - position).try_normalize(0.0) else {
            continue;
        };

        let diffuse = normal.dot(&to_light).max(0.0);
        let specular = if diffuse > 0.0 {
            let halfway = (to_light + to_eye).try_normalize(0.0).unwrap_or(normal);
            normal.dot(&halfway).max(0.0).powf(material.shininess)
        } else {
            0.0
        };

        let intensity = material.ambient_k
            + material.diffuse_k * diffuse
            + material.specular_k * specular;
        color += light.color * intensity;
    }

    color.map(|c| c.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes3d_core::{Light, MAX_LIGHTS};

    const EPSILON: f32 = 1e-5;

    fn single_white_light(position: Point3<f32>) -> LightRig {
        let light = Light::new(position, Vector3::new(1.0, 1.0, 1.0));
        LightRig::new([light; MAX_LIGHTS], 1)
    }

    #[test]
    fn test_no_active_lights_is_black() {
        let mut lights = LightRig::default();
        lights.set_active(0);

        let color = blinn_phong(
            &Point3::origin(),
            &Vector3::y(),
            &Point3::new(0.0, 0.0, 5.0),
            &lights,
            &Material::default(),
        );
        assert_eq!(color, Vector3::zeros());
    }

    #[test]
    fn test_head_on_light_saturates() {
        let lights = single_white_light(Point3::new(0.0, 5.0, 0.0));
        let color = blinn_phong(
            &Point3::origin(),
            &Vector3::y(),
            &Point3::new(0.0, 5.0, 0.0),
            &lights,
            &Material::default(),
        );
        assert!((color - Vector3::new(1.0, 1.0, 1.0)).norm() < EPSILON);
    }

    #[test]
    fn test_light_behind_surface_is_ambient_only() {
        let lights = single_white_light(Point3::new(0.0, -5.0, 0.0));
        let material = Material::default();
        let color = blinn_phong(
            &Point3::origin(),
            &Vector3::y(),
            &Point3::new(0.0, 5.0, 0.0),
            &lights,
            &material,
        );
        let ambient = Vector3::new(1.0, 1.0, 1.0) * material.ambient_k;
        assert!((color - ambient).norm() < EPSILON);
    }

    #[test]
    fn test_light_colour_tints_result() {
        let red = Light::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let lights = LightRig::new([red; MAX_LIGHTS], 1);
        let material = Material {
            ambient_k: 0.1,
            diffuse_k: 0.4,
            specular_k: 0.0,
            shininess: 8.0,
        };

        let color = blinn_phong(
            &Point3::origin(),
            &Vector3::y(),
            &Point3::new(3.0, 4.0, 0.0),
            &lights,
            &material,
        );
        assert!((color.x - 0.5).abs() < EPSILON);
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }
}
