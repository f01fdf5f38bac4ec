/// Point lights and surface material coefficients
use nalgebra::{Point3, Vector3};

/// Capacity of the light array seen by the shading code
pub const MAX_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position
    pub position: Point3<f32>,
    /// Linear RGB
    pub color: Vector3<f32>,
}

impl Light {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }
}

/// Fixed-size set of lights with an active-count cutoff.
///
/// Lights past the cutoff keep their settings but shade as black, so the
/// array seen by the shading code never changes size.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    lights: [Light; MAX_LIGHTS],
    active: usize,
}

impl LightRig {
    pub fn new(lights: [Light; MAX_LIGHTS], active: usize) -> Self {
        Self {
            lights,
            active: active.min(MAX_LIGHTS),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Set how many lights contribute; clamped to `MAX_LIGHTS`
    pub fn set_active(&mut self, active: usize) {
        if active > MAX_LIGHTS {
            log::warn!("{active} active lights requested, only {MAX_LIGHTS} available");
        }
        self.active = active.min(MAX_LIGHTS);
    }

    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// The light as shading sees it: unchanged when active, black otherwise
    pub fn effective(&self, index: usize) -> Option<Light> {
        self.lights.get(index).map(|light| {
            if index < self.active {
                *light
            } else {
                Light {
                    color: Vector3::zeros(),
                    ..*light
                }
            }
        })
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Light> + '_ {
        self.lights[..self.active].iter()
    }

    /// All `MAX_LIGHTS` slots with inactive ones blacked out
    pub fn iter_effective(&self) -> impl Iterator<Item = Light> + '_ {
        (0..MAX_LIGHTS).filter_map(move |index| self.effective(index))
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new(
            [
                Light::new(Point3::new(2.0, 2.0, 2.0), Vector3::new(1.0, 0.0, 0.0)),
                Light::new(Point3::new(-2.0, 2.0, 2.0), Vector3::new(0.0, 1.0, 0.0)),
                Light::new(Point3::new(-2.0, 2.0, -2.0), Vector3::new(0.0, 0.0, 1.0)),
                Light::new(Point3::new(2.0, 2.0, -2.0), Vector3::new(1.0, 1.0, 0.0)),
            ],
            MAX_LIGHTS,
        )
    }
}

/// Blinn-Phong reflection coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient_k: f32,
    pub diffuse_k: f32,
    pub specular_k: f32,
    pub shininess: f32,
}

impl Material {
    pub const MIN_SHININESS: f32 = 2.0;
    pub const MAX_SHININESS: f32 = 64.0;

    /// Pull every coefficient back into its editable range
    pub fn clamped(self) -> Self {
        Self {
            ambient_k: self.ambient_k.clamp(0.0, 1.0),
            diffuse_k: self.diffuse_k.clamp(0.0, 1.0),
            specular_k: self.specular_k.clamp(0.0, 1.0),
            shininess: self.shininess.clamp(Self::MIN_SHININESS, Self::MAX_SHININESS),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient_k: 0.5,
            diffuse_k: 0.5,
            specular_k: 0.5,
            shininess: 20.0,
        }
    }
}
