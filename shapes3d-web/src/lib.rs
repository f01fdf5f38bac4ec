/// shapes3d web bindings
///
/// Exposes the procedural meshes and camera matrices to JavaScript as flat
/// buffers. `vertices()` maps straight onto a `Float32Array` with an 8-float
/// stride (position, normal, uv) and matrices come out column-major, ready
/// for `uniformMatrix4fv`.
use log::debug;
use nalgebra::{Point3, Vector3};
use shapes3d_core::{
    create_cube, create_cylinder, create_plane, create_sphere, Camera, MeshData, Transform,
};
use wasm_bindgen::prelude::*;

/// A generated mesh held on the Rust side of the boundary
#[wasm_bindgen]
pub struct WebMesh {
    mesh: MeshData,
}

impl WebMesh {
    fn wrap(kind: &str, mesh: MeshData) -> Self {
        debug!(
            "{kind}: exporting {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Self { mesh }
    }
}

#[wasm_bindgen]
impl WebMesh {
    pub fn sphere(radius: f32, segments: u32) -> WebMesh {
        Self::wrap("sphere", create_sphere(radius, segments))
    }

    pub fn cylinder(height: f32, radius: f32, segments: u32) -> WebMesh {
        Self::wrap("cylinder", create_cylinder(height, radius, segments))
    }

    pub fn plane(width: f32, height: f32, subdivisions: u32) -> WebMesh {
        Self::wrap("plane", create_plane(width, height, subdivisions))
    }

    pub fn cube(size: f32) -> WebMesh {
        Self::wrap("cube", create_cube(size))
    }

    /// Interleaved vertex stream, 8 floats per vertex
    pub fn vertices(&self) -> Vec<f32> {
        self.mesh.interleaved()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.mesh.indices.clone()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen(js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Camera state for a canvas of the given pixel size
#[wasm_bindgen]
pub struct WebCamera {
    camera: Camera,
}

#[wasm_bindgen]
impl WebCamera {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebCamera {
        Self {
            camera: Camera::new(width, height),
        }
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&mut self, eye_x: f32, eye_y: f32, eye_z: f32, x: f32, y: f32, z: f32) {
        self.camera.position = Point3::new(eye_x, eye_y, eye_z);
        self.camera.target = Point3::new(x, y, z);
    }

    /// Vertical field of view in degrees
    #[wasm_bindgen(js_name = setFov)]
    pub fn set_fov(&mut self, degrees: f32) {
        self.camera.fov = degrees;
    }

    #[wasm_bindgen(js_name = toggleProjection)]
    pub fn toggle_projection(&mut self) {
        self.camera.toggle_mode();
    }

    /// Projection times view, 16 floats column-major
    #[wasm_bindgen(js_name = viewProjection)]
    pub fn view_projection(&self) -> Vec<f32> {
        self.camera.view_projection().as_slice().to_vec()
    }
}

/// Model matrix for a position, Euler rotation in degrees and scale, column-major
#[wasm_bindgen(js_name = modelMatrix)]
#[allow(clippy::too_many_arguments)]
pub fn model_matrix(
    x: f32,
    y: f32,
    z: f32,
    rotate_x: f32,
    rotate_y: f32,
    rotate_z: f32,
    scale_x: f32,
    scale_y: f32,
    scale_z: f32,
) -> Vec<f32> {
    let transform = Transform {
        position: Vector3::new(x, y, z),
        rotation: Vector3::new(rotate_x, rotate_y, rotate_z),
        scale: Vector3::new(scale_x, scale_y, scale_z),
    };
    transform.model_matrix().as_slice().to_vec()
}
