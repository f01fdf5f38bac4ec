/// Indexed triangle meshes ready for buffer upload
use nalgebra::{Point3, Vector2, Vector3};

use crate::error::MeshError;

/// Number of `f32` values in one packed vertex record
pub const VERTEX_STRIDE: usize = 8;

/// A 3D vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Packed `[px, py, pz, nx, ny, nz, u, v]` record
    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
            self.uv.x,
            self.uv.y,
        ]
    }
}

/// Vertex list plus a flat triangle list.
///
/// Indices are consumed three at a time; each triple winds counter-clockwise
/// when seen from outside the surface. Vertex order is the buffer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check that indices form whole triangles and stay inside the vertex list
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            Some(&index) => Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Iterate the triangles as vertex triples.
    ///
    /// Panics on an out-of-range index; call `validate` first for untrusted data.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Tightly packed vertex stream, `VERTEX_STRIDE` floats per vertex
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * VERTEX_STRIDE);
        for vertex in &self.vertices {
            data.extend_from_slice(&vertex.to_array());
        }
        data
    }
}

/// Geometric normal of a triangle, following its winding.
///
/// Returns `None` for zero-area triangles (pole fans, collapsed caps).
pub fn face_normal(triangle: [&Vertex; 3]) -> Option<Vector3<f32>> {
    let edge1 = triangle[1].position - triangle[0].position;
    let edge2 = triangle[2].position - triangle[0].position;

    edge1.cross(&edge2).try_normalize(1e-12)
}
