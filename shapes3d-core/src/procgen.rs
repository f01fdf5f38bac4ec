/// Procedural primitive generation
///
/// Every generator is a pure function from shape parameters to a
/// [`MeshData`]. Segment counts below the smallest usable value are clamped
/// and reported through `log::warn!`; generation never fails. Zero or
/// negative magnitudes are accepted and give degenerate (but finite) meshes.
///
/// Surfaces that need a hard edge (cylinder caps against its side, cube
/// faces) get their own copy of the shared corner vertices so each copy can
/// carry its own normal and UV.
use std::f32::consts::{PI, TAU};

use log::{debug, warn};
use nalgebra::{Point3, Vector2, Vector3};

use crate::geometry::{MeshData, Vertex};

const MIN_SPHERE_SEGMENTS: u32 = 1;
const MIN_CYLINDER_SEGMENTS: u32 = 3;
const MIN_PLANE_SUBDIVISIONS: u32 = 1;

fn clamp_count(kind: &str, what: &str, value: u32, min: u32) -> u32 {
    if value < min {
        warn!("{kind}: {what} {value} is below {min}, using {min}");
        min
    } else {
        value
    }
}

fn log_built(kind: &str, mesh: &MeshData) {
    debug!(
        "{kind}: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
}

/// (sin, cos) of the `i`-th of `segments` equal steps around a full turn
fn ring_angle(i: u32, segments: u32) -> (f32, f32) {
    (i as f32 * TAU / segments as f32).sin_cos()
}

/// UV sphere centred on the origin.
///
/// `segments` rows run from the +Y pole (row 0) to the -Y pole and
/// `segments + 1` columns run around the azimuth; the last column repeats the
/// first so `u` can reach 1.0 across the seam. Produces `(segments + 1)²`
/// vertices.
pub fn create_sphere(radius: f32, segments: u32) -> MeshData {
    let segments = clamp_count("sphere", "segment count", segments, MIN_SPHERE_SEGMENTS);
    let columns = segments + 1;
    let phi_step = PI / segments as f32;
    let uv_step = 1.0 / segments as f32;

    let mut mesh = MeshData::with_capacity(
        (columns * columns) as usize,
        (6 * segments * segments) as usize,
    );

    for row in 0..=segments {
        let (sin_phi, cos_phi) = (row as f32 * phi_step).sin_cos();

        for col in 0..=segments {
            let (sin_theta, cos_theta) = ring_angle(col, segments);
            let direction = Vector3::new(cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
            let position = Point3::from(direction * radius);
            // A zero radius collapses every position onto the origin
            let normal = position.coords.try_normalize(0.0).unwrap_or(direction);

            mesh.push_vertex(Vertex::new(
                position,
                normal,
                Vector2::new(col as f32 * uv_step, row as f32 * uv_step),
            ));
        }
    }

    for band in 0..segments {
        let upper = band * columns;
        let lower = upper + columns;

        for col in 0..segments {
            let a = upper + col;
            let b = a + 1;
            let c = lower + col;
            let d = c + 1;

            if band == 0 {
                // a and b are both the north pole
                mesh.push_triangle(c, a, d);
            } else if band == segments - 1 {
                // c and d are both the south pole
                mesh.push_triangle(a, b, c);
            } else {
                mesh.push_triangle(a, b, c);
                mesh.push_triangle(b, d, c);
            }
        }
    }

    log_built("sphere", &mesh);
    mesh
}

/// Capped cylinder centred on the origin, axis along Y.
///
/// Vertex layout, in buffer order:
/// 1. top centre
/// 2. top cap ring (`segments + 1`, seam repeated)
/// 3. bottom cap ring (`segments + 1`)
/// 4. bottom centre
/// 5. side copy of the top ring
/// 6. side copy of the bottom ring
pub fn create_cylinder(height: f32, radius: f32, segments: u32) -> MeshData {
    let segments = clamp_count(
        "cylinder",
        "segment count",
        segments,
        MIN_CYLINDER_SEGMENTS,
    );
    let columns = segments + 1;
    let top_y = height / 2.0;
    let uv_step = 1.0 / segments as f32;
    let centre_uv = Vector2::new(0.5, 0.5);

    let mut mesh = MeshData::with_capacity(
        (4 * columns + 2) as usize,
        (12 * segments) as usize,
    );

    let top_centre = mesh.push_vertex(Vertex::new(
        Point3::new(0.0, top_y, 0.0),
        Vector3::y(),
        centre_uv,
    ));

    for (y, normal) in [(top_y, Vector3::y()), (-top_y, -Vector3::y())] {
        for i in 0..=segments {
            let (sin, cos) = ring_angle(i, segments);
            mesh.push_vertex(Vertex::new(
                Point3::new(cos * radius, y, sin * radius),
                normal,
                Vector2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
            ));
        }
    }

    let bottom_centre = mesh.push_vertex(Vertex::new(
        Point3::new(0.0, -top_y, 0.0),
        -Vector3::y(),
        centre_uv,
    ));

    let top_ring = top_centre + 1;
    let bottom_ring = top_ring + columns;
    let side = bottom_centre + 1;

    for (y, v) in [(top_y, 1.0), (-top_y, 0.0)] {
        let axis = Point3::new(0.0, y, 0.0);
        for i in 0..=segments {
            let (sin, cos) = ring_angle(i, segments);
            let position = Point3::new(cos * radius, y, sin * radius);
            let normal = (position - axis)
                .try_normalize(0.0)
                .unwrap_or_else(|| Vector3::new(cos, 0.0, sin));

            mesh.push_vertex(Vertex::new(
                position,
                normal,
                Vector2::new(i as f32 * uv_step, v),
            ));
        }
    }

    for i in 0..segments {
        mesh.push_triangle(top_ring + i, top_centre, top_ring + i + 1);
    }

    for i in 0..segments {
        let upper = side + i;
        let lower = upper + columns;
        mesh.push_triangle(upper, upper + 1, lower);
        mesh.push_triangle(upper + 1, lower + 1, lower);
    }

    // Reversed relative to the top fan so the bottom cap faces -Y
    for i in 0..segments {
        mesh.push_triangle(bottom_ring + i + 1, bottom_centre, bottom_ring + i);
    }

    log_built("cylinder", &mesh);
    mesh
}

/// Flat grid in the XZ plane facing +Y.
///
/// Columns advance along +X and rows along -Z, so row 0 is the +Z edge and
/// the plane spans `[0, width] x [-height, 0]`.
pub fn create_plane(width: f32, height: f32, subdivisions: u32) -> MeshData {
    let subdivisions = clamp_count(
        "plane",
        "subdivision count",
        subdivisions,
        MIN_PLANE_SUBDIVISIONS,
    );
    let columns = subdivisions + 1;
    let step = 1.0 / subdivisions as f32;

    let mut mesh = MeshData::with_capacity(
        (columns * columns) as usize,
        (6 * subdivisions * subdivisions) as usize,
    );

    for row in 0..=subdivisions {
        for col in 0..=subdivisions {
            let u = col as f32 * step;
            let v = row as f32 * step;
            mesh.push_vertex(Vertex::new(
                Point3::new(width * u, 0.0, -height * v),
                Vector3::y(),
                Vector2::new(u, v),
            ));
        }
    }

    for row in 0..subdivisions {
        for col in 0..subdivisions {
            let start = row * columns + col;
            mesh.push_triangle(start, start + 1, start + columns + 1);
            mesh.push_triangle(start, start + columns + 1, start + columns);
        }
    }

    log_built("plane", &mesh);
    mesh
}

/// Axis-aligned cube of edge `size` centred on the origin, four vertices per face
pub fn create_cube(size: f32) -> MeshData {
    let half = size / 2.0;
    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();

    // (outward normal, right, up) with right x up == normal
    let faces = [
        (z, x, y),
        (-z, -x, y),
        (x, -z, y),
        (-x, z, y),
        (y, x, -z),
        (-y, x, z),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::with_capacity(24, 36);

    for (normal, right, up) in faces {
        let first = mesh.vertices.len() as u32;

        for (sx, sy) in corners {
            let offset = (normal + right * sx + up * sy) * half;
            mesh.push_vertex(Vertex::new(
                Point3::from(offset),
                normal,
                Vector2::new((sx + 1.0) * 0.5, (sy + 1.0) * 0.5),
            ));
        }

        mesh.push_triangle(first, first + 1, first + 2);
        mesh.push_triangle(first + 2, first + 3, first);
    }

    log_built("cube", &mesh);
    mesh
}
