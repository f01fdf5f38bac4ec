/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use shapes3d_core::{Camera, MeshData};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A vertex after the per-vertex stage: screen position, NDC depth, lit colour
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    color: Vector3<f32>,
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Vector3<f32>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Vector3::zeros(); size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Vector3::zeros());
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        (x < self.width && y < self.height).then(|| self.color_buffer[y * self.width + x])
    }

    /// Rasterize an indexed mesh.
    ///
    /// `shade` receives each vertex's world position and world normal and
    /// returns its RGB colour; colours are interpolated across triangles.
    /// Triangles facing away from the camera are skipped, as are triangles
    /// with any vertex outside the clip volume.
    pub fn render_mesh<F>(
        &mut self,
        mesh: &MeshData,
        model: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        shade: F,
    ) where
        F: Fn(&Point3<f32>, &Vector3<f32>) -> Vector3<f32>,
    {
        let normal_matrix = normal_matrix(model);
        let mvp = view_projection * model;

        let screen: Vec<Option<ScreenVertex>> = mesh
            .vertices
            .iter()
            .map(|vertex| {
                let (x, y, depth) = Camera::project_to_screen(
                    &mvp,
                    &vertex.position,
                    self.width as u32,
                    self.height as u32,
                )?;
                let world = model.transform_point(&vertex.position);
                let normal = normal_matrix * vertex.normal;
                Some(ScreenVertex {
                    x,
                    y,
                    depth,
                    color: shade(&world, &normal),
                })
            })
            .collect();

        for tri in mesh.indices.chunks_exact(3) {
            let corners = (
                screen.get(tri[0] as usize).copied().flatten(),
                screen.get(tri[1] as usize).copied().flatten(),
                screen.get(tri[2] as usize).copied().flatten(),
            );
            if let (Some(v0), Some(v1), Some(v2)) = corners {
                // Screen y grows downwards, so counter-clockwise shows up negative
                if signed_area(&v0, &v1, &v2) < 0.0 {
                    self.rasterize_triangle([v0, v1, v2]);
                }
            }
        }
    }

    fn rasterize_triangle(&mut self, [v0, v1, v2]: [ScreenVertex; 3]) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    let color = v0.color * w0 + v1.color * w1 + v2.color * w2;
                    self.depth_buffer[idx] = depth;
                    self.color_buffer[idx] = color;
                    self.char_buffer[idx] = luminosity_char(&color);
                }
            }
        }
    }

    /// Write the frame; empty cells show the background colour
    pub fn draw<W: Write>(&self, writer: &mut W, background: &Vector3<f32>) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_terminal_color(background)))?;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(to_terminal_color(&self.color_buffer[idx])))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Inverse-transpose of the model's linear part; identity when it is singular
fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    model
        .fixed_view::<3, 3>(0, 0)
        .into_owned()
        .try_inverse()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix3::identity)
}

fn signed_area(v0: &ScreenVertex, v1: &ScreenVertex, v2: &ScreenVertex) -> f32 {
    (v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y)
}

fn luminosity_char(color: &Vector3<f32>) -> char {
    let brightness = color.max().clamp(0.0, 1.0);
    let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    // A lit surface never disappears entirely
    LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

fn to_terminal_color(color: &Vector3<f32>) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
