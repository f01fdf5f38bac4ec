/// Terminal front end: a lit primitive scene drawn with an ASCII rasterizer
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info, warn};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod error;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod shading;

pub use error::{AppError, AppResult};
pub use renderer::AsciiRenderer;
pub use scene::{SceneConfig, SceneState};

use input::map_key;
use scene::SceneObject;
use shading::blinn_phong;
use shapes3d_core::{ProjectionMode, Transform, MAX_LIGHTS};

/// Rows below the picture reserved for the status panel
pub const STATUS_LINES: u16 = 5;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: SceneState,
    renderer: AsciiRenderer,
    /// False while the terminal is too small to hold a picture
    viewport_ready: bool,
    target_frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: SceneState, target_fps: u32) -> AppResult<Self> {
        let (columns, rows) = terminal::size()?;
        Self::with_size(scene, target_fps, columns, rows)
    }

    /// Build the app for a terminal of `columns` x `rows` cells.
    ///
    /// Fails with `EmptyViewport` when that is too small to draw anything;
    /// later shrinking only pauses drawing.
    pub fn with_size(
        scene: SceneState,
        target_fps: u32,
        columns: u16,
        rows: u16,
    ) -> AppResult<Self> {
        if picture_size(columns, rows).is_none() {
            return Err(AppError::EmptyViewport {
                width: columns,
                height: rows,
            });
        }

        let mut app = Self {
            scene,
            renderer: AsciiRenderer::new(0, 0),
            viewport_ready: false,
            target_frame_time: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.resize(columns, rows);
        Ok(app)
    }

    pub fn run(&mut self) -> AppResult<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> AppResult<()> {
        while self.running {
            let frame_start = Instant::now();

            self.handle_events()?;
            if !self.running {
                break;
            }
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        info!("terminal loop finished");
        Ok(())
    }

    /// Drain every pending event so held keys do not queue up across frames
    fn handle_events(&mut self) -> AppResult<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = map_key(&key) {
                        debug!("{command:?}");
                        self.running = self.scene.apply(command);
                    }
                }
                Event::Resize(columns, rows) => self.resize(columns, rows),
                _ => {}
            }
            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        let Some((picture_columns, picture_rows)) = picture_size(columns, rows) else {
            if self.viewport_ready {
                warn!("terminal shrank to {columns}x{rows}, drawing paused");
            }
            self.viewport_ready = false;
            return;
        };

        self.renderer
            .resize(usize::from(picture_columns), usize::from(picture_rows));
        self.scene.camera.aspect = cell_aspect(picture_columns, picture_rows);
        self.viewport_ready = true;
        debug!("viewport {picture_columns}x{picture_rows}");
    }

    fn render(&mut self) -> AppResult<()> {
        let mut stdout = stdout();
        if !self.viewport_ready {
            queue!(stdout, terminal::Clear(ClearType::All))?;
            stdout.flush()?;
            return Ok(());
        }

        render_scene(&self.scene, &mut self.renderer);

        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout, &self.scene.background)?;

        let panel_top = self.renderer.height() as u16;
        for (row, line) in status_lines(&self.scene, self.fps).iter().enumerate() {
            let mut line = line.clone();
            line.truncate(self.renderer.width());
            queue!(
                stdout,
                cursor::MoveTo(0, panel_top + row as u16),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Yellow),
                Print(line),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

/// Cells left for the picture once the status panel is reserved
pub fn picture_size(columns: u16, rows: u16) -> Option<(u16, u16)> {
    let picture_rows = rows.saturating_sub(STATUS_LINES);
    (columns > 0 && picture_rows > 0).then_some((columns, picture_rows))
}

/// Width-over-height ratio of a block of character cells
pub fn cell_aspect(columns: u16, rows: u16) -> f32 {
    f32::from(columns) / (f32::from(rows.max(1)) * CELL_ASPECT)
}

/// Draw one frame of the scene into the renderer's buffers.
///
/// Objects are lit with Blinn-Phong; each active light is marked by a small
/// sphere drawn flat in the light's colour.
pub fn render_scene(scene: &SceneState, renderer: &mut AsciiRenderer) {
    renderer.clear();

    let view_projection = scene.camera.view_projection();
    let eye = scene.camera.position;

    for SceneObject { mesh, transform, .. } in &scene.objects {
        let model = transform.model_matrix();
        renderer.render_mesh(mesh, &model, &view_projection, |position, normal| {
            blinn_phong(position, normal, &eye, &scene.lights, &scene.material)
        });
    }

    for light in scene.lights.iter_active() {
        let p = light.position;
        let model = Transform::from_position(p.x, p.y, p.z).model_matrix();
        let color = light.color;
        renderer.render_mesh(&scene.light_marker, &model, &view_projection, |_, _| color);
    }
}

/// Text for the status panel under the picture
pub fn status_lines(scene: &SceneState, fps: f32) -> Vec<String> {
    let camera = &scene.camera;
    let view = match camera.mode {
        ProjectionMode::Perspective => format!("Perspective FOV {:.0}", camera.fov),
        ProjectionMode::Orthographic => format!("Orthographic height {:.1}", camera.ortho_height),
    };
    let material = &scene.material;
    let controller = &scene.controller;
    let selected = scene.selected_light;
    let light_line = match scene.lights.light(selected) {
        Some(light) => format!(
            "Light {}/{} {} at ({:.2}, {:.2}, {:.2}) colour ({:.1}, {:.1}, {:.1})",
            selected + 1,
            MAX_LIGHTS,
            if selected < scene.lights.active() { "on" } else { "off" },
            light.position.x,
            light.position.y,
            light.position.z,
            light.color.x,
            light.color.y,
            light.color.z,
        ),
        None => String::new(),
    };

    vec![
        format!(
            "FPS {fps:.1} | {view} | Lights {}/{} | Camera ({:.1}, {:.1}, {:.1})",
            scene.lights.active(),
            MAX_LIGHTS,
            camera.position.x,
            camera.position.y,
            camera.position.z,
        ),
        format!(
            "Near {:.2} | Far {:.0} | Speed {:.1} | Sprint {:.1} | Background ({:.2}, {:.2}, {:.2})",
            camera.near,
            camera.far,
            controller.move_speed,
            controller.sprint_move_speed,
            scene.background.x,
            scene.background.y,
            scene.background.z,
        ),
        format!(
            "Ambient {:.2} | Diffuse {:.2} | Specular {:.2} | Shininess {:.0}",
            material.ambient_k, material.diffuse_k, material.specular_k, material.shininess,
        ),
        light_line,
        concat!(
            "WASD/Space/C move (caps sprint) | Arrows look | P projection | +/- lights | ",
            "[ ] zoom | 1-8 material | Tab light | IJKL/U/O move light | V colour | ",
            "B background | , . near | < > far | 9 0 ( ) speed | R reset | Q quit"
        )
        .to_string(),
    ]
}
