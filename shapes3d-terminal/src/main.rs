/// shapes3d terminal demo
///
/// Flies a first-person camera around a cube, sphere and cylinder standing
/// on a floor plane, lit by up to four coloured point lights.
use clap::Parser;
use log::info;
use shapes3d_core::MAX_LIGHTS;
use shapes3d_terminal::{AppError, SceneConfig, SceneState, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "shapes3d-terminal", version, about = "Lit 3D primitives rendered as ASCII art")]
struct Cli {
    /// Longitude and latitude segments of the sphere
    #[arg(long, default_value_t = 64)]
    sphere_segments: u32,

    /// Segments around the cylinder
    #[arg(long, default_value_t = 32)]
    cylinder_segments: u32,

    /// Cells along each side of the floor plane
    #[arg(long, default_value_t = 10)]
    plane_subdivisions: u32,

    /// Number of point lights switched on at startup
    #[arg(
        long,
        default_value_t = MAX_LIGHTS as u8,
        value_parser = clap::value_parser!(u8).range(0..=MAX_LIGHTS as i64)
    )]
    lights: u8,

    /// Start with the orthographic projection
    #[arg(long)]
    orthographic: bool,

    /// Frame rate cap
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

impl Cli {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            sphere_segments: self.sphere_segments,
            cylinder_segments: self.cylinder_segments,
            plane_subdivisions: self.plane_subdivisions,
            active_lights: usize::from(self.lights),
            orthographic: self.orthographic,
        }
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let scene = SceneState::new(&cli.scene_config(), 1, 1)?;

    info!("starting terminal renderer at {} fps", cli.fps);
    let mut app = TerminalApp::new(scene, cli.fps)?;
    app.run()
}
