/// Keyboard bindings for the terminal demo
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nalgebra::Vector3;
use shapes3d_core::MoveInput;

/// Look input produced by one arrow key press, before sensitivity scaling
const LOOK_STEP: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    Ambient,
    Diffuse,
    Specular,
    Shininess,
}

/// What a key press asks the scene to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(MoveInput),
    ToggleProjection,
    /// Change the active light count by this many
    Lights(i32),
    /// Widen (+1) or narrow (-1) the view: FOV or orthographic height
    Zoom(f32),
    Material(MaterialField, f32),
    /// Make the next light slot the one edited by the light commands
    SelectLight,
    /// Move the selected light by this many steps along each world axis
    MoveLight(Vector3<f32>),
    CycleLightColor,
    CycleBackground,
    NearPlane(f32),
    FarPlane(f32),
    MoveSpeed(f32),
    SprintSpeed(f32),
    ResetCamera,
    Quit,
}

/// Map a key event to a scene command; unbound keys and releases give `None`
pub fn map_key(event: &KeyEvent) -> Option<Command> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(event.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    let movement = |forward: f32, right: f32, up: f32, sprint: bool| {
        Command::Move(MoveInput {
            forward,
            right,
            up,
            sprint,
            ..MoveInput::default()
        })
    };
    let look = |yaw: f32, pitch: f32| {
        Command::Move(MoveInput {
            yaw,
            pitch,
            ..MoveInput::default()
        })
    };

    let nudge = |x: f32, y: f32, z: f32| Command::MoveLight(Vector3::new(x, y, z));

    let command = match event.code {
        KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
        KeyCode::Char(c @ ('w' | 'W')) => movement(1.0, 0.0, 0.0, c.is_ascii_uppercase()),
        KeyCode::Char(c @ ('s' | 'S')) => movement(-1.0, 0.0, 0.0, c.is_ascii_uppercase()),
        KeyCode::Char(c @ ('a' | 'A')) => movement(0.0, -1.0, 0.0, c.is_ascii_uppercase()),
        KeyCode::Char(c @ ('d' | 'D')) => movement(0.0, 1.0, 0.0, c.is_ascii_uppercase()),
        KeyCode::Char(' ') => movement(0.0, 0.0, 1.0, false),
        KeyCode::Char(c @ ('c' | 'C')) => movement(0.0, 0.0, -1.0, c.is_ascii_uppercase()),
        KeyCode::Left => look(-LOOK_STEP, 0.0),
        KeyCode::Right => look(LOOK_STEP, 0.0),
        KeyCode::Up => look(0.0, LOOK_STEP),
        KeyCode::Down => look(0.0, -LOOK_STEP),
        KeyCode::Char('p') => Command::ToggleProjection,
        KeyCode::Char('+' | '=') => Command::Lights(1),
        KeyCode::Char('-') => Command::Lights(-1),
        KeyCode::Char('[') => Command::Zoom(-1.0),
        KeyCode::Char(']') => Command::Zoom(1.0),
        KeyCode::Char('1') => Command::Material(MaterialField::Ambient, -1.0),
        KeyCode::Char('2') => Command::Material(MaterialField::Ambient, 1.0),
        KeyCode::Char('3') => Command::Material(MaterialField::Diffuse, -1.0),
        KeyCode::Char('4') => Command::Material(MaterialField::Diffuse, 1.0),
        KeyCode::Char('5') => Command::Material(MaterialField::Specular, -1.0),
        KeyCode::Char('6') => Command::Material(MaterialField::Specular, 1.0),
        KeyCode::Char('7') => Command::Material(MaterialField::Shininess, -1.0),
        KeyCode::Char('8') => Command::Material(MaterialField::Shininess, 1.0),
        KeyCode::Tab => Command::SelectLight,
        KeyCode::Char('j') => nudge(-1.0, 0.0, 0.0),
        KeyCode::Char('l') => nudge(1.0, 0.0, 0.0),
        KeyCode::Char('u') => nudge(0.0, 1.0, 0.0),
        KeyCode::Char('o') => nudge(0.0, -1.0, 0.0),
        KeyCode::Char('i') => nudge(0.0, 0.0, -1.0),
        KeyCode::Char('k') => nudge(0.0, 0.0, 1.0),
        KeyCode::Char('v') => Command::CycleLightColor,
        KeyCode::Char('b') => Command::CycleBackground,
        KeyCode::Char(',') => Command::NearPlane(-1.0),
        KeyCode::Char('.') => Command::NearPlane(1.0),
        KeyCode::Char('<') => Command::FarPlane(-1.0),
        KeyCode::Char('>') => Command::FarPlane(1.0),
        KeyCode::Char('9') => Command::MoveSpeed(-1.0),
        KeyCode::Char('0') => Command::MoveSpeed(1.0),
        KeyCode::Char('(') => Command::SprintSpeed(-1.0),
        KeyCode::Char(')') => Command::SprintSpeed(1.0),
        KeyCode::Char('r') => Command::ResetCamera,
        _ => return None,
    };

    Some(command)
}
