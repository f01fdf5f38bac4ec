use shapes3d_core::MeshError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("mesh `{name}` is malformed: {source}")]
    Mesh {
        name: &'static str,
        #[source]
        source: MeshError,
    },

    #[error("terminal is {width}x{height}, nothing can be drawn")]
    EmptyViewport { width: u16, height: u16 },
}
