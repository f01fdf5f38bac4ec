/// Errors reported when a mesh breaks its index-buffer invariants
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("index count {index_count} is not a multiple of 3")]
    IncompleteTriangle { index_count: usize },
}
