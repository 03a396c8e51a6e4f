use thiserror::Error;

use crate::graphs::Vertex;

pub type Result<T> = std::result::Result<T, HeuristicError>;

#[derive(Debug, Error)]
pub enum HeuristicError {
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("vertex {vertex} is not a network vertex of a graph with {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: Vertex,
        number_of_vertices: u32,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown graph file extension {0:?}, expected .bincode or .json")]
    UnknownFileType(String),
}
