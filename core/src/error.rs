use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by the graph core.
///
/// Mutations on absent vertices are not errors (they no-op), so this only
/// covers traversal starts, degenerate statistics and TGF I/O.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown vertex {0}")]
    UnknownVertex(String),

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("TGF line {line}: {message}")]
    Tgf { line: usize, message: String },

    /// Empty, padded or multi-line labels would not read back unchanged.
    #[error("label {0:?} cannot be written as TGF")]
    TgfLabel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn unknown_vertex<T: std::fmt::Debug>(vertex: &T) -> Self {
        GraphError::UnknownVertex(format!("{:?}", vertex))
    }

    pub(crate) fn tgf(line: usize, message: impl Into<String>) -> Self {
        GraphError::Tgf {
            line,
            message: message.into(),
        }
    }
}
