#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required option key was never supplied, or a positional index is
    /// out of range.
    #[error("not found: {0}")]
    NotFound(String),

    /// An option value could not be interpreted as requested.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
