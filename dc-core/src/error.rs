use thiserror::Error;

#[derive(Error, Debug)]
pub enum DcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cursor ran out of bytes where more were required. Always means
    /// a corrupt or foreign blob; the context names the section being read.
    #[error("truncated input: {0}")]
    Truncated(&'static str),

    #[error("invalid node name: {0}")]
    InvalidName(String),

    /// Every width/mode combination was exhausted without producing a
    /// valid encoding.
    #[error("no width/mode combination can encode this input")]
    BuildFailed,
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, DcError>;
