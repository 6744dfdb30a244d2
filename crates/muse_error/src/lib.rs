//! Error types for the Muse generation pipeline.
//!
//! Each error carries the file and line where it was created. Generation
//! failures are described by [`GenerationErrorKind`]; [`MuseError`] wraps every
//! error the workspace can surface.

mod config;
mod generation;
mod io;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use io::IoError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum MuseErrorKind {
    /// Generation stage failure
    #[display("{_0}")]
    Generation(GenerationError),
    /// Configuration error
    #[display("{_0}")]
    Config(ConfigError),
    /// Filesystem error
    #[display("{_0}")]
    Io(IoError),
}

/// Muse error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Muse Error: {}", _0)]
pub struct MuseError(Box<MuseErrorKind>);

impl MuseError {
    /// Create a new error from a kind.
    pub fn new(kind: MuseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MuseErrorKind {
        &self.0
    }
}

impl std::error::Error for MuseError {}

impl<T> From<T> for MuseError
where
    T: Into<MuseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Muse operations.
pub type MuseResult<T> = std::result::Result<T, MuseError>;
