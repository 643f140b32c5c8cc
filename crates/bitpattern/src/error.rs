use std::{collections::TryReserveError, io};

use thiserror::Error;

/// An error while streaming bit patterns from a source to a sink
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StreamError {
    /// The source or the sink was missing
    #[error("Source and sink must both be present")]
    InvalidArgument,
    /// The read buffer could not be allocated
    #[error("Failed to allocate the read buffer")]
    Alloc(#[source] TryReserveError),
    /// Reading from the source failed
    #[error("Failed to read from source")]
    Read(#[source] io::Error),
    /// Writing to the sink failed
    #[error("Failed to write to sink")]
    Write(#[source] io::Error),
}

impl StreamError {
    /// The kind of the underlying I/O error
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::InvalidArgument => io::ErrorKind::InvalidInput,
            Self::Alloc(_) => io::ErrorKind::OutOfMemory,
            Self::Read(e) | Self::Write(e) => e.kind(),
        }
    }
}

/// Type alias for convenience
pub type StreamResult<T> = Result<T, StreamError>;
