use thiserror::Error;

use std::io;

pub type Result<T> = std::result::Result<T, CxiError>;
pub type DeserializationResult<T> = std::result::Result<T, DeserializationError>;
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

/// Errors raised while acquiring the container header.
///
/// Field extraction itself cannot fail: once a buffer of the required size has been
/// accepted, every offset read by the decoders is in bounds.
#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error(
        "Offset {offset}: not enough data to read {what} (need {need} bytes, have {have})"
    )]
    Truncated {
        what: &'static str,
        offset: u64,
        need: usize,
        have: usize,
    },

    #[error("An I/O error has occurred while reading the container header")]
    Io(#[from] io::Error),
}

/// Errors raised while writing the project specification to its sink.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Writing RSF output failed")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum CxiError {
    #[error("Failed to read container header")]
    Deserialization(#[from] DeserializationError),

    #[error("Failed to write project specification")]
    Serialization(#[from] SerializationError),
}
