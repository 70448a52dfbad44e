use thiserror::Error;

use crate::format::FormatError;

/// Errors returned when decoding a tagged payload.
///
/// # Examples
/// ```
/// use taglog_core::{DecodeError, FormatSpec, decode};
///
/// let spec = FormatSpec::compile("<I").unwrap();
/// let err = decode(&spec, &[1, 0]).unwrap_err();
/// assert!(matches!(err, DecodeError::LengthMismatch { expected: 4, actual: 2 }));
/// ```
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed base64 payload: {0}")]
    PayloadMalformed(#[from] base64::DecodeError),
    #[error("payload length mismatch: format needs {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("invalid format descriptor: {0}")]
    Format(#[from] FormatError),
}

/// Errors returned when packing values into a payload.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid format descriptor: {0}")]
    Format(#[from] FormatError),
    #[error("value count mismatch: format takes {expected} values, got {actual}")]
    ValueCount { expected: usize, actual: usize },
    #[error("value {index} has the wrong kind: expected {expected}")]
    KindMismatch { index: usize, expected: &'static str },
    #[error("value {index} ({value}) does not fit in {width} byte(s)")]
    OutOfRange { index: usize, value: i64, width: usize },
    #[error("value {index} is {actual} bytes long, field is {width} bytes")]
    BytesWidth {
        index: usize,
        actual: usize,
        width: usize,
    },
}
