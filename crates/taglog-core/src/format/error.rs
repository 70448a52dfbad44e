use thiserror::Error;

/// Errors returned when compiling a format descriptor.
///
/// # Examples
/// ```
/// use taglog_core::{FormatError, FormatSpec};
///
/// let err = FormatSpec::compile(">I").unwrap_err();
/// assert_eq!(err, FormatError::UnsupportedByteOrder { found: '>' });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty format descriptor")]
    Empty,
    #[error("missing byte order prefix: expected '<', got '{found}'")]
    MissingByteOrder { found: char },
    #[error("unsupported byte order '{found}': only little-endian '<' is accepted")]
    UnsupportedByteOrder { found: char },
    #[error("unknown format code '{code}' at position {position}")]
    UnknownCode { code: char, position: usize },
    #[error("repeat count at position {position} is not followed by a format code")]
    DanglingCount { position: usize },
    #[error("format descriptor is too large")]
    TooLarge,
}
