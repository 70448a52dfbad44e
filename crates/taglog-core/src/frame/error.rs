use thiserror::Error;

/// A `DATA_TAG:` line whose labeled fields could not be read.
///
/// # Examples
/// ```
/// use taglog_core::{FrameError, extract_frame};
///
/// let err = extract_frame("DATA_TAG: NAME:Foo").unwrap_err();
/// assert!(matches!(err, FrameError::MissingSeparator { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("missing {label} field")]
    MissingLabel { label: &'static str },
    #[error("empty value for {label}")]
    EmptyValue { label: &'static str },
    #[error("expected whitespace after {label} value")]
    MissingSeparator { label: &'static str },
}
