//! Error types for set operations.
//!
//! Every failure in this crate is a caller error that is reported before
//! any state changes: a mutating call against a read-only view, or a copy
//! into a buffer that is too small.

use std::fmt;

/// Represents an error raised by a set operation.
///
/// # Examples
///
/// ```rust
/// use linkset::SetError;
///
/// let error = SetError::UnsupportedOperation { operation: "add" };
/// assert_eq!(
///     format!("{error}"),
///     "add: operation is not supported on a read-only set"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// A mutating operation was invoked on a read-only set.
    UnsupportedOperation {
        /// The name of the rejected operation.
        operation: &'static str,
    },
    /// The destination buffer cannot hold every element from the given offset.
    OutOfBounds {
        /// The offset at which copying was requested to begin.
        offset: usize,
        /// The number of elements that had to be written.
        required: usize,
        /// The length of the destination buffer.
        capacity: usize,
    },
}

impl fmt::Display for SetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOperation { operation } => write!(
                formatter,
                "{operation}: operation is not supported on a read-only set"
            ),
            Self::OutOfBounds {
                offset,
                required,
                capacity,
            } => write!(
                formatter,
                "cannot copy {required} elements at offset {offset} into a buffer of length {capacity}"
            ),
        }
    }
}

impl std::error::Error for SetError {}

/// Result type returned by fallible set operations.
pub type SetResult<T> = Result<T, SetError>;
