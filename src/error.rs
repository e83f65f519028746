//! Error types for Acorn-128 operations.

use core::fmt;

/// Result type alias for Acorn-128 operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during Acorn-128 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Message too long (maximum 2^61 - 1 bytes).
    MessageTooLong,

    /// Associated data too long (maximum 2^61 - 1 bytes).
    AssociatedDataTooLong,

    /// Batch buffers are not sized as `count` equal-width slices.
    BatchLengthMismatch,

    /// Authentication tag verification failed.
    AuthenticationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MessageTooLong => write!(f, "message too long (maximum 2^61 - 1 bytes)"),
            Error::AssociatedDataTooLong => {
                write!(f, "associated data too long (maximum 2^61 - 1 bytes)")
            }
            Error::BatchLengthMismatch => {
                write!(f, "batch buffers are not sized as count equal-width slices")
            }
            Error::AuthenticationFailed => write!(f, "authentication tag verification failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
