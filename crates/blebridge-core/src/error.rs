//! Error types for the blebridge normalization layer

use thiserror::Error;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Errors produced while normalizing radio-stack notifications
///
/// None of these terminate the translation loop: a `Decoding` or
/// `MalformedNotification` error is scoped to the single notification that
/// caused it, and `UnsupportedOperation` is returned straight to the caller
/// of the command facade.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport-encoded payload could not be decoded
    #[error("Failed to decode {context}: {reason}")]
    Decoding {
        context: &'static str,
        reason: String,
    },

    /// The caller invoked an operation the underlying stack cannot perform
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation { operation: &'static str },

    /// A raw notification was missing a required field or had the wrong shape
    #[error("Malformed {kind} notification: {reason}")]
    MalformedNotification { kind: String, reason: String },
}

impl Error {
    /// Shorthand for a decoding failure scoped to a named field
    pub fn decoding(context: &'static str, reason: impl ToString) -> Self {
        Error::Decoding {
            context,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a malformed-notification failure
    pub fn malformed(kind: impl Into<String>, reason: impl ToString) -> Self {
        Error::MalformedNotification {
            kind: kind.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
