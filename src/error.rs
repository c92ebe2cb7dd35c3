//! Error types for duplex encoding and decoding.
//!
//! Every failure, whatever layer it comes from, surfaces as a single [`Error`]
//! value. Text-mode parse failures carry a rendered context window so the
//! message alone is enough to locate the problem in the input.
//!
//! ## Error Categories
//!
//! - **Structural mismatches**: the text grammar expected `"`, `[`, `]` or a
//!   numeral and found something else
//! - **Malformed numerals**: a byte inside a numeric token that cannot belong to it
//! - **Backend failures**: the [`Target`](crate::Target) could not satisfy a read or write
//! - **Invalid values**: well-formed tokens that do not fit the requested type
//!
//! ## Examples
//!
//! ```rust
//! use serde_duplex::{from_str, Error};
//!
//! let result: Result<String, Error> = from_str("abc");
//! let err = result.unwrap_err();
//! assert!(err.is_structural());
//! assert_eq!(err.position(), Some(0));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A text token was expected but a different byte (or end of input) was found.
    #[error("Unexpected {found} at position {position}. {msg}\n{context}")]
    StructuralMismatch {
        found: String,
        position: u64,
        msg: String,
        context: String,
    },

    /// A numeric token contained a byte that cannot be part of it, or did not
    /// fit the requested numeric type.
    #[error("Malformed numeral: unexpected {found} at position {position}. {msg}\n{context}")]
    MalformedNumeral {
        found: String,
        position: u64,
        msg: String,
        context: String,
    },

    /// The underlying target could not satisfy a read or write.
    #[error(
        "Backend failure{}: {msg}",
        position.map(|p| format!(" at position {p}")).unwrap_or_default()
    )]
    Backend { msg: String, position: Option<u64> },

    /// The decoded bytes are well-formed but do not make a valid value.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Bytes remained in the target after a complete value was decoded.
    #[error("Trailing bytes after the encoded value at position {position}")]
    TrailingBytes { position: u64 },

    /// The value's shape is outside what the codec can represent.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through serde.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a backend failure without a known position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_duplex::Error;
    ///
    /// let err = Error::backend("stream closed");
    /// assert!(err.to_string().contains("stream closed"));
    /// ```
    pub fn backend(msg: &str) -> Self {
        Error::Backend {
            msg: msg.to_string(),
            position: None,
        }
    }

    /// Creates a backend failure located at `position`.
    pub fn backend_at(position: u64, msg: &str) -> Self {
        Error::Backend {
            msg: msg.to_string(),
            position: Some(position),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidValue(msg.to_string())
    }

    /// Creates an unsupported type error for shapes the codec cannot represent.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Stream offset the error refers to, when one is known.
    #[must_use]
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::StructuralMismatch { position, .. }
            | Error::MalformedNumeral { position, .. }
            | Error::TrailingBytes { position } => Some(*position),
            Error::Backend { position, .. } => *position,
            _ => None,
        }
    }

    /// Rendered context window, for the text-mode parse errors that carry one.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::StructuralMismatch { context, .. } | Error::MalformedNumeral { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StructuralMismatch { .. })
    }

    #[must_use]
    pub fn is_malformed_numeral(&self) -> bool {
        matches!(self, Error::MalformedNumeral { .. })
    }

    #[must_use]
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Backend { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Backend {
            msg: err.to_string(),
            position: None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
