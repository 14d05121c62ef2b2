//! Rejection diagnostics.
//!
//! Every way a stream can fail validation collapses into the single Rejected
//! verdict. The variants only exist to produce the right diagnostic line and
//! to let tests assert which rule fired.

use std::fmt;
use thiserror::Error;

/// Why a stream was rejected. The `Display` output is the diagnostic line.
#[derive(Error, Debug)]
pub enum Rejection {
    #[error("Expected {expected}, found nothing")]
    Missing { expected: String },

    #[error("Expected {expected}, found whitespace")]
    Whitespace { expected: String },

    #[error("Expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    #[error("Number {token} does not fit in a 64-bit signed integer")]
    Overflow { token: String },

    #[error("Parsing {token} as a 64-bit signed integer failed")]
    Malformed { token: String },

    #[error("Expected EOF, found {found}")]
    TrailingContent { found: String },

    #[error("{0}")]
    Custom(String),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`Rejection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The stream ended while a token was required
    EarlyEof,
    /// Whitespace where a token was required (strict mode)
    UnexpectedWhitespace,
    /// Literal, length, shape or range mismatch
    Mismatch,
    /// Integer too large for 64 bits
    Overflow,
    /// Integer conversion failed
    Malformed,
    /// Data left after the last expected token
    TrailingContent,
    /// Free-form client message
    Custom,
    /// The stream itself failed
    Io,
}

impl Rejection {
    /// Reject with an expected/found pair.
    ///
    /// An empty `found` degrades to a bare `expected` message, and two empty
    /// strings give an empty diagnostic.
    pub fn expected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        let expected = expected.into();
        let found = found.into();
        if found.is_empty() {
            Self::Custom(expected)
        } else {
            Self::Mismatch { expected, found }
        }
    }

    /// Reject with a free-form message.
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::Missing { .. } => RejectionKind::EarlyEof,
            Self::Whitespace { .. } => RejectionKind::UnexpectedWhitespace,
            Self::Mismatch { .. } => RejectionKind::Mismatch,
            Self::Overflow { .. } => RejectionKind::Overflow,
            Self::Malformed { .. } => RejectionKind::Malformed,
            Self::TrailingContent { .. } => RejectionKind::TrailingContent,
            Self::Custom(_) => RejectionKind::Custom,
            Self::Io(_) => RejectionKind::Io,
        }
    }
}

/// Reject with the concatenation of every argument's `Display` output.
///
/// Expands to an early `return Err(..)`, so code after it never runs. The
/// error converts through `From`, so it works in functions returning either
/// `Result<_, Rejection>` or an error type that wraps it.
///
/// ```
/// use streamcheck_core::{fail, Rejection};
///
/// fn check(n: i64) -> Result<(), Rejection> {
///     if n % 2 != 0 {
///         fail!("Number ", n, " is odd");
///     }
///     Ok(())
/// }
///
/// assert_eq!(check(3).unwrap_err().to_string(), "Number 3 is odd");
/// ```
#[macro_export]
macro_rules! fail {
    ($($part:expr),+ $(,)?) => {{
        let mut message = ::std::string::String::new();
        $(
            {
                use ::std::fmt::Write as _;
                let _ = ::std::write!(message, "{}", $part);
            }
        )+
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::Rejection::Custom(message),
        ));
    }};
}
