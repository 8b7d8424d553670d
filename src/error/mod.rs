//! Error definitions
//!
//! This module provides error types for testkit-mock.

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::repeat::RepeatRange;
use crate::value::Value;

/// Main error type for testkit-mock
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A mocked call matched no eligible expectation
    #[error("No expectation of method \"{method}\" matches given arguments available")]
    UnmatchedCall {
        /// The called method
        method: String,
    },

    /// A matched expectation was scripted to fail with this value
    #[error("Scripted failure: {0:?}")]
    Scripted(Value),

    /// A call count fell outside its expected range
    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    /// The target defines no method with this name
    #[error("Method \"{method}\" is not defined on the target")]
    NoSuchMethod {
        /// The requested method
        method: String,
    },
}

impl Error {
    /// Create an unmatched call error.
    #[must_use]
    pub fn unmatched_call(method: impl Into<String>) -> Self {
        Self::UnmatchedCall {
            method: method.into(),
        }
    }

    /// Create a no-such-method error.
    #[must_use]
    pub fn no_such_method(method: impl Into<String>) -> Self {
        Self::NoSuchMethod {
            method: method.into(),
        }
    }

    /// Borrow the scripted failure value as `T`, if this is one.
    ///
    /// ```rust
    /// use testkit_mock::{Error, Value};
    ///
    /// let err = Error::Scripted(Value::new("boom"));
    /// assert_eq!(err.scripted::<&str>(), Some(&"boom"));
    /// assert_eq!(err.scripted::<i32>(), None);
    /// ```
    #[must_use]
    pub fn scripted<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Scripted(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// The method this error concerns, if any.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::UnmatchedCall { method } | Self::NoSuchMethod { method } => Some(method),
            Self::Verification(failure) => Some(&failure.method),
            Self::Scripted(_) => None,
        }
    }
}

/// A call count outside its expected range.
///
/// Renders as, for example:
/// `Expecting method "bar" to be called with arguments ("y") for 2 time(s) instead of 1 time(s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFailure {
    /// The verified method.
    pub method: String,
    /// The rendered constraint list, empty for a call without arguments.
    pub arguments: String,
    /// The range the count had to fall in.
    pub expected: RepeatRange,
    /// The observed count.
    pub actual: usize,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expecting method \"{}\" to be called with ", self.method)?;
        if self.arguments.is_empty() {
            f.write_str("no argument")?;
        } else {
            write!(f, "arguments ({})", self.arguments)?;
        }
        write!(f, " for {} time(s)", self.expected)?;
        if self.actual > 0 {
            write!(f, " instead of {} time(s)", self.actual)?;
        }
        Ok(())
    }
}

impl std::error::Error for VerificationFailure {}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
