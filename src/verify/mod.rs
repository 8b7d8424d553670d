//! Post-hoc verification of call counts.
//!
//! Two shapes of verification:
//!
//! - [`verify_all`] - replay every registered expectation of a target and
//!   check its hit count against its range
//! - [`Verifier::method`] - count the recorded calls matching a constraint
//!   list and check that count against the verifier's range
//!
//! A failure is an [`Error::Verification`] whose message names the method,
//! the constraints and the expected and observed counts. Use
//! [`assert_verified!`](crate::assert_verified) to turn it into a panic.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, constraints, expect_with, spy, times, verify_all, Object, Proxy, Value};
//!
//! let foo = spy(Object::new().with_method("bar", |_, _| Ok(Value::unit())));
//! expect_with(&foo, times(2)).method("bar", constraints!["y"]);
//!
//! foo.invoke("bar", args!["y"]).unwrap();
//! let err = verify_all(&foo).unwrap_err();
//! assert!(err.to_string().contains("for 2 time(s) instead of 1 time(s)"));
//!
//! foo.invoke("bar", args!["y"]).unwrap();
//! assert!(verify_all(&foo).is_ok());
//! ```

use tracing::debug;

use crate::constraint::{self, Constraint};
use crate::error::{Error, Result, VerificationFailure};
use crate::ledger::{Expectation, SharedLedger, Target};
use crate::repeat::{Options, RepeatRange};

/// Check `hits` against `expected`.
fn validate(
    method: &str,
    constraints: &[Constraint],
    hits: usize,
    expected: RepeatRange,
) -> Result<()> {
    if expected.contains(hits) {
        return Ok(());
    }
    let failure = VerificationFailure {
        method: method.to_string(),
        arguments: constraint::describe_all(constraints),
        expected,
        actual: hits,
    };
    debug!(method = %method, hits, expected = %expected, "verification failed");
    Err(Error::Verification(failure))
}

/// Check every expectation in order, stopping at the first one out of
/// range.
fn replay(expectations: &[(String, Expectation)]) -> Result<()> {
    expectations
        .iter()
        .try_for_each(|(method, expectation)| {
            validate(
                method,
                expectation.constraints(),
                expectation.hits(),
                expectation.repeat(),
            )
        })
}

/// Runs verification queries against one target.
#[derive(Debug, Clone)]
pub struct Verifier {
    ledger: SharedLedger,
    repeat: RepeatRange,
}

impl Verifier {
    /// Check how many recorded calls of `method` satisfy `constraints`.
    ///
    /// ```rust
    /// use testkit_mock::{args, constraints, mock_any, once, twice, types, verify, verify_with, Object, Proxy};
    ///
    /// let foo = mock_any(Object::new());
    /// foo.invoke("bar", args!["a"]).unwrap();
    /// foo.invoke("bar", args!["b"]).unwrap();
    ///
    /// assert!(verify_with(&foo, twice()).method("bar", constraints![types::string()]).is_ok());
    /// assert!(verify_with(&foo, once()).method("bar", constraints!["a"]).is_ok());
    /// assert!(verify(&foo).method("yo", constraints![]).is_err());
    /// assert!(verify_with(&foo, twice()).method("bar", constraints!["a"]).is_err());
    /// ```
    pub fn method(&self, method: &str, constraints: Vec<Constraint>) -> Result<&Self> {
        let calls = self.ledger.lock().invocations.calls(method).to_vec();
        let hits = calls.iter().filter(|call| call.matches(&constraints)).count();
        validate(method, &constraints, hits, self.repeat)?;
        Ok(self)
    }

    /// Check every registered expectation of the target.
    pub fn replay(&self) -> Result<&Self> {
        let expectations = self.ledger.lock().expectations.snapshot();
        replay(&expectations)?;
        Ok(self)
    }

    /// The range [`Verifier::method`] checks against.
    #[must_use]
    pub fn repeat(&self) -> RepeatRange {
        self.repeat
    }
}

/// Query `target`'s calls; each query expects exactly one matching call.
pub fn verify<T: Target + ?Sized>(target: &T) -> Verifier {
    verify_with(target, Options::default())
}

/// Query `target`'s calls with a custom expected range.
pub fn verify_with<T: Target + ?Sized>(target: &T, options: Options) -> Verifier {
    Verifier {
        ledger: target.ledger().clone(),
        repeat: options.repeat_range(),
    }
}

/// Check every expectation registered on `target`, then return a verifier
/// for further queries.
///
/// # Errors
///
/// Returns [`Error::Verification`] for the first expectation whose hit
/// count is outside its range.
pub fn verify_all<T: Target + ?Sized>(target: &T) -> Result<Verifier> {
    let verifier = verify(target);
    verifier.replay()?;
    Ok(verifier)
}

/// Assert that a verification succeeded.
///
/// # Panics
///
/// Panics with the rendered failure if the result is an error.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{assert_verified, args, constraints, expect, spy, verify_all, Object, Proxy, Value};
///
/// let foo = spy(Object::new().with_method("bar", |_, _| Ok(Value::unit())));
/// expect(&foo).method("bar", constraints!["test"]);
/// foo.invoke("bar", args!["test"]).unwrap();
///
/// assert_verified!(verify_all(&foo));
/// ```
#[macro_export]
macro_rules! assert_verified {
    ($result:expr) => {{
        if let ::std::result::Result::Err(err) = $result {
            panic!("verification failed: {}", err);
        }
    }};
    ($result:expr, $($arg:tt)+) => {{
        if let ::std::result::Result::Err(err) = $result {
            panic!(
                "verification failed: {}\n  message: {}",
                err,
                format_args!($($arg)+)
            );
        }
    }};
}
