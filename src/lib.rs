//! # testkit-mock 🧰
//!
//! > Mocks, spies and call verification for Rust tests
//!
//! **testkit-mock** wraps plain method tables in test doubles that script
//! responses, record calls and check call counts after the fact.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_mock::prelude::*;
//!
//! let foo = Mock::new();
//! when(&foo).method("bar", constraints!["test"]).returns("result");
//!
//! let result = foo.invoke("bar", args!["test"]).unwrap();
//! assert_eq!(result.get::<&str>(), Some("result"));
//!
//! assert_verified!(verify_all(&foo));
//! ```
//!
//! ## Features
//!
//! - 🎭 **Mocks** - Scripted returns, failures and delegates per argument list
//! - 🔍 **Spies** - Record every call and forward it to the real method
//! - 🧩 **Constraints** - Literal, type, wildcard and custom argument matching
//! - 🔢 **Cardinality** - `times`, `never`, `at_least`, `at_most` and friends
//! - ✅ **Verification** - Replay expectations or query recorded calls

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constraint;
pub mod error;
pub mod expect;
pub mod ledger;
pub mod mock;
pub mod repeat;
pub mod value;
pub mod verify;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_mock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::constraint::{any, types, Constraint, IntoConstraint};
    pub use crate::error::{Error, Result};
    pub use crate::expect::{expect, expect_with, when, when_with, whenever};
    pub use crate::ledger::Target;
    pub use crate::mock::{mock, mock_any, spy, Mock, Object, Proxy, Spy};
    pub use crate::repeat::{at_least, at_most, never, once, times, times_between, twice};
    pub use crate::value::{IntoValue, Value};
    pub use crate::verify::{verify, verify_all, verify_with};
    pub use crate::{args, assert_verified, constraints};
}

// Re-exports
pub use constraint::{any, types, Constraint, IntoConstraint, Matcher};
pub use error::{Error, Result, VerificationFailure};
pub use expect::{
    expect, expect_with, when, when_with, whenever, ExpectationBuilder, ExpectationQuery,
    SpyExpectationBuilder,
};
pub use ledger::{Invocation, Target};
pub use mock::{mock, mock_any, spy, Method, Mock, Object, Proxy, Spy};
pub use repeat::{
    at_least, at_most, never, once, times, times_between, twice, Options, RepeatRange,
};
pub use value::{IntoValue, Value};
pub use verify::{verify, verify_all, verify_with, Verifier};
