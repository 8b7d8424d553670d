//! Registration of expectations.
//!
//! - [`when`] / [`whenever`] - script a [`Mock`]'s responses
//! - [`expect`] - declare the calls a [`Spy`](crate::Spy) (or mock) should
//!   see, for [`verify_all`](crate::verify_all)
//!
//! Registration order is matching priority: the first eligible
//! expectation serves a call, so stacking expectations with the same
//! constraints scripts a sequence of responses.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, constraints, types, when, whenever, Mock, Proxy};
//!
//! let foo = Mock::new();
//! when(&foo).method("bar", constraints![types::string()]).returns("s");
//! whenever(&foo).method("bar", constraints![types::number()]).returns("n");
//!
//! assert_eq!(foo.invoke("bar", args![5]).unwrap().get::<&str>(), Some("n"));
//! assert_eq!(foo.invoke("bar", args![6]).unwrap().get::<&str>(), Some("n"));
//! assert_eq!(foo.invoke("bar", args!["z"]).unwrap().get::<&str>(), Some("s"));
//! assert!(foo.invoke("bar", args![true]).is_err());
//! ```

use tracing::debug;

use crate::constraint::{self, Constraint};
use crate::error::Result;
use crate::ledger::{Behavior, Expectation, ExpectationId, Mode, SharedLedger, Target};
use crate::mock::{Mock, Proxy};
use crate::repeat::{Options, RepeatRange};
use crate::value::{IntoValue, Value};

fn register(
    ledger: &SharedLedger,
    mode: Mode,
    method: &str,
    constraints: Vec<Constraint>,
    repeat: RepeatRange,
) -> ExpectationId {
    debug!(
        method = %method,
        ?mode,
        arguments = %constraint::describe_all(&constraints),
        repeat = %repeat,
        "registering expectation"
    );
    ledger
        .lock()
        .expectations
        .register(method, Expectation::new(mode, constraints, repeat))
}

/// Registers mock expectations on one [`Mock`].
#[derive(Debug, Clone)]
pub struct ExpectationBuilder {
    ledger: SharedLedger,
    repeat: RepeatRange,
}

impl ExpectationBuilder {
    /// Expect a call of `method` with arguments satisfying `constraints`.
    ///
    /// The returned query sets what the call does; without one the call
    /// returns the unit value.
    pub fn method(&self, method: &str, constraints: Vec<Constraint>) -> ExpectationQuery {
        let id = register(&self.ledger, Mode::Mock, method, constraints, self.repeat);
        ExpectationQuery {
            ledger: self.ledger.clone(),
            id,
        }
    }

    /// The range every expectation from this builder gets.
    pub fn repeat(&self) -> RepeatRange {
        self.repeat
    }
}

/// Sets the behavior of one registered mock expectation.
///
/// The behaviors are mutually exclusive; the last one set wins.
#[derive(Debug, Clone)]
pub struct ExpectationQuery {
    ledger: SharedLedger,
    id: ExpectationId,
}

impl ExpectationQuery {
    /// Return `value` from matching calls.
    pub fn returns(&self, value: impl IntoValue) -> &Self {
        self.set(Behavior::Return(value.into_value()))
    }

    /// Fail matching calls with [`Error::Scripted`](crate::Error::Scripted)
    /// carrying `error`.
    ///
    /// ```rust
    /// use testkit_mock::{args, constraints, when, Error, Mock, Proxy};
    ///
    /// let foo = Mock::new();
    /// when(&foo).method("bar", constraints!["test"]).throws("yo");
    ///
    /// let err = foo.invoke("bar", args!["test"]).unwrap_err();
    /// assert_eq!(err.scripted::<&str>(), Some(&"yo"));
    /// ```
    pub fn throws(&self, error: impl IntoValue) -> &Self {
        self.set(Behavior::Throw(error.into_value()))
    }

    /// Compute the result of matching calls with `delegate`, which receives
    /// the mock as receiver and the call's arguments.
    ///
    /// ```rust
    /// use testkit_mock::{any, args, constraints, when, Mock, Proxy, Value};
    ///
    /// let foo = Mock::new();
    /// when(&foo).method("bar", constraints![any(), any()]).then(|_, args| {
    ///     let a = args[0].get::<&str>().unwrap_or_default();
    ///     let b = args[1].get::<&str>().unwrap_or_default();
    ///     Ok(Value::new(format!("{a}{b}")))
    /// });
    ///
    /// let result = foo.invoke("bar", args!["test", "hahaha"]).unwrap();
    /// assert_eq!(result.get::<String>().as_deref(), Some("testhahaha"));
    /// ```
    pub fn then<F>(&self, delegate: F) -> &Self
    where
        F: Fn(&dyn Proxy, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.set(Behavior::Delegate(std::sync::Arc::new(delegate)))
    }

    /// Handle to the registered expectation.
    pub fn id(&self) -> &ExpectationId {
        &self.id
    }

    /// How many calls the expectation has served so far.
    pub fn hits(&self) -> usize {
        self.ledger
            .lock()
            .expectations
            .get(&self.id)
            .map_or(0, Expectation::hits)
    }

    fn set(&self, behavior: Behavior) -> &Self {
        if let Some(expectation) = self.ledger.lock().expectations.get_mut(&self.id) {
            expectation.behavior = behavior;
        }
        self
    }
}

/// Registers spy expectations, which only count matching calls.
#[derive(Debug, Clone)]
pub struct SpyExpectationBuilder {
    ledger: SharedLedger,
    repeat: RepeatRange,
}

impl SpyExpectationBuilder {
    /// Expect a call of `method` with arguments satisfying `constraints`.
    pub fn method(&self, method: &str, constraints: Vec<Constraint>) -> &Self {
        register(&self.ledger, Mode::Spy, method, constraints, self.repeat);
        self
    }

    /// The range every expectation from this builder gets.
    pub fn repeat(&self) -> RepeatRange {
        self.repeat
    }
}

/// Script `mock`; each expectation serves exactly one call.
pub fn when(mock: &Mock) -> ExpectationBuilder {
    when_with(mock, Options::default())
}

/// Script `mock` with a custom call range per expectation.
///
/// ```rust
/// use testkit_mock::{args, constraints, twice, when_with, Mock, Proxy};
///
/// let foo = Mock::new();
/// when_with(&foo, twice()).method("bar", constraints![]).returns(1);
///
/// assert!(foo.invoke("bar", args![]).is_ok());
/// assert!(foo.invoke("bar", args![]).is_ok());
/// assert!(foo.invoke("bar", args![]).is_err());
/// ```
pub fn when_with(mock: &Mock, options: Options) -> ExpectationBuilder {
    ExpectationBuilder {
        ledger: mock.ledger().clone(),
        repeat: options.repeat_range(),
    }
}

/// Script `mock` with expectations that serve any number of calls.
pub fn whenever(mock: &Mock) -> ExpectationBuilder {
    when_with(mock, RepeatRange::UNBOUNDED.into())
}

/// Declare calls `target` should see; each expectation expects exactly one.
pub fn expect<T: Target + ?Sized>(target: &T) -> SpyExpectationBuilder {
    expect_with(target, Options::default())
}

/// Declare calls `target` should see, with a custom call range.
pub fn expect_with<T: Target + ?Sized>(target: &T, options: Options) -> SpyExpectationBuilder {
    SpyExpectationBuilder {
        ledger: target.ledger().clone(),
        repeat: options.repeat_range(),
    }
}
