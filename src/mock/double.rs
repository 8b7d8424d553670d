//! Mock objects: calls with registered expectations are scripted, the rest
//! pass through to the target.

use std::fmt::{self, Debug};
use std::sync::Arc;

use super::dispatch;
use super::object::{Object, Proxy};
use crate::error::Result;
use crate::ledger::{Ledger, SharedLedger, Target};
use crate::value::Value;

/// A mock wrapping a target [`Object`].
///
/// A call to a method with at least one expectation registered through
/// [`when`](crate::when) is served by the first eligible expectation, or
/// fails with [`Error::UnmatchedCall`](crate::Error::UnmatchedCall). Calls
/// to other methods go to the target unrecorded.
///
/// Clones share the same expectations and call history.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{args, constraints, when, Mock, Proxy};
///
/// let foo = Mock::new();
/// when(&foo).method("bar", constraints!["x"]).returns(1);
///
/// assert_eq!(foo.invoke("bar", args!["x"]).unwrap().get::<i32>(), Some(1));
/// assert!(foo.invoke("bar", args!["x"]).is_err());
/// ```
#[derive(Clone)]
pub struct Mock {
    target: Arc<Object>,
    ledger: SharedLedger,
    mock_any: bool,
}

impl Mock {
    /// Mock an empty object.
    pub fn new() -> Self {
        Self::wrap(Object::new())
    }

    /// Mock `target`.
    pub fn wrap(target: Object) -> Self {
        Self {
            target: Arc::new(target),
            ledger: Ledger::shared(),
            mock_any: false,
        }
    }

    /// Mock `target`, auto-spying any method name it does not define
    /// against a no-op that returns the unit value.
    pub fn wrap_any(target: Object) -> Self {
        Self {
            mock_any: true,
            ..Self::wrap(target)
        }
    }

    /// The wrapped object.
    pub fn target(&self) -> &Object {
        &self.target
    }

    /// Whether undefined method names are auto-spied.
    #[must_use]
    pub fn is_mock_any(&self) -> bool {
        self.mock_any
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl Proxy for Mock {
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let expected = self.ledger.lock().expectations.contains(method);
        if expected {
            return dispatch::mocked(self, &self.ledger, method, args);
        }
        if self.mock_any && !self.target.defines(method) {
            return dispatch::spied(self, &self.ledger, method, &dispatch::noop, args);
        }
        self.target.call(self, method, &args)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.target.property(name)
    }
}

impl Target for Mock {
    fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }
}

impl Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (expectations, calls) = {
            let ledger = self.ledger.lock();
            (ledger.expectations().len(), ledger.invocations().total_calls())
        };
        f.debug_struct("Mock")
            .field("target", &self.target)
            .field("mock_any", &self.mock_any)
            .field("expectations", &expectations)
            .field("calls", &calls)
            .finish()
    }
}

/// Mock `target`.
pub fn mock(target: Object) -> Mock {
    Mock::wrap(target)
}

/// Mock `target`, auto-spying every method name it does not define.
///
/// ```rust
/// use testkit_mock::{args, constraints, mock_any, verify_with, twice, Object, Proxy};
///
/// let foo = mock_any(Object::new());
/// foo.invoke("bar", args!["a"]).unwrap();
/// foo.invoke("bar", args!["b"]).unwrap();
///
/// assert!(verify_with(&foo, twice()).method("bar", constraints![testkit_mock::types::string()]).is_ok());
/// ```
pub fn mock_any(target: Object) -> Mock {
    Mock::wrap_any(target)
}
