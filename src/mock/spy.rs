// Allow must_use_candidate for the spy constructors
#![allow(clippy::must_use_candidate)]

//! Spies: every call is recorded, then forwarded to the real method.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, spy, Object, Proxy, Target, Value};
//!
//! let doubler = spy(Object::new().with_method("double", |_, args| {
//!     Ok(Value::new(args[0].get::<i32>().unwrap_or(0) * 2))
//! }));
//!
//! let result = doubler.invoke("double", args![5]).unwrap();
//! assert_eq!(result.get::<i32>(), Some(10));
//!
//! assert!(doubler.was_called("double"));
//! assert_eq!(doubler.call_count("double"), 1);
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

use super::dispatch;
use super::object::{Object, Proxy};
use crate::error::{Error, Result};
use crate::ledger::{Ledger, SharedLedger, Target};
use crate::value::Value;

/// A spy wrapping a target [`Object`].
///
/// Expectations registered through [`expect`](crate::expect) only count
/// matching calls; they never change what a call returns.
///
/// Clones share the same expectations and call history.
#[derive(Clone)]
pub struct Spy {
    target: Arc<Object>,
    ledger: SharedLedger,
}

impl Spy {
    /// Create a new spy wrapping the given object.
    pub fn new(target: Object) -> Self {
        Self {
            target: Arc::new(target),
            ledger: Ledger::shared(),
        }
    }

    /// The wrapped object.
    pub fn target(&self) -> &Object {
        &self.target
    }
}

impl Proxy for Spy {
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let real = self
            .target
            .method(method)
            .ok_or_else(|| Error::no_such_method(method))?;
        dispatch::spied(self, &self.ledger, method, &**real, args)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.target.property(name)
    }
}

impl Target for Spy {
    fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }
}

impl Debug for Spy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (expectations, calls) = {
            let ledger = self.ledger.lock();
            (ledger.expectations().len(), ledger.invocations().total_calls())
        };
        f.debug_struct("Spy")
            .field("target", &self.target)
            .field("expectations", &expectations)
            .field("call_count", &calls)
            .finish()
    }
}

/// Spy on `target`.
pub fn spy(target: Object) -> Spy {
    Spy::new(target)
}
