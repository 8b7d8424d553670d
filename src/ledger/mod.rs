//! Per-target bookkeeping: registered expectations and recorded calls.
//!
//! Every [`Mock`](crate::Mock) and [`Spy`](crate::Spy) owns one [`Ledger`],
//! shared with its clones, its expectation builders and its verifiers.
//!
//! - [`ExpectationRegistry`] - expectations per method, in registration order
//! - [`InvocationRecorder`] - calls per method, in call order

mod expectation;
mod recorder;

use std::sync::Arc;

use parking_lot::Mutex;

pub use expectation::{Behavior, Expectation, ExpectationId, ExpectationRegistry, Mode};
pub(crate) use expectation::first_candidate;
pub use recorder::{Invocation, InvocationRecorder};

/// Shared handle to a ledger.
pub type SharedLedger = Arc<Mutex<Ledger>>;

/// The expectations and call history of one target.
#[derive(Debug, Default)]
pub struct Ledger {
    pub(crate) expectations: ExpectationRegistry,
    pub(crate) invocations: InvocationRecorder,
}

impl Ledger {
    /// Create an empty ledger behind a shared handle.
    pub fn shared() -> SharedLedger {
        Arc::new(Mutex::new(Self::default()))
    }

    /// The registered expectations.
    pub fn expectations(&self) -> &ExpectationRegistry {
        &self.expectations
    }

    /// The recorded calls.
    pub fn invocations(&self) -> &InvocationRecorder {
        &self.invocations
    }
}

/// Anything that owns a ledger: the handle expectation builders and
/// verifiers work through.
pub trait Target {
    /// The target's shared ledger.
    fn ledger(&self) -> &SharedLedger;

    /// Get all recorded calls of `method`.
    fn calls(&self, method: &str) -> Vec<Invocation> {
        self.ledger().lock().invocations.calls(method).to_vec()
    }

    /// Get the number of recorded calls of `method`.
    fn call_count(&self, method: &str) -> usize {
        self.ledger().lock().invocations.call_count(method)
    }

    /// Check if `method` was called at least once.
    fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get the Nth recorded call of `method` (0-indexed).
    fn nth_call(&self, method: &str, n: usize) -> Option<Invocation> {
        self.ledger().lock().invocations.nth_call(method, n).cloned()
    }

    /// Get the most recent call of `method`.
    fn last_call(&self, method: &str) -> Option<Invocation> {
        self.ledger().lock().invocations.last_call(method).cloned()
    }
}
