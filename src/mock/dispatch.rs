//! Routing of live calls through the expectation registry.
//!
//! The ledger lock is never held while user code runs: constraints are
//! matched against a copy of the method's expectations, and behaviors and
//! real methods run after the call is recorded. All of them may call back
//! into the proxy that dispatched them.

use tracing::{debug, trace};

use super::object::{MethodFn, Proxy};
use crate::error::{Error, Result};
use crate::ledger::{first_candidate, Behavior, ExpectationId, SharedLedger};
use crate::value::Value;

/// Count a hit against the first expectation of `method` that can serve
/// `args`, returning its behavior.
fn claim(ledger: &SharedLedger, method: &str, args: &[Value]) -> Option<Behavior> {
    loop {
        let candidates = ledger.lock().expectations.for_method(method).to_vec();
        let index = first_candidate(&candidates, args)?;

        let mut guard = ledger.lock();
        let expectation = guard
            .expectations
            .get_mut(&ExpectationId::new(method, index))?;
        if expectation.is_eligible() {
            expectation.hits += 1;
            return Some(expectation.behavior.clone());
        }
        // used up by a concurrent call since the copy was taken
        trace!(method = %method, index, "expectation exhausted while matching, retrying");
    }
}

/// Serve a mocked call from the first eligible expectation.
pub(crate) fn mocked(
    receiver: &dyn Proxy,
    ledger: &SharedLedger,
    method: &str,
    args: Vec<Value>,
) -> Result<Value> {
    let Some(behavior) = claim(ledger, method, &args) else {
        debug!(method = %method, arity = args.len(), "no expectation matches mocked call");
        return Err(Error::unmatched_call(method));
    };
    let sequence = ledger.lock().invocations.record(method, args.clone());
    trace!(method = %method, sequence, "recorded mocked call");
    behavior.run(receiver, &args)
}

/// Record a spied call, count it against the first matching expectation if
/// there is one, then run the real method.
pub(crate) fn spied(
    receiver: &dyn Proxy,
    ledger: &SharedLedger,
    method: &str,
    real: &MethodFn,
    args: Vec<Value>,
) -> Result<Value> {
    if claim(ledger, method, &args).is_none() {
        debug!(method = %method, "spied call matches no expectation");
    }
    let sequence = ledger.lock().invocations.record(method, args.clone());
    trace!(method = %method, sequence, "recorded spied call");
    real(receiver, &args)
}

/// The stand-in method of auto-spied names.
pub(crate) fn noop(_receiver: &dyn Proxy, _args: &[Value]) -> Result<Value> {
    Ok(Value::unit())
}
