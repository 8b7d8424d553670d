//! Call history: every dispatched call, per method, in call order.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::constraint::{self, Constraint};
use crate::value::Value;

/// A record of a single call (just arguments and timing, no result).
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The arguments passed to the call.
    pub args: Vec<Value>,
    /// Position among all calls recorded on the same target.
    pub sequence: usize,
    /// When the call was made (relative to recorder creation).
    pub timestamp: Duration,
}

impl Invocation {
    /// Whether the call's arguments satisfy `constraints`.
    pub fn matches(&self, constraints: &[Constraint]) -> bool {
        constraint::matches_all(constraints, &self.args)
    }
}

/// Append-only call history of one target.
///
/// Calls are never removed or reordered, so the list of a method is always
/// its exact call order.
#[derive(Debug)]
pub struct InvocationRecorder {
    calls: HashMap<String, Vec<Invocation>>,
    order: Vec<String>,
    total: usize,
    created_at: Instant,
}

impl InvocationRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            calls: HashMap::new(),
            order: Vec::new(),
            total: 0,
            created_at: Instant::now(),
        }
    }

    /// Record a call of `method` with the given arguments.
    pub fn record(&mut self, method: &str, args: Vec<Value>) -> usize {
        let sequence = self.total;
        if !self.calls.contains_key(method) {
            self.order.push(method.to_string());
        }
        self.calls
            .entry(method.to_string())
            .or_default()
            .push(Invocation {
                args,
                sequence,
                timestamp: self.created_at.elapsed(),
            });
        self.total += 1;
        sequence
    }

    /// All recorded calls of `method`.
    pub fn calls(&self, method: &str) -> &[Invocation] {
        self.calls.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of recorded calls of `method`.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls(method).len()
    }

    /// Number of recorded calls across all methods.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.total
    }

    /// Check if `method` was called at least once.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get the Nth call of `method` (0-indexed).
    pub fn nth_call(&self, method: &str, n: usize) -> Option<&Invocation> {
        self.calls(method).get(n)
    }

    /// Get the most recent call of `method`.
    pub fn last_call(&self, method: &str) -> Option<&Invocation> {
        self.calls(method).last()
    }

    /// Count the calls of `method` whose arguments satisfy `constraints`.
    pub fn count_matching(&self, method: &str, constraints: &[Constraint]) -> usize {
        self.calls(method)
            .iter()
            .filter(|call| call.matches(constraints))
            .count()
    }

    /// Check if `method` was called with arguments equal to `args`.
    pub fn was_called_with(&self, method: &str, args: &[Value]) -> bool {
        self.calls(method).iter().any(|call| {
            call.args.len() == args.len()
                && call.args.iter().zip(args).all(|(a, b)| a.same_as(b))
        })
    }

    /// Names of all methods with at least one recorded call, in order of
    /// their first call.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl Default for InvocationRecorder {
    fn default() -> Self {
        Self::new()
    }
}
