//! Registered expectations and the registry that orders them.

use std::collections::HashMap;
use std::fmt::{self, Debug};

use crate::constraint::{self, Constraint};
use crate::error::{Error, Result};
use crate::mock::{Method, Proxy};
use crate::repeat::RepeatRange;
use crate::value::Value;

/// Whether an expectation drives a mock or only tracks a spy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Supplies the call's behavior and gates dispatch.
    Mock,
    /// Only counts matching calls for verification.
    Spy,
}

/// What a matched mock call does.
#[derive(Clone, Default)]
pub enum Behavior {
    /// Return the unit value.
    #[default]
    Unset,
    /// Return this value.
    Return(Value),
    /// Fail with [`Error::Scripted`] carrying this value.
    Throw(Value),
    /// Call this function with the receiver and the arguments.
    Delegate(Method),
}

impl Behavior {
    pub(crate) fn run(&self, receiver: &dyn Proxy, args: &[Value]) -> Result<Value> {
        match self {
            Self::Delegate(method) => method(receiver, args),
            Self::Throw(error) => Err(Error::Scripted(error.clone())),
            Self::Return(value) => Ok(value.clone()),
            Self::Unset => Ok(Value::unit()),
        }
    }
}

impl Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Self::Throw(value) => f.debug_tuple("Throw").field(value).finish(),
            Self::Delegate(_) => f.write_str("Delegate(..)"),
        }
    }
}

/// One registered expectation.
#[derive(Debug, Clone)]
pub struct Expectation {
    mode: Mode,
    constraints: Vec<Constraint>,
    pub(crate) behavior: Behavior,
    repeat: RepeatRange,
    pub(crate) hits: usize,
}

impl Expectation {
    pub(crate) fn new(mode: Mode, constraints: Vec<Constraint>, repeat: RepeatRange) -> Self {
        Self {
            mode,
            constraints,
            behavior: Behavior::Unset,
            repeat,
            hits: 0,
        }
    }

    /// The expectation's mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The argument constraints, one per position.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The configured behavior.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// The allowed call count.
    pub fn repeat(&self) -> RepeatRange {
        self.repeat
    }

    /// How many calls this expectation has served.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Whether the hit count currently lies within the repeat range.
    pub fn is_satisfied(&self) -> bool {
        self.repeat.contains(self.hits)
    }

    /// Whether the expectation may count another call, whatever its
    /// arguments.
    ///
    /// Mock expectations stop being eligible once their range is used up,
    /// and an empty range is never eligible.
    pub fn is_eligible(&self) -> bool {
        match self.mode {
            Mode::Spy => true,
            Mode::Mock => !self.repeat.is_empty() && self.repeat.allows_another(self.hits),
        }
    }

    /// Whether a call with `args` may be served by this expectation now.
    pub fn is_candidate(&self, args: &[Value]) -> bool {
        self.is_eligible() && constraint::matches_all(&self.constraints, args)
    }
}

/// Position of the first expectation in `expectations` that can serve `args`.
///
/// Runs the constraints, so callers must not hold the ledger lock.
pub(crate) fn first_candidate(expectations: &[Expectation], args: &[Value]) -> Option<usize> {
    expectations
        .iter()
        .position(|expectation| expectation.is_candidate(args))
}

/// Handle to one registered expectation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpectationId {
    method: String,
    index: usize,
}

impl ExpectationId {
    pub(crate) fn new(method: &str, index: usize) -> Self {
        Self {
            method: method.to_string(),
            index,
        }
    }

    /// The method the expectation belongs to.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Position in that method's registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Per-method expectation lists, kept in registration order.
#[derive(Debug, Default)]
pub struct ExpectationRegistry {
    groups: HashMap<String, Vec<Expectation>>,
    order: Vec<String>,
}

impl ExpectationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expectation to `method`'s list.
    pub fn register(&mut self, method: &str, expectation: Expectation) -> ExpectationId {
        if !self.groups.contains_key(method) {
            self.order.push(method.to_string());
        }
        let group = self.groups.entry(method.to_string()).or_default();
        group.push(expectation);
        ExpectationId::new(method, group.len() - 1)
    }

    /// Whether any expectation was registered for `method`.
    pub fn contains(&self, method: &str) -> bool {
        self.groups.contains_key(method)
    }

    /// The expectations of `method`, in registration order.
    pub fn for_method(&self, method: &str) -> &[Expectation] {
        self.groups.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up an expectation.
    pub fn get(&self, id: &ExpectationId) -> Option<&Expectation> {
        self.groups.get(&id.method)?.get(id.index)
    }

    pub(crate) fn get_mut(&mut self, id: &ExpectationId) -> Option<&mut Expectation> {
        self.groups.get_mut(&id.method)?.get_mut(id.index)
    }

    /// Copy out every expectation with its method, in [`iter`](Self::iter)
    /// order.
    pub(crate) fn snapshot(&self) -> Vec<(String, Expectation)> {
        self.iter()
            .map(|(method, expectation)| (method.to_string(), expectation.clone()))
            .collect()
    }

    /// Every expectation, grouped by method in the order methods were first
    /// registered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expectation)> {
        self.order.iter().flat_map(move |method| {
            self.for_method(method)
                .iter()
                .map(move |expectation| (method.as_str(), expectation))
        })
    }

    /// Total number of registered expectations.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
