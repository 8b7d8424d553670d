// Allow must_use_candidate for the cardinality constructors
#![allow(clippy::must_use_candidate)]

//! Call-count ranges and the cardinality helpers that build them.
//!
//! Every expectation and verification carries a [`RepeatRange`]: the
//! inclusive bounds on how many times a call may, and must, happen.
//! Helpers return [`Options`], and applying another helper to an existing
//! [`Options`] narrows its range instead of replacing it.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::repeat::{at_least, never, RepeatRange};
//!
//! let options = at_least(2).at_most(4);
//! assert_eq!(options.repeat_range(), RepeatRange::between(2, 4));
//!
//! assert_eq!(never().repeat_range(), RepeatRange::exactly(0));
//! ```

use std::fmt;

/// Inclusive bounds on a call count. `to == None` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RepeatRange {
    /// Minimum number of calls.
    pub from: usize,
    /// Maximum number of calls, if any.
    pub to: Option<usize>,
}

impl RepeatRange {
    /// The range used when nothing else is specified: exactly once.
    pub const ONCE: Self = Self::exactly(1);

    /// Zero or more calls.
    pub const UNBOUNDED: Self = Self { from: 0, to: None };

    /// Exactly `n` calls.
    pub const fn exactly(n: usize) -> Self {
        Self {
            from: n,
            to: Some(n),
        }
    }

    /// Between `from` and `to` calls, inclusive.
    pub const fn between(from: usize, to: usize) -> Self {
        Self { from, to: Some(to) }
    }

    /// At least `n` calls.
    pub const fn at_least(n: usize) -> Self {
        Self { from: n, to: None }
    }

    /// Narrow this range by another one. The result may be empty when the
    /// two ranges do not overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let to = match (self.to, other.to) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        Self {
            from: self.from.max(other.from),
            to,
        }
    }

    /// Whether `hits` lies within the range.
    pub fn contains(&self, hits: usize) -> bool {
        hits >= self.from && self.to.map_or(true, |to| hits <= to)
    }

    /// Whether one more hit is still allowed after `hits`.
    pub fn allows_another(&self, hits: usize) -> bool {
        self.to.map_or(true, |to| hits < to)
    }

    /// Whether no count can satisfy the range.
    pub fn is_empty(&self) -> bool {
        self.to.is_some_and(|to| to < self.from)
    }
}

impl Default for RepeatRange {
    fn default() -> Self {
        Self::ONCE
    }
}

/// Renders as `2`, `at least 2` or `2 to 4`.
impl fmt::Display for RepeatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) if to == self.from => write!(f, "{to}"),
            Some(to) => write!(f, "{} to {to}", self.from),
            None => write!(f, "at least {}", self.from),
        }
    }
}

/// Options for registering an expectation or running a verification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Allowed call count; `None` falls back to [`RepeatRange::ONCE`].
    pub repeat: Option<RepeatRange>,
}

impl Options {
    /// Options with no range set.
    pub const fn new() -> Self {
        Self { repeat: None }
    }

    /// The effective range.
    pub fn repeat_range(&self) -> RepeatRange {
        self.repeat.unwrap_or_default()
    }

    /// Narrow the range to `range`, or set it if none was set yet.
    #[must_use]
    pub fn with_range(mut self, range: RepeatRange) -> Self {
        self.repeat = Some(match self.repeat {
            Some(current) => current.intersect(range),
            None => range,
        });
        self
    }

    /// Narrow to exactly `n` calls.
    #[must_use]
    pub fn times(self, n: usize) -> Self {
        self.with_range(RepeatRange::exactly(n))
    }

    /// Narrow to between `from` and `to` calls.
    #[must_use]
    pub fn times_between(self, from: usize, to: usize) -> Self {
        self.with_range(RepeatRange::between(from, to))
    }

    /// Narrow to zero calls.
    #[must_use]
    pub fn never(self) -> Self {
        self.times(0)
    }

    /// Narrow to exactly one call.
    #[must_use]
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Narrow to exactly two calls.
    #[must_use]
    pub fn twice(self) -> Self {
        self.times(2)
    }

    /// Narrow to at least `n` calls.
    #[must_use]
    pub fn at_least(self, n: usize) -> Self {
        self.with_range(RepeatRange::at_least(n))
    }

    /// Narrow to at most `n` calls.
    #[must_use]
    pub fn at_most(self, n: usize) -> Self {
        self.with_range(RepeatRange::between(0, n))
    }
}

impl From<RepeatRange> for Options {
    fn from(range: RepeatRange) -> Self {
        Self {
            repeat: Some(range),
        }
    }
}

/// Exactly `n` calls.
pub fn times(n: usize) -> Options {
    Options::new().times(n)
}

/// Between `from` and `to` calls, inclusive.
pub fn times_between(from: usize, to: usize) -> Options {
    Options::new().times_between(from, to)
}

/// No calls at all.
pub fn never() -> Options {
    Options::new().never()
}

/// Exactly one call.
pub fn once() -> Options {
    Options::new().once()
}

/// Exactly two calls.
pub fn twice() -> Options {
    Options::new().twice()
}

/// At least `n` calls.
pub fn at_least(n: usize) -> Options {
    Options::new().at_least(n)
}

/// At most `n` calls.
pub fn at_most(n: usize) -> Options {
    Options::new().at_most(n)
}
