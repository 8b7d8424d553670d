//! Argument constraints and the matcher that applies them.
//!
//! A [`Constraint`] decides whether one argument of a call satisfies one
//! position of an expectation:
//!
//! - a literal value, matched by type and `PartialEq`
//! - a [`TypeTag`], matched by the argument's concrete type
//! - the wildcard [`any`], which matches everything
//! - a named custom predicate, see [`Constraint::custom`]
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::constraint::{any, types, Constraint, Matcher};
//! use testkit_mock::{constraints, Value};
//!
//! let list = constraints!["x", types::number(), any()];
//!
//! assert!(list[0].matches(&Value::new("x")));
//! assert!(list[1].matches(&Value::new(5_u16)));
//! assert!(list[2].matches(&Value::new(None::<i32>)));
//! assert_eq!(list[1].describe(), "Number");
//! ```

pub mod types;

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::value::{Argument, Value};

pub use types::TypeTag;

/// Something that can accept or reject a value and explain itself.
///
/// [`Constraint`] is the implementation used for call arguments; the
/// descriptions feed verification failure messages.
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// One argument position of an expectation or verification query.
#[derive(Clone)]
pub enum Constraint {
    /// Equal to this value (same concrete type, `PartialEq`).
    Literal(Value),
    /// Any value whose concrete type the tag accepts.
    Type(TypeTag),
    /// Any value at all.
    Any,
    /// A named predicate.
    Custom {
        /// Name shown in failure messages.
        name: String,
        /// The test itself.
        predicate: Predicate,
    },
}

impl Constraint {
    /// A literal constraint.
    pub fn literal<T: Argument>(value: T) -> Self {
        Self::Literal(Value::new(value))
    }

    /// A constraint matching exactly the type `T`.
    pub fn of_type<T: std::any::Any>() -> Self {
        Self::Type(TypeTag::of::<T>())
    }

    /// A named predicate over the argument.
    ///
    /// ```rust
    /// use testkit_mock::constraint::{Constraint, Matcher};
    /// use testkit_mock::Value;
    ///
    /// let even = Constraint::custom("Even", |v: &Value| v.get::<i32>().is_some_and(|n| n % 2 == 0));
    /// assert!(even.matches(&Value::new(4)));
    /// assert!(!even.matches(&Value::new(3)));
    /// assert_eq!(even.describe(), "Even");
    /// ```
    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Whether this is the wildcard.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl Matcher<Value> for Constraint {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Type(tag) => tag.accepts(value.as_any()),
            Self::Custom { predicate, .. } => predicate(value),
            Self::Literal(expected) => expected.same_as(value),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Any => "Any".to_string(),
            Self::Type(tag) => tag.name().to_string(),
            Self::Custom { name, .. } => name.clone(),
            Self::Literal(expected) => format!("{expected:?}"),
        }
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        match self {
            Self::Any => "matches anything".to_string(),
            Self::Type(tag) => format!("{value:?} is not a {}", tag.name()),
            Self::Custom { name, .. } => format!("{value:?} does not satisfy {name}"),
            Self::Literal(expected) => format!("{value:?} does not equal {expected:?}"),
        }
    }
}

impl Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// The wildcard constraint.
///
/// ```rust
/// use testkit_mock::constraint::{any, Matcher};
/// use testkit_mock::Value;
///
/// assert!(any().matches(&Value::unit()));
/// assert!(any().matches(&Value::new(vec![1, 2, 3])));
/// ```
#[must_use]
pub fn any() -> Constraint {
    Constraint::Any
}

/// Check a full argument list against a constraint list.
///
/// Arity must match exactly; then every constraint must accept the argument
/// at its position.
pub fn matches_all(constraints: &[Constraint], args: &[Value]) -> bool {
    constraints.len() == args.len()
        && constraints
            .iter()
            .zip(args)
            .all(|(constraint, arg)| constraint.matches(arg))
}

/// Render a constraint list the way failure messages show it.
pub(crate) fn describe_all(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(<Constraint as Matcher<Value>>::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Conversion into a [`Constraint`], used by the
/// [`constraints!`](crate::constraints) macro.
///
/// Plain values become literals; tags, values and constraints convert
/// as themselves.
pub trait IntoConstraint {
    /// Convert into a [`Constraint`].
    fn into_constraint(self) -> Constraint;
}

impl<T: Argument> IntoConstraint for T {
    fn into_constraint(self) -> Constraint {
        Constraint::Literal(Value::new(self))
    }
}

impl IntoConstraint for Constraint {
    fn into_constraint(self) -> Constraint {
        self
    }
}

impl IntoConstraint for TypeTag {
    fn into_constraint(self) -> Constraint {
        Constraint::Type(self)
    }
}

impl IntoConstraint for Value {
    fn into_constraint(self) -> Constraint {
        Constraint::Literal(self)
    }
}

/// Build a `Vec<Constraint>` from literals, type tags and constraints.
///
/// ```rust
/// use testkit_mock::constraint::{any, types};
/// use testkit_mock::constraints;
///
/// let list = constraints!["test", types::string(), any()];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! constraints {
    () => {
        ::std::vec::Vec::<$crate::Constraint>::new()
    };
    ($($constraint:expr),+ $(,)?) => {
        ::std::vec![$($crate::constraint::IntoConstraint::into_constraint($constraint)),+]
    };
}
