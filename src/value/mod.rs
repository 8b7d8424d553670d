//! Type-erased argument and return values.
//!
//! Mocked methods take and return [`Value`]s so that one expectation table
//! can hold calls of any shape. Any `T: Debug + PartialEq + Send + Sync +
//! 'static` converts into a [`Value`]; the unit value `()` stands for "no
//! value" and `Option::None` for an explicit null.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, Value};
//!
//! let values = args!["hello", 42, Value::unit()];
//!
//! assert_eq!(values[0].downcast_ref::<&str>(), Some(&"hello"));
//! assert_eq!(values[1].get::<i32>(), Some(42));
//! assert!(values[2].is_unit());
//! ```

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A value that can be passed to or returned from a mocked method.
///
/// Implemented for every `T: Any + Debug + PartialEq + Send + Sync`.
pub trait Argument: Any + Debug + Send + Sync {
    /// Borrow as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compare with another argument: equal only if both have the same
    /// concrete type and that type's `PartialEq` says so.
    fn eq_argument(&self, other: &dyn Argument) -> bool;

    /// Name of the concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T> Argument for T
where
    T: Any + Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_argument(&self, other: &dyn Argument) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A shared, type-erased [`Argument`].
///
/// Cloning is cheap: clones share the same underlying value.
#[derive(Clone)]
pub struct Value(Arc<dyn Argument>);

impl Value {
    /// Wrap a concrete value.
    pub fn new<T: Argument>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// The unit value, returned by expectations without a behavior.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Check whether this is the unit value.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// Check whether the wrapped value has type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the wrapped value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Clone the wrapped value out as `T`.
    #[must_use]
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Borrow the wrapped value as [`Any`].
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        (*self.0).as_any()
    }

    /// Borrow the wrapped value as an [`Argument`].
    #[must_use]
    pub fn as_argument(&self) -> &dyn Argument {
        &*self.0
    }

    /// Name of the wrapped value's concrete type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }

    /// Compare two values by concrete type and `PartialEq`.
    #[must_use]
    pub fn same_as(&self, other: &Value) -> bool {
        (*self.0).eq_argument(other.as_argument())
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::unit()
    }
}

/// Conversion into a [`Value`], used by the [`args!`](crate::args) macro.
pub trait IntoValue {
    /// Convert into a [`Value`].
    fn into_value(self) -> Value;
}

impl<T: Argument> IntoValue for T {
    fn into_value(self) -> Value {
        Value::new(self)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

/// Build a `Vec<Value>` argument list from heterogeneous values.
///
/// ```rust
/// use testkit_mock::args;
///
/// let call = args!["x", 1, true];
/// assert_eq!(call.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::IntoValue::into_value($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_value_downcast() {
        let value = Value::new(42_i32);
        assert!(value.is::<i32>());
        assert_eq!(value.get::<i32>(), Some(42));
        assert_eq!(value.downcast_ref::<i64>(), None);
    }

    #[test]
    fn test_value_same_as_requires_same_type() {
        assert!(Value::new(1_i32).same_as(&Value::new(1_i32)));
        assert!(!Value::new(1_i32).same_as(&Value::new(2_i32)));
        assert!(!Value::new(1_i32).same_as(&Value::new(1_i64)));
        assert!(!Value::new("1").same_as(&Value::new(String::from("1"))));
    }

    #[test]
    fn test_value_structs_compare_by_partial_eq() {
        let a = Value::new(Point { x: 1, y: 2 });
        let b = Value::new(Point { x: 1, y: 2 });
        let c = Value::new(Point { x: 2, y: 1 });
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn test_value_unit_and_none() {
        assert!(Value::unit().is_unit());
        assert!(Value::default().is_unit());
        assert!(!Value::new(None::<i32>).is_unit());
        assert_eq!(Value::new(None::<i32>).get::<Option<i32>>(), Some(None));
    }

    #[test]
    fn test_value_debug_delegates() {
        assert_eq!(format!("{:?}", Value::new("y")), "\"y\"");
        assert_eq!(format!("{:?}", Value::new(5_u8)), "5");
        assert_eq!(format!("{:?}", Value::unit()), "()");
    }

    #[test]
    fn test_args_macro() {
        let existing = Value::new(7_i32);
        let values = args!["a", existing.clone(), 3.5_f64];
        assert_eq!(values.len(), 3);
        assert!(values[1].same_as(&existing));
        assert!(args![].is_empty());
    }
}
