//! Type tags: constraints that match by the argument's concrete type.

use std::any::Any;
use std::fmt::{self, Debug};

type TypeTest = fn(&dyn Any) -> bool;

fn is_type<T: Any>(value: &dyn Any) -> bool {
    value.is::<T>()
}

/// A named set of concrete types an argument may have.
///
/// # Example
///
/// ```rust
/// use testkit_mock::constraint::types::{self, TypeTag};
///
/// let tag = types::string();
/// assert!(tag.accepts(&"text"));
/// assert!(tag.accepts(&String::from("text")));
/// assert!(!tag.accepts(&5));
///
/// #[derive(Debug, PartialEq)]
/// struct Date(u64);
///
/// assert!(TypeTag::of::<Date>().accepts(&Date(0)));
/// assert_eq!(TypeTag::of::<Date>().name(), "Date");
/// ```
#[derive(Clone)]
pub struct TypeTag {
    name: String,
    tests: Vec<TypeTest>,
}

impl TypeTag {
    /// A tag accepting exactly `T`, named after `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<T>()),
            tests: vec![is_type::<T> as TypeTest],
        }
    }

    /// An empty tag with a display name; add members with [`TypeTag::or`].
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    /// Also accept values of type `T`.
    #[must_use]
    pub fn or<T: Any>(mut self) -> Self {
        self.tests.push(is_type::<T>);
        self
    }

    /// Display name used when rendering verification failures.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether `value` has one of the accepted types.
    pub fn accepts(&self, value: &dyn Any) -> bool {
        self.tests.iter().any(|test| test(value))
    }
}

impl Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTag")
            .field("name", &self.name)
            .field("types", &self.tests.len())
            .finish()
    }
}

/// Strip module paths from a type name, keeping generic arguments readable:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
    out
}

/// Text: `String`, `&'static str` and `Box<str>`.
pub fn string() -> TypeTag {
    TypeTag::named("String")
        .or::<String>()
        .or::<&'static str>()
        .or::<Box<str>>()
}

/// Any integer or floating point primitive.
pub fn number() -> TypeTag {
    TypeTag::named("Number")
        .or::<i8>()
        .or::<i16>()
        .or::<i32>()
        .or::<i64>()
        .or::<i128>()
        .or::<isize>()
        .or::<u8>()
        .or::<u16>()
        .or::<u32>()
        .or::<u64>()
        .or::<u128>()
        .or::<usize>()
        .or::<f32>()
        .or::<f64>()
}

/// `bool`.
pub fn boolean() -> TypeTag {
    TypeTag::named("Boolean").or::<bool>()
}
