//! Mocks, spies and the objects they wrap.
//!
//! This module provides the proxy surface of the crate:
//!
//! - [`Object`] - a method table with read-only properties
//! - [`Proxy`] - dynamic `invoke(name, args)` on any of the above
//! - [`Mock`] - scripted stand-in, see [`when`](crate::when)
//! - [`Spy`] - recording wrapper, see [`expect`](crate::expect)
//!
//! # Mocks
//!
//! ```rust
//! use testkit_mock::{args, constraints, mock, when, Object, Proxy};
//!
//! let foo = mock(Object::new());
//! when(&foo).method("bar", constraints!["test"]).returns("a");
//! when(&foo).method("bar", constraints!["test"]).returns("b");
//!
//! assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("a"));
//! assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("b"));
//! ```
//!
//! # Spies
//!
//! ```rust
//! use testkit_mock::{args, constraints, expect, spy, verify_all, Object, Proxy, Value};
//!
//! let foo = spy(Object::new().with_method("bar", |_, _| Ok(Value::new("result"))));
//! expect(&foo).method("bar", constraints!["test"]);
//!
//! assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
//! assert!(verify_all(&foo).is_ok());
//! ```

mod dispatch;
mod double;
mod object;
mod spy;

pub use double::{mock, mock_any, Mock};
pub use object::{Method, MethodFn, Object, Proxy};
pub use spy::{spy, Spy};
