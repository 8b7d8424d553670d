//! Plain target objects: a method table plus read-only properties.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::{IntoValue, Value};

/// Signature of a callable method: receiver and arguments in, value out.
pub type MethodFn = dyn Fn(&dyn Proxy, &[Value]) -> Result<Value> + Send + Sync;

/// A shared method implementation.
pub type Method = Arc<MethodFn>;

/// Dynamic method invocation on an object.
///
/// [`Object`], [`Mock`](crate::Mock) and [`Spy`](crate::Spy) all implement
/// it; methods receive the proxy they were called through as their receiver.
pub trait Proxy {
    /// Call `method` with `args`.
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value>;

    /// Read a property.
    fn property(&self, name: &str) -> Option<Value>;
}

/// A target object.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{args, Object, Proxy, Value};
///
/// let foo = Object::new()
///     .with_property("foo", "hello")
///     .with_method("bar", |this, args| {
///         let prefix = this.property("foo").and_then(|v| v.get::<&str>()).unwrap_or("");
///         let arg = args[0].get::<&str>().unwrap_or("");
///         Ok(Value::new(format!("{prefix}{arg}")))
///     });
///
/// let result = foo.invoke("bar", args!["test"]).unwrap();
/// assert_eq!(result.get::<String>().as_deref(), Some("hellotest"));
/// ```
#[derive(Clone, Default)]
pub struct Object {
    properties: HashMap<String, Value>,
    methods: HashMap<String, Method>,
}

impl Object {
    /// Create an object with no methods or properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a method.
    #[must_use]
    pub fn with_method<F>(mut self, name: &str, method: F) -> Self
    where
        F: Fn(&dyn Proxy, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(method));
        self
    }

    /// Add (or replace) a property.
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl IntoValue) -> Self {
        self.properties.insert(name.to_string(), value.into_value());
        self
    }

    /// Look up a method.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Whether the object has a method or a property named `name`.
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.methods.contains_key(name) || self.properties.contains_key(name)
    }

    /// Names of all methods.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Call one of this object's methods on behalf of `receiver`.
    pub fn call(&self, receiver: &dyn Proxy, method: &str, args: &[Value]) -> Result<Value> {
        let implementation = self
            .methods
            .get(method)
            .ok_or_else(|| Error::no_such_method(method))?;
        implementation(receiver, args)
    }
}

impl Proxy for Object {
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.call(self, method, &args)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.method_names().collect();
        methods.sort_unstable();
        f.debug_struct("Object")
            .field("properties", &self.properties)
            .field("methods", &methods)
            .finish()
    }
}
