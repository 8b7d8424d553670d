//! Integration tests for spies and call inspection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;

use common::within_timeout;
use testkit_mock::prelude::*;

/// Test a spy forwards to the real method and records the call.
#[test]
fn test_spy_forwards_and_records() {
    let real_calls = Arc::new(AtomicUsize::new(0));
    let counter = real_calls.clone();
    let foo = spy(Object::new().with_method("bar", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::new("result"))
    }));

    expect(&foo).method("bar", constraints!["test"]);
    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
    assert_eq!(foo.invoke("bar", args!["other"]).unwrap().get::<&str>(), Some("result"));

    assert_eq!(real_calls.load(Ordering::SeqCst), 2);
    assert_eq!(foo.call_count("bar"), 2);
    assert_eq!(
        foo.nth_call("bar", 1).unwrap().args[0].get::<&str>(),
        Some("other")
    );
}

/// Test the real method sees the spy as receiver.
#[test]
fn test_spy_receiver_is_spy() {
    let foo = spy(Object::new()
        .with_property("prefix", ">")
        .with_method("outer", |this, args| this.invoke("inner", args.to_vec()))
        .with_method("inner", |this, args| {
            let prefix = this
                .property("prefix")
                .and_then(|v| v.get::<&str>())
                .unwrap_or_default();
            let arg = args[0].get::<&str>().unwrap_or_default();
            Ok(Value::new(format!("{prefix}{arg}")))
        }));

    let result = foo.invoke("outer", args!["x"]).unwrap();
    assert_eq!(result.get::<String>().as_deref(), Some(">x"));

    // the nested call went through the spy too
    assert_eq!(foo.call_count("outer"), 1);
    assert_eq!(foo.call_count("inner"), 1);
    assert!(foo.last_call("inner").unwrap().sequence > foo.last_call("outer").unwrap().sequence);
}

/// Test spy expectations never change the return value.
#[test]
fn test_spy_expectations_only_count() {
    let foo = spy(Object::new().with_method("bar", |_, _| Ok(Value::new(7))));
    expect_with(&foo, never()).method("bar", constraints![any()]);

    assert_eq!(foo.invoke("bar", args![1]).unwrap().get::<i32>(), Some(7));
    assert_eq!(foo.invoke("bar", args![2]).unwrap().get::<i32>(), Some(7));
    assert!(verify_all(&foo).is_err());
}

/// Test failures of the real method reach the caller.
#[test]
fn test_spy_propagates_failures() {
    let foo = spy(Object::new().with_method("bar", |_, args| {
        Err(Error::Scripted(args[0].clone()))
    }));

    let err = foo.invoke("bar", args!["boom"]).unwrap_err();
    assert_eq!(err.scripted::<&str>(), Some(&"boom"));
    assert!(foo.was_called("bar"));
}

/// Test calling a method the target lacks.
#[test]
fn test_spy_missing_method() {
    let foo = spy(Object::new());
    let err = foo.invoke("bar", args![]).unwrap_err();
    assert_eq!(err.method(), Some("bar"));
    assert!(matches!(err, Error::NoSuchMethod { .. }));
}

/// Test properties read through the spy.
#[test]
fn test_spy_properties() {
    let foo = spy(Object::new().with_property("name", String::from("foo")));
    assert_eq!(
        foo.property("name").and_then(|v| v.get::<String>()).as_deref(),
        Some("foo")
    );
    assert!(foo.property("other").is_none());
}

/// Test inspection of a mock-any's recorded calls.
#[test]
fn test_mock_any_inspection() {
    let foo = mock_any(Object::new());
    foo.invoke("bar", args!["a"]).unwrap();
    foo.invoke("baz", args![1, 2]).unwrap();
    foo.invoke("bar", args!["b"]).unwrap();

    assert_eq!(foo.call_count("bar"), 2);
    assert_eq!(foo.call_count("baz"), 1);
    assert!(!foo.was_called("qux"));

    let calls = foo.calls("bar");
    assert_eq!(calls[0].args[0].get::<&str>(), Some("a"));
    assert_eq!(calls[1].args[0].get::<&str>(), Some("b"));
    assert_eq!(calls[1].sequence, 2);
    assert_eq!(foo.last_call("baz").unwrap().args.len(), 2);
}

/// Test spy expectations with constraints that inspect the spy.
#[test]
fn test_spy_constraint_may_inspect_the_spy() {
    let foo = spy(Object::new().with_method("bar", |_, _| Ok(Value::new(7))));
    let observer = foo.clone();
    expect_with(&foo, once()).method(
        "bar",
        constraints![Constraint::custom("FirstCall", move |_: &Value| {
            !observer.was_called("bar")
        })],
    );

    let worker = foo.clone();
    let results = within_timeout(move || {
        (0..3)
            .map(|i| worker.invoke("bar", args![i]).map(|v| v.get::<i32>()))
            .collect::<Vec<_>>()
    });

    assert!(results.into_iter().all(|r| r.unwrap() == Some(7)));
    assert_eq!(foo.call_count("bar"), 3);
    assert_verified!(verify_all(&foo));
}
