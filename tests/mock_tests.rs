//! Integration tests for scripted mocks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;

use common::within_timeout;
use testkit_mock::prelude::*;

#[derive(Debug, PartialEq)]
struct Date(u64);

/// An object with a property and a method reading it through the receiver.
fn foo() -> Object {
    Object::new()
        .with_property("foo", "hello")
        .with_method("bar", |this, args| {
            let prefix = this
                .property("foo")
                .and_then(|v| v.get::<&str>())
                .unwrap_or_default();
            let arg = args.first().and_then(|v| v.get::<&str>()).unwrap_or_default();
            Ok(Value::new(format!("{prefix}{arg}")))
        })
        .with_method("say", |_, args| {
            let something = args.first().and_then(|v| v.get::<&str>()).unwrap_or_default();
            Ok(Value::new(format!("say:{something}")))
        })
}

/// Test a `when` expectation serves exactly one call.
#[test]
fn test_returns_expected_value_once() {
    let foo = Mock::new();
    when(&foo).method("bar", constraints!["test"]).returns("result");

    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
    let err = foo.invoke("bar", args!["test"]).unwrap_err();
    assert!(matches!(err, Error::UnmatchedCall { .. }));
    assert_eq!(
        err.to_string(),
        "No expectation of method \"bar\" matches given arguments available"
    );
}

/// Test type constraints route calls to the right expectation.
#[test]
fn test_returns_value_for_matching_argument_types() {
    let foo = Mock::new();
    when(&foo).method("bar", constraints![types::string()]).returns("string");
    when(&foo).method("bar", constraints![types::number()]).returns("number");
    when(&foo)
        .method("bar", constraints![types::TypeTag::of::<Date>()])
        .returns("date");

    assert_eq!(foo.invoke("bar", args![0]).unwrap().get::<&str>(), Some("number"));
    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("string"));
    assert_eq!(foo.invoke("bar", args![Date(0)]).unwrap().get::<&str>(), Some("date"));
    assert!(foo.invoke("bar", args![true]).is_err());
}

/// Test `whenever` serves any number of calls.
#[test]
fn test_returns_expected_value_multiple_times() {
    let foo = mock(foo());
    whenever(&foo).method("bar", constraints!["test"]).returns("result");

    for _ in 0..5 {
        assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
    }
    assert_eq!(foo.call_count("bar"), 5);
}

/// Test identical expectations serve calls in registration order.
#[test]
fn test_returns_expected_values_one_by_one() {
    let foo = mock(foo());
    when(&foo).method("bar", constraints!["test"]).returns("result");
    when(&foo).method("bar", constraints!["test"]).returns("another result");

    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
    assert_eq!(
        foo.invoke("bar", args!["test"]).unwrap().get::<&str>(),
        Some("another result")
    );
}

/// Test methods without expectations keep working on the target.
#[test]
fn test_other_methods_keep_working() {
    let emitted = Arc::new(AtomicUsize::new(0));
    let counter = emitted.clone();
    let emitter = Object::new().with_method("emit", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::new(true))
    });

    let foo = mock(emitter);
    when(&foo).method("bar", constraints!["test"]).returns("a");
    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("a"));

    assert_eq!(foo.invoke("emit", args!["test"]).unwrap().get::<bool>(), Some(true));
    assert_eq!(emitted.load(Ordering::SeqCst), 1);
}

/// Test a method passes through until it gets an expectation.
#[test]
fn test_returns_expected_for_matched_type() {
    let foo = mock(foo());
    assert_eq!(
        foo.invoke("bar", args!["test"]).unwrap().get::<String>().as_deref(),
        Some("hellotest")
    );

    when(&foo)
        .method("bar", constraints![types::TypeTag::of::<Date>()])
        .returns("result");
    assert_eq!(foo.invoke("bar", args![Date(7)]).unwrap().get::<&str>(), Some("result"));

    // other methods still pass through
    assert_eq!(
        foo.invoke("say", args!["hi"]).unwrap().get::<String>().as_deref(),
        Some("say:hi")
    );
}

/// Test an expectation without a behavior returns the unit value.
#[test]
fn test_returns_unit_without_behavior() {
    let foo = mock(foo());
    when(&foo).method("bar", constraints!["test"]);
    assert!(foo.invoke("bar", args!["test"]).unwrap().is_unit());
}

/// Test the wildcard matches any argument.
#[test]
fn test_matches_any() {
    let foo = mock(foo());
    whenever(&foo).method("bar", constraints![any()]).returns("result");

    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<&str>(), Some("result"));
    assert_eq!(foo.invoke("bar", args!["something"]).unwrap().get::<&str>(), Some("result"));
    assert_eq!(foo.invoke("bar", args![None::<i32>]).unwrap().get::<&str>(), Some("result"));

    // arity still counts
    assert!(foo.invoke("bar", args![]).is_err());
}

/// Test a scripted failure surfaces the exact value.
#[test]
fn test_throws_as_expected() {
    #[derive(Debug, PartialEq)]
    struct Failure(String);

    let foo = mock(foo());
    when(&foo)
        .method("bar", constraints!["test"])
        .throws(Failure("yo".to_string()));

    let err = foo.invoke("bar", args!["test"]).unwrap_err();
    assert_eq!(err.scripted::<Failure>(), Some(&Failure("yo".to_string())));
}

/// Test a delegate computes the result.
#[test]
fn test_returns_value_from_delegate() {
    let foo = mock(foo());
    when(&foo)
        .method("bar", constraints!["test"])
        .then(|_, _| Ok(Value::new(1)));
    assert_eq!(foo.invoke("bar", args!["test"]).unwrap().get::<i32>(), Some(1));
}

/// Test a delegate receives the arguments and the mock as receiver.
#[test]
fn test_passes_arguments_to_delegate() {
    let foo = mock(foo());
    when(&foo)
        .method("bar", constraints![any(), any()])
        .then(|this, args| {
            assert_eq!(
                this.property("foo").and_then(|v| v.get::<&str>()),
                Some("hello")
            );
            let a = args[0].get::<&str>().unwrap_or_default();
            let b = args[1].get::<&str>().unwrap_or_default();
            Ok(Value::new(format!("{a}{b}")))
        });

    let result = foo.invoke("bar", args!["test", "hahaha"]).unwrap();
    assert_eq!(result.get::<String>().as_deref(), Some("testhahaha"));
}

/// Test custom constraints take part in matching.
#[test]
fn test_custom_constraint() {
    let foo = Mock::new();
    whenever(&foo)
        .method(
            "bar",
            constraints![Constraint::custom("even", |v: &Value| {
                v.get::<i32>().is_some_and(|n| n % 2 == 0)
            })],
        )
        .returns("even");

    assert_eq!(foo.invoke("bar", args![4]).unwrap().get::<&str>(), Some("even"));
    assert!(foo.invoke("bar", args![3]).is_err());
}

/// Test bounded ranges stop serving once exhausted.
#[test]
fn test_bounded_range_exhausts() {
    let foo = Mock::new();
    when_with(&foo, times(3)).method("bar", constraints![]).returns(1);
    when(&foo).method("bar", constraints![]).returns(2);

    let served: Vec<i32> = (0..4)
        .map(|_| foo.invoke("bar", args![]).unwrap().get::<i32>().unwrap())
        .collect();
    assert_eq!(served, vec![1, 1, 1, 2]);
    assert!(foo.invoke("bar", args![]).is_err());
}

/// Test mocks can be driven from several threads.
#[test]
fn test_concurrent_calls() {
    let foo = Mock::new();
    whenever(&foo).method("bar", constraints![any()]).returns("ok");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let foo = foo.clone();
            std::thread::spawn(move || foo.invoke("bar", args![i]).unwrap().get::<&str>())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some("ok"));
    }
    assert_eq!(foo.call_count("bar"), 4);
}

/// Test custom constraints may inspect the mock they guard.
#[test]
fn test_custom_constraint_may_inspect_the_mock() {
    let foo = Mock::new();
    let observer = foo.clone();
    whenever(&foo)
        .method(
            "bar",
            constraints![Constraint::custom("FirstCall", move |_: &Value| {
                observer.call_count("bar") == 0
            })],
        )
        .returns("first");

    let (first, second) = within_timeout(move || {
        let first = foo.invoke("bar", args![1]).map(|v| v.get::<&str>());
        let second = foo.invoke("bar", args![2]);
        (first, second)
    });

    assert_eq!(first.unwrap(), Some("first"));
    assert!(matches!(second, Err(Error::UnmatchedCall { .. })));
}

/// Test a delegate may call back into its own mock.
#[test]
fn test_delegate_may_call_back_into_the_mock() {
    let foo = Mock::new();
    whenever(&foo).method("inner", constraints![any()]).returns("inner");
    whenever(&foo)
        .method("outer", constraints![any()])
        .then(|this, args| this.invoke("inner", args.to_vec()));

    let worker = foo.clone();
    let result = within_timeout(move || worker.invoke("outer", args![1]).map(|v| v.get::<&str>()));

    assert_eq!(result.unwrap(), Some("inner"));
    assert_eq!(foo.call_count("inner"), 1);
}

/// Test an empty range never serves a call and always fails verification.
#[test]
fn test_disjoint_cardinality_is_never_served() {
    let foo = Mock::new();
    when_with(&foo, at_least(5).at_most(2))
        .method("bar", constraints![])
        .returns(1);

    for _ in 0..3 {
        assert!(matches!(
            foo.invoke("bar", args![]),
            Err(Error::UnmatchedCall { .. })
        ));
    }
    assert_eq!(foo.call_count("bar"), 0);
    assert!(verify_all(&foo).is_err());
}
