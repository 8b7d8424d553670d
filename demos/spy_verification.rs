//! Example: Spying on calls and verifying counts
//!
//! This example shows how to wrap a real object in a spy, declare the calls
//! it should see, and verify them afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use testkit_mock::prelude::*;

fn main() {
    println!("🧰 testkit-mock - Spy Verification Examples\n");

    example_spy_recording();
    example_replay();
    example_ad_hoc_queries();

    println!("\n✅ All spy verification examples completed!");
}

/// A mailer that counts how many messages really went out.
fn mailer(sent: Arc<AtomicUsize>) -> Object {
    Object::new().with_method("send", move |_, args| {
        sent.fetch_add(1, Ordering::SeqCst);
        Ok(Value::new(format!("sent to {:?}", args.first())))
    })
}

/// Spies forward every call and keep a record of it
fn example_spy_recording() {
    println!("📌 Example 1: Recording Calls");
    println!("   The real method runs; the spy remembers the call\n");

    let sent = Arc::new(AtomicUsize::new(0));
    let spied = spy(mailer(sent.clone()));

    for to in ["ann", "ben", "cat"] {
        let result = spied.invoke("send", args![to]);
        println!("   send({to:?}): {result:?}");
    }

    println!("\n   📊 Statistics:");
    println!("      Real sends: {}", sent.load(Ordering::SeqCst));
    println!("      Recorded calls: {}", spied.call_count("send"));
    if let Some(call) = spied.last_call("send") {
        println!("      Last call: #{} with {:?}", call.sequence, call.args);
    }

    println!();
}

/// Declaring expected calls and replaying them
fn example_replay() {
    println!("📌 Example 2: Replaying Expectations");
    println!("   Declare the calls up front, verify after the run\n");

    let spied = spy(mailer(Arc::new(AtomicUsize::new(0))));
    expect(&spied).method("send", constraints!["ann"]);
    expect_with(&spied, at_least(2)).method("send", constraints![types::string()]);
    expect_with(&spied, never()).method("send", constraints!["spam"]);

    spied.invoke("send", args!["ann"]).ok();
    match verify_all(&spied) {
        Ok(_) => println!("   After 1 call: ✅ verified"),
        Err(err) => println!("   After 1 call: ❌ {err}"),
    }

    spied.invoke("send", args!["ben"]).ok();
    spied.invoke("send", args!["cat"]).ok();
    match verify_all(&spied) {
        Ok(_) => println!("   After 3 calls: ✅ verified"),
        Err(err) => println!("   After 3 calls: ❌ {err}"),
    }

    println!();
}

/// Querying recorded calls without declaring anything first
fn example_ad_hoc_queries() {
    println!("📌 Example 3: Ad-hoc Queries");
    println!("   `mock_any` records calls to any method name\n");

    let logger = mock_any(Object::new());
    logger.invoke("info", args!["boot"]).ok();
    logger.invoke("warn", args!["disk", 91]).ok();
    logger.invoke("info", args!["ready"]).ok();

    let exactly_once = verify(&logger);
    let exactly_twice = verify_with(&logger, twice());

    let queries = [
        (
            "info(String) twice",
            exactly_twice.method("info", constraints![types::string()]),
        ),
        (
            "warn(\"disk\", Number) once",
            exactly_once.method("warn", constraints!["disk", types::number()]),
        ),
        ("error() once", exactly_once.method("error", constraints![])),
    ];

    for (label, result) in queries {
        match result {
            Ok(_) => println!("   {label}: ✅"),
            Err(err) => println!("   {label}: ❌ {err}"),
        }
    }
}
