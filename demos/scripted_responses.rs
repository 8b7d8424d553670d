//! Example: Scripting a mock's responses
//!
//! This example shows how to stub a collaborator with testkit-mock: fixed
//! returns, sequences, type-based routing, scripted failures and delegates.

use testkit_mock::prelude::*;

#[derive(Debug, PartialEq)]
struct Date(u64);

fn main() {
    println!("🧰 testkit-mock - Scripted Response Examples\n");

    example_returns();
    example_sequences();
    example_type_routing();
    example_failures_and_delegates();

    println!("\n✅ All scripted response examples completed!");
}

/// A repository whose lookups we want to control.
fn repository() -> Object {
    Object::new()
        .with_property("table", "users")
        .with_method("find", |this, args| {
            let table = this
                .property("table")
                .and_then(|v| v.get::<&str>())
                .unwrap_or_default();
            Ok(Value::new(format!("{table}#{:?}", args.first())))
        })
}

fn show(label: &str, result: &Result<Value>) {
    match result {
        Ok(value) => println!("   {label}: ✅ {value:?}"),
        Err(err) => println!("   {label}: ❌ {err}"),
    }
}

/// Returning a fixed value once, then for every call
fn example_returns() {
    println!("📌 Example 1: Fixed Returns");
    println!("   `when` serves one call, `whenever` serves them all\n");

    let repo = mock(repository());
    show("find(1) before scripting", &repo.invoke("find", args![1]));

    when(&repo).method("find", constraints![1]).returns("alice");
    show("find(1)", &repo.invoke("find", args![1]));
    show("find(1) again", &repo.invoke("find", args![1]));

    whenever(&repo).method("find", constraints![2]).returns("bob");
    for _ in 0..3 {
        show("find(2)", &repo.invoke("find", args![2]));
    }

    println!();
}

/// Stacking identical expectations to script a sequence
fn example_sequences() {
    println!("📌 Example 2: Sequences");
    println!("   Identical expectations are served in registration order\n");

    let queue = Mock::new();
    when(&queue).method("pop", constraints![]).returns("first");
    when_with(&queue, twice()).method("pop", constraints![]).returns("middle");
    when(&queue).method("pop", constraints![]).returns("last");

    for i in 0..5 {
        show(&format!("pop #{}", i + 1), &queue.invoke("pop", args![]));
    }

    match verify_all(&queue) {
        Ok(_) => println!("\n   📊 Every expectation was used as declared"),
        Err(err) => println!("\n   📊 {err}"),
    }

    println!();
}

/// Routing calls by argument type
fn example_type_routing() {
    println!("📌 Example 3: Type Constraints");
    println!("   Match on the argument's type instead of its value\n");

    let parser = Mock::new();
    whenever(&parser).method("parse", constraints![types::string()]).returns("text");
    whenever(&parser).method("parse", constraints![types::number()]).returns("number");
    whenever(&parser)
        .method("parse", constraints![types::TypeTag::of::<Date>()])
        .returns("date");
    whenever(&parser).method("parse", constraints![any(), any()]).returns("pair");

    show("parse(\"x\")", &parser.invoke("parse", args!["x"]));
    show("parse(4.2)", &parser.invoke("parse", args![4.2]));
    show("parse(Date)", &parser.invoke("parse", args![Date(0)]));
    show("parse(1, true)", &parser.invoke("parse", args![1, true]));
    show("parse(true)", &parser.invoke("parse", args![true]));

    println!();
}

/// Scripted failures and computed responses
fn example_failures_and_delegates() {
    println!("📌 Example 4: Failures and Delegates");
    println!("   Throw a value, or compute the response from the arguments\n");

    let service = mock(repository());
    when(&service).method("save", constraints!["bad"]).throws("invalid record");
    whenever(&service)
        .method("save", constraints![types::string()])
        .then(|this, args| {
            let table = this
                .property("table")
                .and_then(|v| v.get::<&str>())
                .unwrap_or_default();
            let record = args[0].get::<&str>().unwrap_or_default();
            Ok(Value::new(format!("saved {record} into {table}")))
        });

    let result = service.invoke("save", args!["bad"]);
    if let Err(err) = &result {
        println!("   save(\"bad\"): ❌ scripted {:?}", err.scripted::<&str>());
    }
    show("save(\"carol\")", &service.invoke("save", args!["carol"]));

    println!("\n   📊 Recorded calls:");
    println!("      save: {}", service.call_count("save"));
    println!("      find: {}", service.call_count("find"));
}
