mod common;

use common::Suite;
use todo_harness::TodoItem;

#[test]
fn create_valid_todo() {
    let suite = Suite::start("creation");
    suite.before_each("create_valid_todo");

    let item = suite.factory.valid();
    let created = suite.create_and_find(&item);
    assert_eq!(created.text(), item.text());
    assert_eq!(created.id, item.id);
    assert!(!created.is_completed());

    suite.finish();
}

#[test]
fn create_todo_with_missing_fields_is_rejected() {
    let suite = Suite::start("creation");
    suite.before_each("create_todo_with_missing_fields_is_rejected");

    let status = suite.api.create_status(&TodoItem::default()).unwrap();
    assert_eq!(status, 400, "status code does not match expected");

    let err = suite.api.create(&TodoItem::default()).unwrap_err();
    assert_eq!(err.status(), Some(400));

    suite.finish();
}

#[test]
fn create_todo_with_special_characters() {
    let suite = Suite::start("creation");
    suite.before_each("create_todo_with_special_characters");

    let item = suite.factory.special_characters();
    let created = suite.create_and_find(&item);
    assert_eq!(created.text(), "Test Todo 😊🚀");

    suite.finish();
}

#[test]
#[ignore = "behavior for oversized text is not defined by the service"]
fn create_todo_with_large_text() {
    let suite = Suite::start("creation");
    suite.before_each("create_todo_with_large_text");

    let item = suite.factory.large_text();
    let created = suite.create_and_find(&item);
    assert_eq!(created.text(), item.text());

    suite.finish();
}
