mod common;

use common::Suite;
use todo_harness::factory::constants::*;

#[test]
fn delete_with_admin_credentials() {
    let suite = Suite::start("deletion");
    suite.before_each("delete_with_admin_credentials");

    let created = suite.create_and_find(&suite.factory.valid());
    let id = created.id.expect("listed todo has an id");
    let status = suite.api.delete_status(id).unwrap();
    assert!(matches!(status, 200 | 204), "unexpected status {status}");

    let todos = suite.api.list(DEFAULT_OFFSET, DEFAULT_LIMIT).unwrap();
    assert!(todos.iter().all(|t| t.id != Some(id)), "todo was not deleted");

    suite.finish();
}

#[test]
fn verified_delete_removes_the_item() {
    let suite = Suite::start("deletion");
    suite.before_each("verified_delete_removes_the_item");

    let created = suite.create_and_find(&suite.factory.valid());
    suite.api.delete(created.id.unwrap()).unwrap();

    assert!(suite.api.list(DEFAULT_OFFSET, DEFAULT_LIMIT).unwrap().is_empty());

    suite.finish();
}

#[test]
fn delete_without_credentials_is_unauthorized() {
    let suite = Suite::start("deletion");
    suite.before_each("delete_without_credentials_is_unauthorized");

    let created = suite.create_and_find(&suite.factory.valid());
    let status = suite
        .api
        .delete_status_unauthenticated(created.id.unwrap())
        .unwrap();
    assert_eq!(status, 401);

    // Still there for the final cleanup to remove.
    let todos = suite.api.list(DEFAULT_OFFSET, DEFAULT_LIMIT).unwrap();
    assert_eq!(todos.len(), 1);

    suite.finish();
}

#[test]
fn delete_non_existent_todo_is_not_found() {
    let suite = Suite::start("deletion");
    suite.before_each("delete_non_existent_todo_is_not_found");

    let status = suite.api.delete_status(NON_EXISTENT_TODO_ID).unwrap();
    assert_eq!(status, 404);

    suite.finish();
}
