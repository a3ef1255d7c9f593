mod common;

use common::Suite;

#[test]
fn sql_injection_is_stored_as_plain_text() {
    let suite = Suite::start("security");
    suite.before_each("sql_injection_is_stored_as_plain_text");

    let item = suite.factory.sql_injection();
    let created = suite.create_and_find(&item);
    assert_eq!(created.text(), "Test'); DROP TABLE todos; --");

    // The collection survived.
    let second = suite.factory.valid();
    suite.create_and_find(&second);

    suite.finish();
}

#[test]
fn script_tags_are_stored_as_plain_text() {
    let suite = Suite::start("security");
    suite.before_each("script_tags_are_stored_as_plain_text");

    let item = suite.factory.xss();
    let created = suite.create_and_find(&item);
    assert_eq!(created.text(), "<script>alert('XSS')</script>");

    suite.finish();
}
