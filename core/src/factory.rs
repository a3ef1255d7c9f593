//! Payload builders for the test scenarios.

use crate::ids::IdGenerator;
use crate::types::TodoItem;

/// Fixed values shared by the scenarios.
pub mod constants {
    pub const START_ID: i64 = 1;
    pub const SMALL_TOTAL_TODOS: i64 = 5;
    pub const SMALL_OFFSET: i64 = 2;
    pub const SMALL_LIMIT: i64 = 2;
    pub const EXPECTED_SMALL_SIZE: usize = 2;
    pub const LARGE_TOTAL_TODOS: i64 = 100;
    pub const LARGE_OFFSET: i64 = 90;
    pub const LARGE_LIMIT: i64 = 20;
    pub const EXPECTED_LARGE_SIZE: usize = 10;
    pub const DEFAULT_OFFSET: i64 = 0;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const INVALID_OFFSET: i64 = -1;
    pub const INVALID_LIMIT: i64 = -5;
    pub const NON_EXISTENT_TODO_ID: i64 = 9999;
    pub const INVALID_ID_SEGMENT: &str = "invalid-id";

    pub const DEFAULT_TODO_TEXT: &str = "Test Todo Item ";
    pub const SPECIAL_CHARACTERS_TEXT: &str = "Test Todo 😊🚀";
    pub const SQL_INJECTION_TEXT: &str = "Test'); DROP TABLE todos; --";
    pub const XSS_TEXT: &str = "<script>alert('XSS')</script>";
    pub const LARGE_TEXT_UNIT: &str = "Test text ";
    pub const LARGE_TEXT_REPEAT_COUNT: usize = 100;
}

use constants::*;

/// Builds todo payloads, each with a fresh id and `completed = false`.
#[derive(Debug, Clone, Default)]
pub struct TestDataFactory {
    ids: IdGenerator,
}

impl TestDataFactory {
    pub fn new(ids: IdGenerator) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Plain item whose text is unique as well as its id.
    pub fn valid(&self) -> TodoItem {
        let text = format!("{DEFAULT_TODO_TEXT}{}", self.ids.next());
        self.with_text(text)
    }

    pub fn special_characters(&self) -> TodoItem {
        self.with_text(SPECIAL_CHARACTERS_TEXT)
    }

    pub fn sql_injection(&self) -> TodoItem {
        self.with_text(SQL_INJECTION_TEXT)
    }

    pub fn xss(&self) -> TodoItem {
        self.with_text(XSS_TEXT)
    }

    pub fn large_text(&self) -> TodoItem {
        let text = LARGE_TEXT_UNIT.repeat(LARGE_TEXT_REPEAT_COUNT);
        self.with_text(text.trim_end())
    }

    /// `Todo {n}` with id `n`, for pagination runs where order matters.
    pub fn numbered(n: i64) -> TodoItem {
        TodoItem::new(n, format!("Todo {n}"))
    }

    fn with_text(&self, text: impl Into<String>) -> TodoItem {
        TodoItem::new(self.ids.next(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_open_with_a_fresh_id() {
        let factory = TestDataFactory::default();
        let items = [
            factory.valid(),
            factory.special_characters(),
            factory.sql_injection(),
            factory.xss(),
            factory.large_text(),
        ];
        let mut ids: Vec<i64> = items.iter().map(|i| i.id.unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|i| i.completed == Some(false)));
    }

    #[test]
    fn valid_items_have_distinct_text() {
        let factory = TestDataFactory::default();
        let a = factory.valid();
        let b = factory.valid();
        assert!(a.text().starts_with(DEFAULT_TODO_TEXT));
        assert_ne!(a.text(), b.text());
    }

    #[test]
    fn hostile_payloads_are_carried_verbatim() {
        let factory = TestDataFactory::default();
        assert_eq!(factory.special_characters().text(), "Test Todo 😊🚀");
        assert_eq!(factory.sql_injection().text(), "Test'); DROP TABLE todos; --");
        assert_eq!(factory.xss().text(), "<script>alert('XSS')</script>");
    }

    #[test]
    fn large_text_is_trimmed_repetition() {
        let text = TestDataFactory::default().large_text().text.unwrap();
        assert_eq!(text.len(), LARGE_TEXT_UNIT.len() * LARGE_TEXT_REPEAT_COUNT - 1);
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn numbered_items_use_the_number_as_id() {
        let item = TestDataFactory::numbered(3);
        assert_eq!(item.id, Some(3));
        assert_eq!(item.text(), "Todo 3");
    }

    #[test]
    fn factories_sharing_a_generator_share_its_pool() {
        let ids = IdGenerator::new();
        let a = TestDataFactory::new(ids.clone());
        let b = TestDataFactory::new(ids.clone());
        a.xss();
        b.xss();
        assert_eq!(ids.used().len(), 2);
    }
}
