//! Domain DTOs for the todo API.
//!
//! # Design
//! The wire shape is `{"id": <int64>, "text": <string>, "completed": <bool>}`.
//! `text` and `completed` are optional here so negative tests can send a
//! payload that omits them; absent fields are left out of the JSON
//! entirely. Items returned by the service always carry all three.

use serde::{Deserialize, Serialize};

/// A single todo item, as sent to or returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoItem {
    /// An open (not completed) item with a client-assigned id.
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: Some(text.into()),
            completed: Some(false),
        }
    }

    /// The item's text, or `""` when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }
}
