//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds the resolved collection URL, content type and admin
//! credentials, and carries no mutable state between calls. Each operation
//! is split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. `TodoApi` runs the
//! round-trip in between.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::HarnessConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::TodoItem;

/// Whether a delete carries the admin credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Preemptive basic auth with the configured admin account.
    Admin,
    /// No `Authorization` header at all.
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct TodoClient {
    collection_url: String,
    content_type: String,
    basic_auth: String,
}

impl TodoClient {
    pub fn new(config: &HarnessConfig) -> Self {
        let credentials = format!("{}:{}", config.admin_username, config.admin_password);
        Self {
            collection_url: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                config.todos_endpoint.trim_start_matches('/')
            ),
            content_type: config.content_type.clone(),
            basic_auth: format!("Basic {}", STANDARD.encode(credentials)),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn build_list(&self, offset: i64, limit: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}?offset={offset}&limit={limit}", self.collection_url),
            headers: self.content_headers(),
            body: None,
        }
    }

    pub fn build_create(&self, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url.clone(),
            headers: self.content_headers(),
            body: Some(to_json(item)?),
        })
    }

    pub fn build_update(&self, id: i64, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        self.build_update_raw(&id.to_string(), item)
    }

    /// Update addressed by an arbitrary path segment, for probing how the
    /// service handles ids that are not integers.
    pub fn build_update_raw(&self, raw_id: &str, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/{raw_id}", self.collection_url),
            headers: self.content_headers(),
            body: Some(to_json(item)?),
        })
    }

    pub fn build_delete(&self, id: i64, auth: Auth) -> HttpRequest {
        let mut headers = self.content_headers();
        if auth == Auth::Admin {
            headers.push(("authorization".to_string(), self.basic_auth.clone()));
        }
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}", self.collection_url),
            headers,
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[201])
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200])
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])
    }

    /// Sent on every request, with or without a body.
    fn content_headers(&self) -> Vec<(String, String)> {
        vec![("content-type".to_string(), self.content_type.clone())]
    }
}

fn to_json(item: &TodoItem) -> Result<String, ApiError> {
    serde_json::to_string(item).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Map a status outside `expected` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::UnexpectedStatus {
        expected: expected.to_vec(),
        status: response.status,
        body: response.body.clone(),
    })
}
