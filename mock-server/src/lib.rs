//! In-process stand-in for the remote todo service.
//!
//! # Design
//! Implements the external contract the harness is written against:
//! paginated listing, creation with client-assigned ids, updates by id and
//! deletions guarded by preemptive basic auth. Items are kept in insertion
//! order so `offset`/`limit` windows are stable.
//!
//! `MockConfig` adds two fault knobs the real service exhibits only
//! occasionally: `delete_lag` makes deletions visible after a delay, and
//! `sticky_deletes` acknowledges deletions without applying them.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Body accepted by `POST` and `PUT`. Every field is optional at the JSON
/// layer so missing fields surface as 400 rather than an extractor error.
#[derive(Debug, Default, Deserialize)]
pub struct TodoInput {
    pub id: Option<i64>,
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub admin_username: String,
    pub admin_password: String,
    /// Delay before an acknowledged deletion is applied.
    pub delete_lag: Duration,
    /// Acknowledge deletions with 204 but never apply them.
    pub sticky_deletes: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            delete_lag: Duration::ZERO,
            sticky_deletes: false,
        }
    }
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    config: Arc<MockConfig>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        config: Arc::new(config),
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

async fn list_todos(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<Todo>>, StatusCode> {
    let offset = page.offset.unwrap_or(0);
    let limit = page.limit.unwrap_or(DEFAULT_LIMIT);
    if offset < 0 || limit < 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let todos = state.db.read().await;
    let window = todos
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Ok(Json(window))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<TodoInput>,
) -> Result<StatusCode, StatusCode> {
    let (Some(text), Some(completed)) = (input.text, input.completed) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let mut todos = state.db.write().await;
    let id = match input.id {
        Some(id) if todos.iter().any(|t| t.id == id) => return Err(StatusCode::BAD_REQUEST),
        Some(id) => id,
        None => todos
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StatusCode::BAD_REQUEST)?,
    };
    todos.push(Todo { id, text, completed });
    Ok(StatusCode::CREATED)
}

async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<TodoInput>,
) -> Result<StatusCode, StatusCode> {
    // Malformed ids are indistinguishable from unknown ones.
    let id: i64 = raw_id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let mut todos = state.db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(text) = input.text {
        todo.text = text;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(StatusCode::OK)
}

async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    if !is_admin(&headers, &state.config) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let id: i64 = raw_id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    if !state.db.read().await.iter().any(|t| t.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if state.config.sticky_deletes {
        return Ok(StatusCode::NO_CONTENT);
    }
    let lag = state.config.delete_lag;
    if lag.is_zero() {
        state.db.write().await.retain(|t| t.id != id);
    } else {
        let db = state.db.clone();
        tokio::spawn(async move {
            tokio::time::sleep(lag).await;
            db.write().await.retain(|t| t.id != id);
        });
    }
    Ok(StatusCode::NO_CONTENT)
}

fn is_admin(headers: &HeaderMap, config: &MockConfig) -> bool {
    let Some(encoded) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
    else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let expected = format!("{}:{}", config.admin_username, config.admin_password);
    decoded == expected.as_bytes()
}
