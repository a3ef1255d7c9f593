//! Harness configuration.
//!
//! Every field can be supplied through an environment variable; anything
//! unset falls back to the defaults below.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TODO_BASE_URL` | http://localhost:8080 | Service base URL |
//! | `TODO_ENDPOINT` | /todos | Collection path |
//! | `TODO_CONTENT_TYPE` | application/json | Request content type |
//! | `TODO_ADMIN_USERNAME` | admin | Basic-auth user for deletes |
//! | `TODO_ADMIN_PASSWORD` | admin | Basic-auth password for deletes |
//! | `TODO_CLEANUP_LIST_BOUND` | 100 | Items fetched per cleanup pass |
//! | `TODO_CLEANUP_POLL_INTERVAL_MS` | 100 | Poll/retry interval |
//! | `TODO_CLEANUP_MAX_ATTEMPTS` | 5 | Suite cleanup attempts |

use std::time::Duration;

use clap::Parser;
use tracing::warn;

/// Connection and cleanup settings for one harness run.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-harness")]
pub struct HarnessConfig {
    /// Base URL of the todo service.
    #[arg(long, env = "TODO_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Path of the todo collection, relative to the base URL.
    #[arg(long, env = "TODO_ENDPOINT", default_value = "/todos")]
    pub todos_endpoint: String,

    /// Content type sent with request bodies.
    #[arg(long, env = "TODO_CONTENT_TYPE", default_value = "application/json")]
    pub content_type: String,

    #[arg(long, env = "TODO_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    #[arg(long, env = "TODO_ADMIN_PASSWORD", default_value = "admin")]
    pub admin_password: String,

    /// Upper bound on items fetched by a single cleanup pass.
    #[arg(long, env = "TODO_CLEANUP_LIST_BOUND", default_value = "100")]
    pub list_bound: i64,

    /// Interval between convergence checks and between cleanup attempts.
    #[arg(long, env = "TODO_CLEANUP_POLL_INTERVAL_MS", default_value = "100")]
    pub poll_interval_ms: u64,

    /// Suite cleanup attempts before giving up.
    #[arg(long, env = "TODO_CLEANUP_MAX_ATTEMPTS", default_value = "5")]
    pub max_attempts: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            todos_endpoint: "/todos".to_string(),
            content_type: "application/json".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            list_bound: 100,
            poll_interval_ms: 100,
            max_attempts: 5,
        }
    }
}

impl HarnessConfig {
    /// Reads the configuration from the environment.
    ///
    /// Only environment variables are consulted, never the process
    /// arguments, so a test runner's own flags cannot interfere.
    pub fn try_from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from([env!("CARGO_PKG_NAME")])
    }

    /// Like `try_from_env`, but falls back to the defaults when any
    /// variable is malformed. The fallback discards every variable, so it
    /// is logged.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "invalid TODO_* environment, using default configuration");
            Self::default()
        })
    }

    /// Default settings pointed at `base_url`.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(format!("Base URL must be http(s): {}", self.base_url));
        }

        if !self.todos_endpoint.starts_with('/') {
            errors.push(format!(
                "Endpoint must start with '/': {}",
                self.todos_endpoint
            ));
        }

        if self.content_type.is_empty() {
            errors.push("Content type cannot be empty".to_string());
        }

        if self.admin_username.contains(':') {
            errors.push("Admin username cannot contain ':'".to_string());
        }

        if self.list_bound <= 0 {
            errors.push("Cleanup list bound must be positive".to_string());
        }

        if self.poll_interval_ms == 0 {
            errors.push("Poll interval cannot be 0".to_string());
        }

        if self.max_attempts == 0 {
            errors.push("Max attempts cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
