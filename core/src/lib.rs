//! Test harness for an external todo HTTP service.
//!
//! # Overview
//! Drives the service's CRUD, pagination and authorization behavior from
//! test code, and keeps the shared remote collection clean between tests.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without I/O; `Transport` performs the round-trip; `TodoApi`
//!   combines the two into verify and observe operations.
//! - `IdGenerator` hands out collision-free ids from an injected
//!   `UsedIds` set; `TestDataFactory` builds payloads with them.
//! - `FixtureLifecycle` clears the collection before each test and retries
//!   the final cleanup; `SuiteGuard` turns an exhausted cleanup into a
//!   hard failure.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod http;
pub mod ids;
pub mod lifecycle;
pub mod poll;
pub mod transport;
pub mod types;

pub use api::{TodoApi, TodoService};
pub use client::{Auth, TodoClient};
pub use config::HarnessConfig;
pub use error::{ApiError, LifecycleError};
pub use factory::TestDataFactory;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use ids::{IdGenerator, UsedIds};
pub use lifecycle::{CleanupPolicy, ClearReport, FixtureLifecycle, SuiteGuard};
pub use poll::{retry, PollError, Poller, RetryError};
pub use transport::{Transport, UreqTransport};
pub use types::TodoItem;

/// Installs a `tracing` subscriber writing through the test harness.
///
/// `RUST_LOG` takes precedence over `level`. Safe to call more than once;
/// only the first call has an effect.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("todo_harness={level}")));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(filter)
        .try_init();
}
