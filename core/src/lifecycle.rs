//! Test fixture lifecycle against the shared remote collection.
//!
//! # Design
//! Each cleanup attempt follows the same path:
//!
//! ```text
//! list ─┬─ empty ──────────────────────────────────────────── done
//!       └─ non-empty ─ delete all concurrently ─ poll ─┬─ empty ─ done
//!                                                     └─ deadline ─ failed
//! ```
//!
//! Individual deletes are best effort: a failure is logged and left for the
//! poll to catch. `before_each` runs one attempt and lets its failure fail
//! the test. `clean_up` runs up to `max_attempts` attempts; running out is
//! the one failure that should stop the whole run, which `SuiteGuard`
//! enforces by panicking.

use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, error, trace, warn};

use crate::api::TodoService;
use crate::config::HarnessConfig;
use crate::error::{ApiError, LifecycleError};
use crate::poll::{retry, PollError, Poller};
use crate::types::TodoItem;

#[derive(Debug, Clone, Copy)]
pub struct CleanupPolicy {
    /// Items fetched per pass; anything beyond is left for the next pass.
    pub list_bound: i64,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for CleanupPolicy {
    fn default() -> Self {
        Self {
            list_bound: 100,
            poll_interval: Duration::from_millis(100),
            max_attempts: 5,
        }
    }
}

impl CleanupPolicy {
    /// Builds the policy from a validated `config`.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, LifecycleError> {
        config.validate().map_err(LifecycleError::InvalidConfig)?;
        Ok(Self {
            list_bound: config.list_bound,
            poll_interval: config.poll_interval(),
            max_attempts: config.max_attempts,
        })
    }

    /// A zero list bound lists nothing and so always looks empty.
    pub fn validate(&self) -> Result<(), LifecycleError> {
        let mut errors = Vec::new();
        if self.list_bound <= 0 {
            errors.push(format!("list bound must be positive, got {}", self.list_bound));
        }
        if self.poll_interval.is_zero() {
            errors.push("poll interval cannot be 0".to_string());
        }
        if self.max_attempts == 0 {
            errors.push("max attempts cannot be 0".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::InvalidConfig(errors))
        }
    }

    /// How long a single attempt waits for the collection to drain.
    pub fn convergence_timeout(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }

    pub fn poller(&self) -> Poller {
        Poller::new(self.poll_interval, self.convergence_timeout())
    }
}

/// Outcome of a successful `clear_all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub found: usize,
    pub delete_failures: usize,
}

#[derive(Debug)]
pub struct FixtureLifecycle<S> {
    service: S,
    policy: CleanupPolicy,
}

impl<S: TodoService> FixtureLifecycle<S> {
    pub fn new(service: S, policy: CleanupPolicy) -> Result<Self, LifecycleError> {
        policy.validate()?;
        Ok(Self { service, policy })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn policy(&self) -> &CleanupPolicy {
        &self.policy
    }

    /// Deletes every listed item and waits until the service reports an
    /// empty collection. Performs no deletes when it is already empty.
    pub fn clear_all(&self) -> Result<ClearReport, LifecycleError> {
        let todos = self.service.list(0, self.policy.list_bound)?;
        if todos.is_empty() {
            trace!("no todos to delete");
            return Ok(ClearReport::default());
        }

        trace!(count = todos.len(), "found todos to delete");
        let delete_failures = todos
            .par_iter()
            .filter(|todo| !self.delete_quietly(todo))
            .count();

        let mut remaining = todos.len();
        let polled = self.policy.poller().until(|| -> Result<bool, ApiError> {
            remaining = self.service.list(0, self.policy.list_bound)?.len();
            trace!(remaining, "checking whether todo list is empty");
            Ok(remaining == 0)
        });
        match polled {
            Ok(()) => Ok(ClearReport {
                found: todos.len(),
                delete_failures,
            }),
            Err(PollError::Condition(err)) => Err(LifecycleError::Api(err)),
            Err(PollError::Timeout { waited, .. }) => {
                Err(LifecycleError::ConvergenceTimeout { remaining, waited })
            }
        }
    }

    /// Pre-test hook: start `test` from an empty collection.
    pub fn before_each(&self, test: &str) -> Result<ClearReport, LifecycleError> {
        debug!(test, "clearing todos before test");
        self.clear_all()
    }

    /// Post-suite hook: retry `clear_all` until it succeeds or the attempts
    /// run out.
    pub fn clean_up(&self) -> Result<(), LifecycleError> {
        retry(self.policy.max_attempts, self.policy.poll_interval, |attempt| {
            trace!(attempt, "final cleanup attempt");
            self.clear_all()
        })
        .map(|_| ())
        .map_err(|e| {
            error!(attempts = e.attempts, error = %e.last, "failed to clear all todos");
            LifecycleError::CleanupExhausted {
                attempts: e.attempts,
                last: Box::new(e.last),
            }
        })
    }

    fn delete_quietly(&self, todo: &TodoItem) -> bool {
        let Some(id) = todo.id else {
            warn!(text = todo.text(), "listed todo has no id, cannot delete it");
            return false;
        };
        match self.service.delete(id) {
            Ok(()) => {
                trace!(id, "deleted todo");
                true
            }
            Err(err) => {
                warn!(id, %err, "failed to delete todo");
                false
            }
        }
    }
}

/// After-suite hook bound to a scope.
///
/// `finish` runs the final cleanup and panics if it is exhausted. A guard
/// dropped without `finish` or `dismiss` does the same, except while the
/// thread is already unwinding, where a failed cleanup is only logged.
pub struct SuiteGuard<S: TodoService> {
    name: String,
    lifecycle: FixtureLifecycle<S>,
    finished: bool,
}

impl<S: TodoService> SuiteGuard<S> {
    pub fn new(name: impl Into<String>, lifecycle: FixtureLifecycle<S>) -> Self {
        Self {
            name: name.into(),
            lifecycle,
            finished: false,
        }
    }

    pub fn lifecycle(&self) -> &FixtureLifecycle<S> {
        &self.lifecycle
    }

    pub fn before_each(&self, test: &str) -> Result<ClearReport, LifecycleError> {
        self.lifecycle.before_each(test)
    }

    pub fn finish(mut self) {
        self.finished = true;
        self.final_clean_up();
    }

    /// Drops the guard without the final cleanup, for suites that leave
    /// the service in a known-broken state on purpose.
    pub fn dismiss(mut self) {
        self.finished = true;
    }

    fn final_clean_up(&self) {
        debug!(suite = %self.name, "starting final data cleanup");
        match self.lifecycle.clean_up() {
            Ok(()) => debug!(suite = %self.name, "cleared all todos after suite"),
            Err(err) if thread::panicking() => {
                error!(suite = %self.name, %err, "final cleanup failed during unwind");
            }
            Err(err) => panic!("suite {}: {err}", self.name),
        }
    }
}

impl<S: TodoService> Drop for SuiteGuard<S> {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            self.final_clean_up();
        }
    }
}
