//! Blocking wait utilities with explicit deadlines.
//!
//! `Poller::until` re-evaluates a condition at a fixed interval until it
//! holds or the deadline passes. `retry` re-runs a fallible action a fixed
//! number of times. Neither blocks indefinitely.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum PollError<E: fmt::Display> {
    /// Evaluating the condition failed; polling stopped immediately.
    #[error("condition failed: {0}")]
    Condition(E),

    #[error("condition not met within {waited:?} after {checks} checks")]
    Timeout { waited: Duration, checks: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Poller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Checks `condition` immediately, then every `interval`, with a last
    /// check at the deadline.
    pub fn until<E, F>(&self, mut condition: F) -> Result<(), PollError<E>>
    where
        E: fmt::Display,
        F: FnMut() -> Result<bool, E>,
    {
        let start = Instant::now();
        let deadline = start + self.timeout;
        let mut checks = 0;
        loop {
            checks += 1;
            if condition().map_err(PollError::Condition)? {
                trace!(checks, "condition met");
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(PollError::Timeout {
                    waited: now - start,
                    checks,
                });
            }
            thread::sleep(self.interval.min(deadline - now));
        }
    }
}

#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts: {last}")]
pub struct RetryError<E: fmt::Display> {
    pub attempts: u32,
    pub last: E,
}

/// Runs `action` up to `max_attempts` times, sleeping `delay` between
/// attempts. The closure receives the 1-based attempt number.
pub fn retry<T, E, F>(max_attempts: u32, delay: Duration, mut action: F) -> Result<T, RetryError<E>>
where
    E: fmt::Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt = 1;
    loop {
        match action(attempt) {
            Ok(value) => return Ok(value),
            Err(last) if attempt >= max_attempts => {
                return Err(RetryError {
                    attempts: attempt,
                    last,
                })
            }
            Err(err) => {
                trace!(attempt, %err, "attempt failed, retrying");
                thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Poller {
        Poller::new(Duration::from_millis(5), Duration::from_millis(50))
    }

    #[test]
    fn until_returns_at_once_when_condition_holds() {
        let mut checks = 0;
        fast()
            .until(|| {
                checks += 1;
                Ok::<_, String>(true)
            })
            .unwrap();
        assert_eq!(checks, 1);
    }

    #[test]
    fn until_keeps_checking_until_condition_holds() {
        let mut checks = 0;
        fast()
            .until(|| {
                checks += 1;
                Ok::<_, String>(checks == 3)
            })
            .unwrap();
        assert_eq!(checks, 3);
    }

    #[test]
    fn until_times_out_without_overrunning_deadline() {
        let start = Instant::now();
        let err = fast().until(|| Ok::<_, String>(false)).unwrap_err();
        let elapsed = start.elapsed();

        let PollError::Timeout { waited, checks } = err else {
            panic!("expected timeout");
        };
        assert!(waited >= Duration::from_millis(50));
        assert!(checks >= 2);
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn until_stops_on_condition_error() {
        let mut checks = 0;
        let err = fast()
            .until(|| {
                checks += 1;
                Err::<bool, _>("boom".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, PollError::Condition(ref e) if e == "boom"));
        assert_eq!(checks, 1);
    }

    #[test]
    fn retry_returns_first_success() {
        let value = retry(5, Duration::from_millis(1), |attempt| {
            if attempt < 3 {
                Err(format!("attempt {attempt}"))
            } else {
                Ok(attempt)
            }
        })
        .unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn retry_uses_every_attempt_before_giving_up() {
        let mut calls = 0;
        let err = retry(5, Duration::from_millis(1), |attempt| {
            calls += 1;
            Err::<(), _>(format!("attempt {attempt}"))
        })
        .unwrap_err();
        assert_eq!(calls, 5);
        assert_eq!(err.attempts, 5);
        assert_eq!(err.last, "attempt 5");
    }

    #[test]
    fn retry_single_attempt_does_not_sleep() {
        let start = Instant::now();
        let err = retry(1, Duration::from_secs(5), |_| Err::<(), _>("no")).unwrap_err();
        assert_eq!(err.attempts, 1);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
