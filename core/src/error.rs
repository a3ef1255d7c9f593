//! Error types for the todo API harness.
//!
//! # Design
//! `ApiError` covers a single HTTP exchange. `NotFound` and
//! `UnexpectedStatus` are the "assertion failed" class: the call went
//! through but the service answered with a status the caller did not
//! expect. `Transport` means the exchange itself failed and is never
//! retried at this layer.
//!
//! `LifecycleError` covers fixture cleanup. Only `CleanupExhausted` is
//! meant to end a whole run.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `TodoApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 where a success was expected.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status outside the expected set.
    #[error("expected HTTP {expected:?}, got {status}: {body}")]
    UnexpectedStatus {
        expected: Vec<u16>,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Status code carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while bringing the remote collection back to empty.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The collection was still non-empty when the poll deadline passed.
    #[error("collection did not converge to empty within {waited:?} ({remaining} items left)")]
    ConvergenceTimeout { remaining: usize, waited: Duration },

    /// Settings under which cleanup could report success on a non-empty
    /// collection, such as a list bound of zero.
    #[error("invalid cleanup configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Every suite-level cleanup attempt failed.
    #[error("cleanup failed after {attempts} attempts: {last}")]
    CleanupExhausted {
        attempts: u32,
        last: Box<LifecycleError>,
    },
}
