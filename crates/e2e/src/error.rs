//! Error types for the harness
//!
//! Creation, login, transition, and deletion failures each carry the
//! backend's status code and raw response body, so a failing test names
//! the exact API exchange that broke it. Cleanup failures never surface
//! here; they are downgraded to warnings and counted in
//! [`crate::CleanupReport`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("failed to create {kind}: {status}: {body}")]
    Creation {
        kind: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("login failed for created user {user_id} (the account is tracked for cleanup): {status}: {body}")]
    Login {
        user_id: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{action} failed for {id}: {status}: {body}")]
    Transition {
        action: String,
        id: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to delete {kind} {id}: {status}: {body}")]
    Deletion {
        kind: String,
        id: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
