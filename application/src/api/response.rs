//! Response envelopes of the GraphQL API.

use juniper::GraphQLObject;
use tracing as log;

use crate::{api, Error};

/// Outcome of an operation.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Response {
    /// HTTP-like status code of the outcome.
    pub status: i32,

    /// Human-readable description of the outcome.
    pub message: Option<String>,
}

impl Response {
    /// Creates a successful [`Response`] without any message.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: OK,
            message: None,
        }
    }

    /// Creates a successful [`Response`] with the provided message.
    #[must_use]
    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            status: OK,
            message: Some(message.into()),
        }
    }
}

impl From<Error> for Response {
    fn from(err: Error) -> Self {
        let (status, message) = unfold(err);
        Self { status, message }
    }
}

/// Outcome of an operation returning a single `Task`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct TaskResponse {
    /// HTTP-like status code of the outcome.
    pub status: i32,

    /// Human-readable description of the outcome.
    pub message: Option<String>,

    /// Returned `Task`, if any.
    pub task: Option<api::Task>,
}

impl From<api::Task> for TaskResponse {
    fn from(task: api::Task) -> Self {
        Self {
            status: OK,
            message: None,
            task: Some(task),
        }
    }
}

impl From<Error> for TaskResponse {
    fn from(err: Error) -> Self {
        let (status, message) = unfold(err);
        Self {
            status,
            message,
            task: None,
        }
    }
}

/// Outcome of an operation returning multiple `Task`s.
#[derive(Clone, Debug, GraphQLObject)]
pub struct TasksResponse {
    /// HTTP-like status code of the outcome.
    pub status: i32,

    /// Human-readable description of the outcome.
    pub message: Option<String>,

    /// Returned `Task`s, if any.
    pub tasks: Option<Vec<api::Task>>,
}

impl From<Vec<api::Task>> for TasksResponse {
    fn from(tasks: Vec<api::Task>) -> Self {
        Self {
            status: OK,
            message: None,
            tasks: Some(tasks),
        }
    }
}

impl From<Error> for TasksResponse {
    fn from(err: Error) -> Self {
        let (status, message) = unfold(err);
        Self {
            status,
            message,
            tasks: None,
        }
    }
}

/// Status of a successful outcome.
const OK: i32 = 200;

/// Unfolds the provided [`Error`] into the status and message of an
/// envelope, logging server errors.
fn unfold(err: Error) -> (i32, Option<String>) {
    if err.status_code.is_server_error() {
        log::error!("{err}");
    }
    (i32::from(err.status_code.as_u16()), Some(err.message))
}
