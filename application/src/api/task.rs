//! [`Task`]-related definitions.

use juniper::{GraphQLInputObject, GraphQLObject};
use service::domain::{self, task};

/// A tracked `Task`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Task {
    /// Unique identifier of this `Task`.
    pub id: String,

    /// Content of this `Task`.
    pub content: String,

    /// Status of this `Task`.
    pub status: String,

    /// Date of this `Task`.
    pub date: String,

    /// Name of the file attached to this `Task`.
    pub file_name: String,

    /// Content of the file attached to this `Task`.
    pub file_content: String,
}

impl From<domain::Task> for Task {
    fn from(task: domain::Task) -> Self {
        let domain::Task {
            id,
            content,
            status,
            date,
            file_name,
            file_content,
        } = task;
        Self {
            id: id.into(),
            content,
            status,
            date,
            file_name,
            file_content,
        }
    }
}

/// `Task` fields provided by a client.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct TaskInput {
    /// Unique identifier of the `Task`.
    ///
    /// Generated if omitted on creation.
    pub id: Option<String>,

    /// Content of the `Task`.
    pub content: Option<String>,

    /// Status of the `Task`.
    pub status: Option<String>,

    /// Date of the `Task`.
    pub date: Option<String>,

    /// Name of the file attached to the `Task`.
    pub file_name: Option<String>,

    /// Content of the file attached to the `Task`.
    pub file_content: Option<String>,
}

impl From<TaskInput> for domain::Task {
    fn from(input: TaskInput) -> Self {
        let TaskInput {
            id,
            content,
            status,
            date,
            file_name,
            file_content,
        } = input;
        Self {
            id: id.map_or_else(task::Id::new, Into::into),
            content: content.unwrap_or_default(),
            status: status.unwrap_or_default(),
            date: date.unwrap_or_default(),
            file_name: file_name.unwrap_or_default(),
            file_content: file_content.unwrap_or_default(),
        }
    }
}

/// Input of the `create` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct CreatedDataInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// `Task` to create.
    pub task: Option<TaskInput>,
}

/// Input of the `update` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct UpdatedDataInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// New fields of the `Task`, identified by its `id`.
    pub task: Option<TaskInput>,
}

/// Input identifying a single `Task`.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct IdDataInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// Unique identifier of the `Task`.
    pub id: Option<String>,
}

/// Input of the `getAllTasks` query.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct SearchDataInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// Substring of the `Task` content to search for.
    ///
    /// All `Task`s are returned if omitted or empty.
    pub search_str: Option<String>,
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::TaskInput;

    #[test]
    fn generates_id_when_omitted() {
        let input = TaskInput {
            id: None,
            content: Some("buy milk".into()),
            status: None,
            date: None,
            file_name: None,
            file_content: None,
        };

        let a = domain::Task::from(input.clone());
        let b = domain::Task::from(input);

        assert_ne!(a.id, b.id);
        assert_eq!(a.content, "buy milk");
        assert_eq!(a.status, "");
    }
}
