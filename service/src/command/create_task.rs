//! [`Command`] for creating a new [`Task`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::Task,
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Task`].
///
/// Silently replaces an existing [`Task`] with the same ID.
#[derive(Clone, Debug)]
pub struct CreateTask {
    /// [`Task`] to create.
    pub task: Task,
}

impl<Db> Command<CreateTask> for Service<Db>
where
    Db: Database<Insert<Task>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Task;
    type Err = ExecutionError;

    async fn execute(&self, cmd: CreateTask) -> Result<Self::Ok, Self::Err> {
        let CreateTask { task } = cmd;

        self.database()
            .execute(Insert(task.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(task)
    }
}

/// Error of [`CreateTask`] [`Command`] execution.
pub type ExecutionError = Traced<database::Error>;
