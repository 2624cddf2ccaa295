//! [`Command`] for updating an existing [`Task`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{task, Task},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Task`].
///
/// Only [`Task::content`], [`Task::status`] and [`Task::date`] are changed,
/// the attached file stays untouched.
#[derive(Clone, Debug)]
pub struct UpdateTask {
    /// ID of the [`Task`] to update.
    pub id: task::Id,

    /// New [`Task::content`].
    pub content: String,

    /// New [`Task::status`].
    pub status: String,

    /// New [`Task::date`].
    pub date: String,
}

impl<Db> Command<UpdateTask> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Task>, task::Id>>,
            Ok = Option<Task>,
            Err = Traced<database::Error>,
        > + Database<Update<Task>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Task;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateTask) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTask {
            id,
            content,
            status,
            date,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut task = tx
            .execute(Select(By::<Option<Task>, _>::new(id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::TaskNotExists(id)))?;

        task.content = content;
        task.status = status;
        task.date = date;

        tx.execute(Update(task.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(task)
    }
}

/// Error of [`UpdateTask`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Task`] with the provided [`task::Id`] does not exist.
    #[display("`Task(id: {_0})` does not exist")]
    TaskNotExists(#[error(not(source))] task::Id),
}
