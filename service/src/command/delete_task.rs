//! [`Command`] for deleting a [`Task`].

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{task, Task},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Task`].
///
/// Deleting a non-existent [`Task`] succeeds.
#[derive(Clone, Debug)]
pub struct DeleteTask {
    /// ID of the [`Task`] to delete.
    pub id: task::Id,
}

impl<Db> Command<DeleteTask> for Service<Db>
where
    Db: Database<
        Delete<By<Task, task::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, cmd: DeleteTask) -> Result<Self::Ok, Self::Err> {
        let DeleteTask { id } = cmd;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteTask`] [`Command`] execution.
pub type ExecutionError = Traced<database::Error>;
