//! [`Task`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{task, Task},
    infra::{
        database::{self, fs::Connection, Fs},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Task>, task::Search>>> for Fs<C>
where
    C: Connection,
{
    type Ok = Vec<Task>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Task>, task::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        let mut tasks = self.tasks().read().await.map_err(tracerr::wrap!())?;
        tasks.retain(|t| search.matches(t));
        Ok(tasks)
    }
}

impl<C> Database<Select<By<Option<Task>, task::Id>>> for Fs<C>
where
    C: Connection,
{
    type Ok = Option<Task>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Task>, task::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .tasks()
            .read()
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .find(|t| t.id == id))
    }
}

impl<C> Database<Insert<Task>> for Fs<C>
where
    C: Connection,
    Self: Database<Update<Task>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(task): Insert<Task>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(task)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Task>> for Fs<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(task): Update<Task>,
    ) -> Result<Self::Ok, Self::Err> {
        let _writer = self.acquire_writer().await;
        self.tasks()
            .rewrite(|tasks| {
                if let Some(existing) = tasks.iter_mut().find(|t| t.id == task.id)
                {
                    *existing = task;
                } else {
                    tasks.push(task);
                }
            })
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Task, task::Id>>> for Fs<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Task, task::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let _writer = self.acquire_writer().await;
        self.tasks()
            .rewrite(|tasks| tasks.retain(|t| t.id != id))
            .await
            .map_err(tracerr::wrap!())
    }
}
