//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::User,
    infra::{
        database::{self, fs::Connection, Fs},
        Database,
    },
};

impl<C> Database<Select<By<Vec<User>, ()>>> for Fs<C>
where
    C: Connection,
{
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.users().read().await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<User>> for Fs<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let _writer = self.acquire_writer().await;
        self.users()
            .rewrite(|users| users.push(user))
            .await
            .map_err(tracerr::wrap!())
    }
}
