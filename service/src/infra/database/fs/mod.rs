//! Filesystem [`Database`] implementation.
//!
//! Every collection of records lives in its own JSON file, which is read as a
//! whole and rewritten as a whole on every write.

pub mod client;
mod collection;
mod impls;

use std::{io, path::PathBuf};

use derive_more::{Deref, Display, Error as StdError, From};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{Connection, NonTx, Tx},
    collection::Collection,
};

/// Filesystem [`Database`] client.
#[derive(Clone, Debug, Deref)]
pub struct Fs<C = NonTx>(C);

impl Fs {
    /// Name of the file storing [`User`]s.
    ///
    /// [`User`]: crate::domain::User
    pub const USERS_FILE: &'static str = "users.json";

    /// Name of the file storing [`Task`]s.
    ///
    /// [`Task`]: crate::domain::Task
    pub const TASKS_FILE: &'static str = "tasks.json";

    /// Creates a new [`Fs`] client with the provided [`Config`].
    ///
    /// Creates the storage directory if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// If failed to create the storage directory.
    pub async fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        tokio::fs::create_dir_all(&conf.dir)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        log::debug!("using `{}` as storage directory", conf.dir.display());

        Ok(Self(NonTx::new(
            conf.dir.join(Self::USERS_FILE),
            conf.dir.join(Self::TASKS_FILE),
        )))
    }
}

/// [`Fs`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Directory to store collection files in.
    #[default(PathBuf::from("data"))]
    pub dir: PathBuf,
}

/// Filesystem database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// I/O error.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Collection file contains malformed JSON, or a record cannot be
    /// serialized.
    #[display("Malformed collection: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{
        By, Commit, Delete, Insert, Select, Transact, Update,
    };
    use tempfile::TempDir;

    use crate::{
        domain::{
            task,
            user::{self, Password, PasswordHash},
            Task, User,
        },
        infra::Database as _,
    };

    use super::{Config, Fs};

    async fn fs() -> (Fs, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let fs = Fs::new(&Config {
            dir: dir.path().join("storage"),
        })
        .await
        .unwrap();
        (fs, dir)
    }

    fn task(id: &str, content: &str) -> Task {
        Task {
            id: id.into(),
            content: content.into(),
            status: "open".into(),
            date: "2024-03-01".into(),
            file_name: format!("{id}.txt"),
            file_content: "attachment".into(),
        }
    }

    fn user(login: &str) -> User {
        User {
            name: user::Name::new("Ann").unwrap(),
            login: user::Login::new(login).unwrap(),
            password_hash: PasswordHash::new(&Password::from("qwerty123")),
        }
    }

    async fn all_tasks(fs: &Fs) -> Vec<Task> {
        fs.execute(Select(By::<Vec<Task>, _>::new(task::Search::default())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_storage_has_no_records() {
        let (fs, _dir) = fs().await;

        assert!(all_tasks(&fs).await.is_empty());
        assert!(fs
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            fs.execute(Select(By::<Option<Task>, _>::new(task::Id::from("t1"))))
                .await
                .unwrap(),
            None,
        );
    }

    #[tokio::test]
    async fn saves_gets_and_deletes_task() {
        let (fs, _dir) = fs().await;

        fs.execute(Insert(task("t1", "buy milk"))).await.unwrap();
        let found = fs
            .execute(Select(By::<Option<Task>, _>::new(task::Id::from("t1"))))
            .await
            .unwrap();
        assert_eq!(found, Some(task("t1", "buy milk")));

        fs.execute(Update(task("t1", "buy bread"))).await.unwrap();
        let all = all_tasks(&fs).await;
        assert_eq!(all, vec![task("t1", "buy bread")]);

        fs.execute(Delete(By::<Task, _>::new(task::Id::from("t1"))))
            .await
            .unwrap();
        assert!(all_tasks(&fs).await.is_empty());

        // Deleting an absent `Task` is a no-op.
        fs.execute(Delete(By::<Task, _>::new(task::Id::from("t1"))))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn searches_by_content_in_insertion_order() {
        let (fs, _dir) = fs().await;
        for (id, content) in
            [("t1", "buy milk"), ("t2", "call mom"), ("t3", "milk the cow")]
        {
            fs.execute(Insert(task(id, content))).await.unwrap();
        }

        let ids = |tasks: Vec<Task>| {
            tasks.into_iter().map(|t| t.id.to_string()).collect::<Vec<_>>()
        };
        assert_eq!(ids(all_tasks(&fs).await), ["t1", "t2", "t3"]);
        assert_eq!(
            ids(fs
                .execute(Select(By::<Vec<Task>, _>::new(task::Search::from("milk"))))
                .await
                .unwrap()),
            ["t1", "t3"],
        );
        assert!(fs
            .execute(Select(By::<Vec<Task>, _>::new(task::Search::from("dentist"))))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn appends_users() {
        let (fs, dir) = fs().await;

        fs.execute(Insert(user("ann"))).await.unwrap();
        fs.execute(Insert(user("bob"))).await.unwrap();

        let users = fs.execute(Select(By::<Vec<User>, _>::new(()))).await.unwrap();
        assert_eq!(users, vec![user("ann"), user("bob")]);

        let raw = std::fs::read_to_string(
            dir.path().join("storage").join(Fs::USERS_FILE),
        )
        .unwrap();
        assert!(raw.contains(r#""password": ""#));
        assert!(!raw.contains("qwerty123"));
    }

    #[tokio::test]
    async fn fails_on_malformed_collection() {
        let (fs, dir) = fs().await;
        std::fs::write(
            dir.path().join("storage").join(Fs::TASKS_FILE),
            "{not json",
        )
        .unwrap();

        assert!(fs
            .execute(Select(By::<Vec<Task>, _>::new(task::Search::default())))
            .await
            .is_err());
        assert!(fs.execute(Insert(task("t1", "buy milk"))).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_writes_are_not_lost() {
        let (fs, _dir) = fs().await;

        let handles = (0..20)
            .map(|i| {
                let fs = fs.clone();
                tokio::spawn(async move {
                    fs.execute(Insert(task(&format!("t{i}"), "parallel"))).await
                })
            })
            .collect::<Vec<_>>();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        assert_eq!(all_tasks(&fs).await.len(), 20);
    }

    #[tokio::test]
    async fn transaction_excludes_other_writers() {
        let (fs, _dir) = fs().await;

        let tx = fs.execute(Transact).await.unwrap();

        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            fs.execute(Insert(task("t2", "outside"))),
        )
        .await;
        assert!(blocked.is_err(), "write must wait for the transaction");

        tx.execute(Insert(task("t1", "inside"))).await.unwrap();
        tx.execute(Commit).await.unwrap();

        fs.execute(Insert(task("t2", "outside"))).await.unwrap();
        assert_eq!(all_tasks(&fs).await.len(), 2);
    }
}
