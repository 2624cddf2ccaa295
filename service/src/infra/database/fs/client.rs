//! Filesystem database client definitions.

use std::{fmt, future::Future, path::PathBuf, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Task, User};

use super::Collection;

/// Guard of the exclusive write access to the whole storage.
pub type WriteGuard = OwnedMutexGuard<()>;

/// Storage shared by all the clients.
#[derive(Debug)]
struct Storage {
    /// [`Collection`] of [`User`]s.
    users: Collection<User>,

    /// [`Collection`] of [`Task`]s.
    tasks: Collection<Task>,

    /// Lock serializing all the writers of this [`Storage`].
    writer: Arc<Mutex<()>>,
}

/// Generic filesystem database connection.
pub trait Connection {
    /// Returns the [`Collection`] of [`User`]s.
    fn users(&self) -> &Collection<User>;

    /// Returns the [`Collection`] of [`Task`]s.
    fn tasks(&self) -> &Collection<Task>;

    /// Acquires the exclusive write access to the storage, unless this
    /// [`Connection`] holds it already.
    ///
    /// The returned [`WriteGuard`] must be held until the write completes.
    fn acquire_writer(&self) -> impl Future<Output = Option<WriteGuard>> + Send;
}

/// Non-transactional filesystem database client.
///
/// Each write operation is serialized against all the other writers on its
/// own.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// Shared [`Storage`].
    storage: Arc<Storage>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client storing the collections in the files at
    /// the provided paths.
    #[must_use]
    pub fn new(users: impl Into<PathBuf>, tasks: impl Into<PathBuf>) -> Self {
        Self {
            storage: Arc::new(Storage {
                users: Collection::new(users),
                tasks: Collection::new(tasks),
                writer: Arc::new(Mutex::new(())),
            }),
        }
    }
}

impl Connection for NonTx {
    fn users(&self) -> &Collection<User> {
        &self.storage.users
    }

    fn tasks(&self) -> &Collection<Task> {
        &self.storage.tasks
    }

    async fn acquire_writer(&self) -> Option<WriteGuard> {
        Some(Arc::clone(&self.storage.writer).lock_owned().await)
    }
}

/// Transactional filesystem database client.
///
/// Holds the exclusive write access to the whole storage from its creation
/// until [`Tx::commit()`], so a read followed by a dependent write cannot be
/// interleaved with any other writer.
///
/// Writes are applied immediately, [`Tx::commit()`] only releases the write
/// access. If dropped without committing, the access is released as well.
#[derive(Clone)]
pub struct Tx {
    /// Shared [`Storage`].
    storage: Arc<Storage>,

    /// Held write access, if not committed yet.
    guard: Arc<Mutex<Option<WriteGuard>>>,
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tx")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl Tx {
    /// Starts a new [`Tx`] from the provided [`NonTx`] client, waiting for
    /// the exclusive write access.
    pub async fn begin(client: NonTx) -> Self {
        let guard = Arc::clone(&client.storage.writer).lock_owned().await;
        Self {
            storage: client.storage,
            guard: Arc::new(Mutex::new(Some(guard))),
        }
    }

    /// Commits this [`Tx`], releasing the held write access.
    ///
    /// Any writes after committing are serialized on their own, as in a
    /// [`NonTx`] client.
    pub async fn commit(&self) {
        drop(self.guard.lock().await.take());
    }
}

impl Connection for Tx {
    fn users(&self) -> &Collection<User> {
        &self.storage.users
    }

    fn tasks(&self) -> &Collection<Task> {
        &self.storage.tasks
    }

    async fn acquire_writer(&self) -> Option<WriteGuard> {
        if self.guard.lock().await.is_some() {
            return None;
        }
        Some(Arc::clone(&self.storage.writer).lock_owned().await)
    }
}
