//! [`Collection`] definitions.

use std::{
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracerr::Traced;
use tracing as log;

use crate::infra::database::{self, fs::Error};

/// Collection of `T` records stored as a JSON array in a single file.
///
/// Reads share the [`Collection`], while each rewrite holds it exclusively
/// for the whole read-modify-write cycle.
#[derive(Debug)]
pub struct Collection<T> {
    /// Path to the file storing this [`Collection`].
    path: PathBuf,

    /// Lock guarding the file of this [`Collection`].
    lock: RwLock<()>,

    /// Type of the records in this [`Collection`].
    _of: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: DeserializeOwned + Serialize,
{
    /// Creates a new [`Collection`] stored in the file at the provided `path`.
    ///
    /// The file is not touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
            _of: PhantomData,
        }
    }

    /// Returns the path to the file storing this [`Collection`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all the records of this [`Collection`] in their insertion order.
    ///
    /// # Errors
    ///
    /// If failed to read or parse the file of this [`Collection`].
    pub async fn read(&self) -> Result<Vec<T>, Traced<database::Error>> {
        let _guard = self.lock.read().await;
        self.load().await
    }

    /// Rewrites this [`Collection`] with the records modified by the provided
    /// function, returning its output.
    ///
    /// # Errors
    ///
    /// If failed to read, parse or write the file of this [`Collection`].
    /// Nothing is written if reading fails.
    pub async fn rewrite<R>(
        &self,
        modify: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let _guard = self.lock.write().await;

        let mut records = self.load().await?;
        let output = modify(&mut records);
        self.store(&records).await?;

        Ok(output)
    }

    /// Loads the records from the file of this [`Collection`].
    ///
    /// Missing or empty file is considered an empty [`Collection`].
    async fn load(&self) -> Result<Vec<T>, Traced<database::Error>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(e)
                    .map_err(tracerr::from_and_wrap!(=> Error))
                    .map_err(tracerr::map_from);
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(vec![]);
        }

        serde_json::from_slice(&bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Stores the provided records into the file of this [`Collection`].
    ///
    /// Writes into a temporary file first, and then renames it over the
    /// [`Collection`] file, so readers never observe a partial write.
    async fn store(&self, records: &[T]) -> Result<(), Traced<database::Error>> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, bytes)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        log::debug!(
            "rewritten `{}` with {} records",
            self.path.display(),
            records.len(),
        );

        Ok(())
    }
}
