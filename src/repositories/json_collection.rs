use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::models::RepositoryResult;

/// A whole-document JSON collection persisted at a fixed file path.
///
/// Every load parses the complete file and every save rewrites it; there are
/// no partial reads, no streaming, and no cross-request cache. The embedded
/// mutex serializes read-modify-write cycles within this process so two
/// concurrent mutations of the same collection cannot discard each other's
/// file rewrite.
pub struct JsonCollectionFile<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<T>,
}

impl<T> JsonCollectionFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the collection lock for the duration of a read-modify-write
    /// cycle.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Parse the file's full contents as a JSON array of records.
    ///
    /// A missing or unreadable file is an error: collections are seeded with
    /// an empty array up front, never created on demand.
    pub async fn load(&self) -> RepositoryResult<Vec<T>> {
        debug!(path = %self.path.display(), "Loading collection");
        let contents = tokio::fs::read(&self.path).await?;
        let records = serde_json::from_slice(&contents)?;
        Ok(records)
    }

    /// Serialize the full record sequence back to the file, replacing its
    /// previous contents.
    pub async fn save(&self, records: &[T]) -> RepositoryResult<()> {
        debug!(path = %self.path.display(), count = records.len(), "Saving collection");
        let contents = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}
