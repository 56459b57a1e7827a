use std::path::Path;

use amber::ports::StoreAdapter;
use async_trait::async_trait;
use shared::{Error, Result};
use tracing::debug;

const TREE_NAME: &str = "amber-data";

/// Sled-backed store adapter.
///
/// Records live in a dedicated tree so `clear` wipes only the cache's
/// namespace and leaves other trees in the same database untouched.
pub struct SledStore {
    tree: sled::Tree,
}

impl SledStore {
    /// Opens the database at `path` and the cache tree inside it.
    /// Creates the parent directory if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Unavailable(format!("failed to create directory: {e}")))?;
        }

        let db = sled::open(&path)
            .map_err(|e| Error::Unavailable(format!("failed to open sled database: {e}")))?;
        let tree = db
            .open_tree(TREE_NAME)
            .map_err(|e| Error::Unavailable(format!("failed to open cache tree: {e}")))?;

        debug!(path = %path.as_ref().display(), "opened sled store");
        Ok(Self { tree })
    }
}

#[async_trait]
impl StoreAdapter for SledStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let record = self
            .tree
            .get(key.as_bytes())
            .map_err(|e| Error::ReadFailed(format!("sled get: {e}")))?;

        match record {
            Some(bytes) => {
                let payload = String::from_utf8(bytes.to_vec())
                    .map_err(|e| Error::ReadFailed(format!("stored record is not utf-8: {e}")))?;
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.tree
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| Error::WriteFailed(format!("sled insert: {e}")))?;
        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::WriteFailed(format!("sled flush: {e}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.tree
            .remove(key.as_bytes())
            .map_err(|e| Error::DeleteFailed(format!("sled remove: {e}")))?;
        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::DeleteFailed(format!("sled flush: {e}")))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.tree
            .clear()
            .map_err(|e| Error::ClearFailed(format!("sled clear: {e}")))?;
        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::ClearFailed(format!("sled flush: {e}")))?;
        Ok(())
    }

    async fn probe(&self) -> Result<()> {
        // Verifies the tree accepts IO before the cache starts using it.
        self.tree
            .flush_async()
            .await
            .map_err(|e| Error::Unavailable(format!("sled probe: {e}")))?;
        Ok(())
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("records", &self.tree.len())
            .finish()
    }
}
