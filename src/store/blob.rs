use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob io: {0}")]
    Io(#[from] std::io::Error),

    #[error("blob encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Key-value substrate backing every collection. Each collection is one
/// JSON blob under its own key; a write replaces the whole blob. Callers
/// serialize their own read-modify-write cycles per collection.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local substrate; used by tests and `DATA_DIR`-less runs.
#[derive(Debug, Default)]
pub struct MemoryBlobs {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl BlobStore for MemoryBlobs {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.blobs.lock().await.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.blobs.lock().await.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per collection under the data directory.
#[derive(Debug)]
pub struct FileBlobs {
    dir: PathBuf,
}

impl FileBlobs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl BlobStore for FileBlobs {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
