use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::blob::{BlobStore, StoreError};
use crate::models::{AuditEntry, BusinessPartner, DeliveryPartner, User};

/// Row held in a [`Collection`]; `key` is the upsert identity (generated
/// id or natural key).
pub trait Keyed: Clone + Send + Sync + 'static {
    type Key: PartialEq + Clone + Send + Sync;

    fn key(&self) -> Self::Key;
}

impl Keyed for User {
    type Key = String;

    fn key(&self) -> String {
        self.email.clone()
    }
}

impl Keyed for BusinessPartner {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for DeliveryPartner {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for AuditEntry {
    type Key = uuid::Uuid;

    fn key(&self) -> uuid::Uuid {
        self.id
    }
}

/// A typed collection over one blob. Reads hand back owned clones so no
/// caller ever observes another caller's in-flight reference; writes hold
/// the exclusive lock across the whole read-modify-write of the blob.
pub struct Collection<T: Keyed> {
    key: &'static str,
    blobs: Arc<dyn BlobStore>,
    rows: RwLock<Vec<T>>,
}

impl<T> Collection<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    pub(super) async fn open(
        key: &'static str,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<Self, StoreError> {
        let rows = match blobs.load(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        Ok(Self {
            key,
            blobs,
            rows: RwLock::new(rows),
        })
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, key: &T::Key) -> Option<T> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.key() == *key)
            .cloned()
    }

    /// Upsert by key; returns the stored row.
    pub async fn put(&self, row: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.key() == row.key()) {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
        self.flush(&rows).await?;
        Ok(row)
    }

    /// Returns false when no row matched; removing an absent row is not
    /// an error at this layer.
    pub async fn delete(&self, key: &T::Key) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.key() != *key);
        if rows.len() == before {
            return Ok(false);
        }
        self.flush(&rows).await?;
        Ok(true)
    }

    /// Wholesale replacement, used by the reference-data seeder.
    pub async fn replace_all(&self, new_rows: Vec<T>) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        *rows = new_rows;
        self.flush(&rows).await
    }

    async fn flush(&self, rows: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(rows)?;
        self.blobs.save(self.key, &bytes).await
    }
}
