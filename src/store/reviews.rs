use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::blob::{BlobStore, StoreError};
use crate::models::{Review, TargetKind};

const BLOB_KEY: &str = "reviews";

#[derive(Default)]
struct ReviewsInner {
    rows: HashMap<Uuid, Review>,
    /// Incrementally maintained join index; rating aggregation is a map
    /// lookup per catalog item instead of a rescan of every review.
    by_target: HashMap<(TargetKind, i64), Vec<Uuid>>,
}

impl ReviewsInner {
    fn index(&mut self, review: &Review) {
        self.by_target
            .entry((review.kind, review.target_id))
            .or_default()
            .push(review.id);
    }

    fn unindex(&mut self, review: &Review) {
        if let Some(ids) = self.by_target.get_mut(&(review.kind, review.target_id)) {
            ids.retain(|id| *id != review.id);
            if ids.is_empty() {
                self.by_target.remove(&(review.kind, review.target_id));
            }
        }
    }
}

pub struct ReviewCollection {
    blobs: Arc<dyn BlobStore>,
    inner: RwLock<ReviewsInner>,
}

impl ReviewCollection {
    pub(super) async fn open(blobs: Arc<dyn BlobStore>) -> Result<Self, StoreError> {
        let rows: Vec<Review> = match blobs.load(BLOB_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        let mut inner = ReviewsInner::default();
        for review in rows {
            inner.index(&review);
            inner.rows.insert(review.id, review);
        }
        Ok(Self {
            blobs,
            inner: RwLock::new(inner),
        })
    }

    pub async fn all(&self) -> Vec<Review> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<Review> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    pub async fn for_target(&self, kind: TargetKind, target_id: i64) -> Vec<Review> {
        let inner = self.inner.read().await;
        inner
            .by_target
            .get(&(kind, target_id))
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.rows.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn by_author(
        &self,
        kind: TargetKind,
        target_id: i64,
        author_email: &str,
    ) -> Option<Review> {
        let inner = self.inner.read().await;
        inner
            .by_target
            .get(&(kind, target_id))
            .and_then(|ids| {
                ids.iter()
                    .filter_map(|id| inner.rows.get(id))
                    .find(|review| review.author_email == author_email)
            })
            .cloned()
    }

    pub async fn put(&self, review: Review) -> Result<Review, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(previous) = inner.rows.remove(&review.id) {
            inner.unindex(&previous);
        }
        inner.index(&review);
        inner.rows.insert(review.id, review.clone());
        self.flush(&inner).await?;
        Ok(review)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(review) = inner.rows.remove(&id) else {
            return Ok(false);
        };
        inner.unindex(&review);
        self.flush(&inner).await?;
        Ok(true)
    }

    async fn flush(&self, inner: &ReviewsInner) -> Result<(), StoreError> {
        let rows: Vec<&Review> = inner.rows.values().collect();
        let bytes = serde_json::to_vec(&rows)?;
        self.blobs.save(BLOB_KEY, &bytes).await
    }
}
