use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::blob::{BlobStore, StoreError};
use crate::models::CatalogItem;

/// Catalog items are kept per seller, one blob per seller id, loaded on
/// first touch. A seller with no catalog reads as an empty list; whether
/// the seller exists at all is the partner directory's question.
pub struct CatalogStore {
    blobs: Arc<dyn BlobStore>,
    sellers: RwLock<HashMap<i64, Vec<CatalogItem>>>,
}

fn blob_key(seller_id: i64) -> String {
    format!("catalog_{seller_id}")
}

impl CatalogStore {
    pub(super) fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            sellers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn items_for(&self, seller_id: i64) -> Result<Vec<CatalogItem>, StoreError> {
        {
            let sellers = self.sellers.read().await;
            if let Some(items) = sellers.get(&seller_id) {
                return Ok(items.clone());
            }
        }
        let mut sellers = self.sellers.write().await;
        // Another task may have loaded the blob while we waited.
        if let Some(items) = sellers.get(&seller_id) {
            return Ok(items.clone());
        }
        let items: Vec<CatalogItem> = match self.blobs.load(&blob_key(seller_id)).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        sellers.insert(seller_id, items.clone());
        Ok(items)
    }

    pub async fn get_item(
        &self,
        seller_id: i64,
        item_id: i64,
    ) -> Result<Option<CatalogItem>, StoreError> {
        let items = self.items_for(seller_id).await?;
        Ok(items.into_iter().find(|item| item.id == item_id))
    }

    /// Assigns the next free id within the seller's collection and
    /// persists the item.
    pub async fn insert_item(
        &self,
        seller_id: i64,
        mut item: CatalogItem,
    ) -> Result<CatalogItem, StoreError> {
        self.items_for(seller_id).await?;
        let mut sellers = self.sellers.write().await;
        let items = sellers.entry(seller_id).or_default();
        item.id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        items.push(item.clone());
        self.flush(seller_id, items).await?;
        Ok(item)
    }

    /// Upsert by item id within the seller's collection.
    pub async fn put_item(
        &self,
        seller_id: i64,
        item: CatalogItem,
    ) -> Result<CatalogItem, StoreError> {
        // Warm the cache so the merge below sees the persisted rows.
        self.items_for(seller_id).await?;
        let mut sellers = self.sellers.write().await;
        let items = sellers.entry(seller_id).or_default();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item.clone(),
            None => items.push(item.clone()),
        }
        self.flush(seller_id, items).await?;
        Ok(item)
    }

    pub async fn delete_item(&self, seller_id: i64, item_id: i64) -> Result<bool, StoreError> {
        self.items_for(seller_id).await?;
        let mut sellers = self.sellers.write().await;
        let items = sellers.entry(seller_id).or_default();
        let before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == before {
            return Ok(false);
        }
        self.flush(seller_id, items).await?;
        Ok(true)
    }

    /// Wholesale replacement of one seller's catalog, used by the seeder.
    pub async fn replace_all(
        &self,
        seller_id: i64,
        items: Vec<CatalogItem>,
    ) -> Result<(), StoreError> {
        let mut sellers = self.sellers.write().await;
        self.flush(seller_id, &items).await?;
        sellers.insert(seller_id, items);
        Ok(())
    }

    async fn flush(&self, seller_id: i64, items: &[CatalogItem]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(items)?;
        self.blobs.save(&blob_key(seller_id), &bytes).await
    }
}
