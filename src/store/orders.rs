use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::blob::{BlobStore, StoreError};
use crate::models::Order;

const BLOB_KEY: &str = "orders";

#[derive(Debug, Serialize, Deserialize)]
struct OrdersBlob {
    next_id: i64,
    orders: Vec<Order>,
}

/// Order collection plus the persisted id sequence. Ids start at 1 on an
/// empty collection, are assigned under the write lock, and are never
/// handed out twice; deleting the newest order does not roll the
/// sequence back.
pub struct OrderCollection {
    blobs: Arc<dyn BlobStore>,
    inner: RwLock<OrdersBlob>,
}

impl OrderCollection {
    pub(super) async fn open(blobs: Arc<dyn BlobStore>) -> Result<Self, StoreError> {
        let mut state: OrdersBlob = match blobs.load(BLOB_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => OrdersBlob {
                next_id: 1,
                orders: Vec::new(),
            },
        };
        // Guard against blobs written by hand or by an older build: the
        // sequence must stay ahead of every id already on record.
        let max_id = state.orders.iter().map(|o| o.id).max().unwrap_or(0);
        state.next_id = state.next_id.max(max_id + 1);
        Ok(Self {
            blobs,
            inner: RwLock::new(state),
        })
    }

    pub async fn all(&self) -> Vec<Order> {
        self.inner.read().await.orders.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Order> {
        self.inner
            .read()
            .await
            .orders
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// Assigns the next id to `order` and persists it.
    pub async fn insert(&self, mut order: Order) -> Result<Order, StoreError> {
        let mut inner = self.inner.write().await;
        order.id = inner.next_id;
        inner.next_id += 1;
        inner.orders.push(order.clone());
        self.flush(&inner).await?;
        Ok(order)
    }

    /// Upsert by id; used for status updates on an order already read back.
    pub async fn put(&self, order: Order) -> Result<Order, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order.clone(),
            None => inner.orders.push(order.clone()),
        }
        self.flush(&inner).await?;
        Ok(order)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.orders.len();
        inner.orders.retain(|order| order.id != id);
        if inner.orders.len() == before {
            return Ok(false);
        }
        self.flush(&inner).await?;
        Ok(true)
    }

    async fn flush(&self, state: &OrdersBlob) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(state)?;
        self.blobs.save(BLOB_KEY, &bytes).await
    }
}
