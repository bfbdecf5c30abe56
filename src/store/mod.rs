mod blob;
mod catalog;
mod collection;
mod orders;
mod reviews;

pub use blob::{BlobStore, FileBlobs, MemoryBlobs, StoreError};
pub use catalog::CatalogStore;
pub use collection::{Collection, Keyed};
pub use orders::OrderCollection;
pub use reviews::ReviewCollection;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{AuditEntry, BusinessPartner, DeliveryPartner, User};

const META_KEY: &str = "meta";

#[derive(Debug, Default, Serialize, Deserialize)]
struct MetaBlob {
    seed_version: u32,
}

/// One addressable collection per entity family, all over the same blob
/// substrate. There is no foreign-key enforcement anywhere: deleting a
/// catalog item cascades to nothing, orders keep their frozen line
/// snapshots, and reviews may outlive their target.
pub struct Store {
    blobs: Arc<dyn BlobStore>,
    pub users: Collection<User>,
    pub business_partners: Collection<BusinessPartner>,
    pub delivery_partners: Collection<DeliveryPartner>,
    pub audit_log: Collection<AuditEntry>,
    pub orders: OrderCollection,
    pub reviews: ReviewCollection,
    pub catalog: CatalogStore,
}

impl Store {
    pub async fn open(blobs: Arc<dyn BlobStore>) -> Result<Self, StoreError> {
        Ok(Self {
            users: Collection::open("users", blobs.clone()).await?,
            business_partners: Collection::open("business_partners", blobs.clone()).await?,
            delivery_partners: Collection::open("delivery_partners", blobs.clone()).await?,
            audit_log: Collection::open("audit_log", blobs.clone()).await?,
            orders: OrderCollection::open(blobs.clone()).await?,
            reviews: ReviewCollection::open(blobs.clone()).await?,
            catalog: CatalogStore::new(blobs.clone()),
            blobs,
        })
    }

    /// Store backed by one JSON file per collection under `dir`.
    pub async fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(Arc::new(FileBlobs::new(dir.as_ref()))).await
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::open(Arc::new(MemoryBlobs::default())).await
    }

    /// Version of the reference data last seeded; 0 when never seeded.
    pub async fn seed_version(&self) -> Result<u32, StoreError> {
        let meta = match self.blobs.load(META_KEY).await? {
            Some(bytes) => serde_json::from_slice::<MetaBlob>(&bytes)?,
            None => MetaBlob::default(),
        };
        Ok(meta.seed_version)
    }

    pub async fn set_seed_version(&self, version: u32) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&MetaBlob {
            seed_version: version,
        })?;
        self.blobs.save(META_KEY, &bytes).await
    }
}
