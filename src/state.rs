use std::sync::Arc;

use crate::{
    events::OrderEvents,
    store::{Store, StoreError},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub events: OrderEvents,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
            events: OrderEvents::new(),
        }
    }

    /// State over a memory-backed store; tests start here.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(Store::in_memory().await?))
    }
}
