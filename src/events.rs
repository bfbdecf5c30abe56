use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderPlaced {
    pub order_id: i64,
    pub seller_id: i64,
}

const CHANNEL_CAPACITY: usize = 64;

/// Fan-out for freshly placed orders so business dashboards can refresh.
/// At-most-once and unordered: a subscriber that is not listening at
/// publish time, or that lags past the channel capacity, misses events
/// and must rely on its own periodic refresh.
#[derive(Debug, Clone)]
pub struct OrderEvents {
    tx: broadcast::Sender<OrderPlaced>,
}

impl OrderEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Fire-and-forget. A send with no live subscribers is not an error;
    /// that dashboard simply misses the event.
    pub fn publish(&self, event: OrderPlaced) {
        tracing::debug!(
            order_id = event.order_id,
            seller_id = event.seller_id,
            "order placed"
        );
        let _ = self.tx.send(event);
    }

    /// Receives every event published after this call; callers filter by
    /// seller id themselves.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderPlaced> {
        self.tx.subscribe()
    }
}

impl Default for OrderEvents {
    fn default() -> Self {
        Self::new()
    }
}
