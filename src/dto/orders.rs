use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderLine, OrderStatus};

/// Checkout carries the client cart's snapshot verbatim: line prices were
/// fixed at add-to-cart time and are not re-derived from the catalog here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub seller_id: i64,
    pub customer_name: String,
    /// Absent for guest checkouts; such orders can never be attributed to
    /// a user account afterwards.
    pub customer_email: Option<String>,
    pub currency: String,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
