use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{BusinessPartner, CatalogItem, CustomizationGroup, Variant};

/// Catalog item with its live rating attached. Ratings are derived from
/// the review collection on every read, never stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct RatedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub rating: Decimal,
    pub review_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatedSeller {
    #[serde(flatten)]
    pub partner: BusinessPartner,
    pub rating: Decimal,
    pub review_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SellerList {
    pub items: Vec<RatedSeller>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<RatedItem>,
}

/// Menu upsert. Without an id a fresh one is assigned; with an id the
/// matching item is replaced wholesale.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertItemRequest {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub customizations: Vec<CustomizationGroup>,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub available: bool,
}
