use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub label: String,
    pub line: String,
    pub city: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub brand: String,
    pub last4: String,
    pub expiry: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Base price, used when no variant is declared.
    pub price: Decimal,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub customizations: Vec<CustomizationGroup>,
    pub available: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Variant {
    pub name: String,
    /// Absolute price, not a delta on the base.
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomizationGroup {
    pub name: String,
    pub mode: SelectionMode,
    pub required: bool,
    pub options: Vec<CustomizationOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomizationOption {
    pub name: String,
    /// Price delta added on top of the variant price.
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub seller_id: i64,
    pub customer_name: String,
    /// Guest orders carry no email and cannot be attributed to a user later.
    pub customer_email: Option<String>,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub item_id: i64,
    pub name: String,
    pub variant: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Snapshotted at add-to-cart time; later catalog edits never reprice it.
    pub unit_price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Processing,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub target_id: i64,
    pub kind: TargetKind,
    pub author_email: String,
    pub author_name: String,
    /// Whole stars, 1 through 5.
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Product,
    Restaurant,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::Product => "product",
            TargetKind::Restaurant => "restaurant",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessPartner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub kind: PartnerKind,
    pub status: PartnerStatus,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PartnerKind {
    Restaurant,
    GroceryStore,
    Pharmacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PartnerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryPartner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: VehicleKind,
    pub status: PartnerStatus,
    /// Running counter, only ever increased; never recomputed from orders.
    pub earnings: Decimal,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Bike,
    Scooter,
    Bicycle,
    Car,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    pub id: Uuid,
    pub actor: Option<String>,
    pub action: String,
    pub resource: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}
