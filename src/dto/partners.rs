use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{DeliveryPartner, PartnerStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePartnerStatusRequest {
    pub status: PartnerStatus,
}

/// Amount to add to a delivery partner's running earnings counter.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddEarningsRequest {
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryPartnerList {
    pub items: Vec<DeliveryPartner>,
}
