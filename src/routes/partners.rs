use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::partners::{AddEarningsRequest, DeliveryPartnerList, UpdatePartnerStatusRequest},
    error::AppResult,
    middleware::auth::Identity,
    models::{BusinessPartner, DeliveryPartner},
    response::ApiResponse,
    services::partner_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/delivery", get(list_delivery_partners))
        .route("/delivery/me", get(my_delivery_profile))
        .route("/delivery/{id}/status", patch(set_delivery_status))
        .route("/delivery/{id}/earnings", post(add_earnings))
        .route("/business/{id}/status", patch(set_business_status))
}

#[utoipa::path(
    get,
    path = "/partners/delivery",
    responses((status = 200, description = "All delivery partners", body = ApiResponse<DeliveryPartnerList>)),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn list_delivery_partners(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<DeliveryPartnerList>>> {
    let resp = partner_service::list_delivery(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/partners/delivery/me",
    responses(
        (status = 200, description = "Delivery profile for the signed-in rider", body = ApiResponse<DeliveryPartner>),
        (status = 403, description = "Caller is not a registered rider")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn my_delivery_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<DeliveryPartner>>> {
    let resp = partner_service::my_delivery_profile(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/partners/business/{id}/status",
    params(("id" = i64, Path, description = "Business partner id")),
    request_body = UpdatePartnerStatusRequest,
    responses(
        (status = 200, description = "Partner updated", body = ApiResponse<BusinessPartner>),
        (status = 404, description = "Business partner not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn set_business_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePartnerStatusRequest>,
) -> AppResult<Json<ApiResponse<BusinessPartner>>> {
    let resp = partner_service::set_business_status(&state, &identity, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/partners/delivery/{id}/status",
    params(("id" = i64, Path, description = "Delivery partner id")),
    request_body = UpdatePartnerStatusRequest,
    responses(
        (status = 200, description = "Partner updated", body = ApiResponse<DeliveryPartner>),
        (status = 404, description = "Delivery partner not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn set_delivery_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePartnerStatusRequest>,
) -> AppResult<Json<ApiResponse<DeliveryPartner>>> {
    let resp = partner_service::set_delivery_status(&state, &identity, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/partners/delivery/{id}/earnings",
    params(("id" = i64, Path, description = "Delivery partner id")),
    request_body = AddEarningsRequest,
    responses(
        (status = 200, description = "Earnings credited", body = ApiResponse<DeliveryPartner>),
        (status = 400, description = "Amount must be positive")
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn add_earnings(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<AddEarningsRequest>,
) -> AppResult<Json<ApiResponse<DeliveryPartner>>> {
    let resp = partner_service::add_earnings(&state, &identity, id, payload).await?;
    Ok(Json(resp))
}
