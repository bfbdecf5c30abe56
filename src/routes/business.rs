use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};

use crate::{
    dto::{
        catalog::{AvailabilityRequest, UpsertItemRequest},
        orders::OrderList,
    },
    error::AppResult,
    middleware::auth::Identity,
    models::{BusinessPartner, CatalogItem},
    response::ApiResponse,
    services::{catalog_service, order_service, partner_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(my_business))
        .route("/orders", get(incoming_orders))
        .route("/menu", post(upsert_menu_item))
        .route("/menu/{item_id}", delete(delete_menu_item))
        .route("/menu/{item_id}/availability", patch(set_item_availability))
}

#[utoipa::path(
    get,
    path = "/business/profile",
    responses(
        (status = 200, description = "Business partner profile for the signed-in seller", body = ApiResponse<BusinessPartner>),
        (status = 403, description = "Caller is not a registered business")
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn my_business(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<BusinessPartner>>> {
    let resp = partner_service::my_business(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/business/orders",
    responses((status = 200, description = "Orders placed against the seller", body = ApiResponse<OrderList>)),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn incoming_orders(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::seller_orders(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/business/menu",
    request_body = UpsertItemRequest,
    responses(
        (status = 200, description = "Catalog item created or replaced", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Name or price rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn upsert_menu_item(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<UpsertItemRequest>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let resp = catalog_service::upsert_item(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/business/menu/{item_id}/availability",
    params(("item_id" = i64, Path, description = "Catalog item id")),
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability toggled", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn set_item_availability(
    State(state): State<AppState>,
    identity: Identity,
    Path(item_id): Path<i64>,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let resp = catalog_service::set_availability(&state, &identity, item_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/business/menu/{item_id}",
    params(("item_id" = i64, Path, description = "Catalog item id")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Business"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    identity: Identity,
    Path(item_id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_item(&state, &identity, item_id).await?;
    Ok(Json(resp))
}
