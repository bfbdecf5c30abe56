use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::catalog::{ItemList, RatedItem, SellerList},
    error::AppResult,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sellers", get(list_sellers))
        .route("/sellers/{seller_id}/items", get(list_items))
        .route("/sellers/{seller_id}/items/{item_id}", get(get_item))
}

#[utoipa::path(
    get,
    path = "/catalog/sellers",
    responses((status = 200, description = "Active sellers with aggregated ratings", body = ApiResponse<SellerList>)),
    tag = "Catalog"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SellerList>>> {
    let resp = catalog_service::list_sellers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog/sellers/{seller_id}/items",
    params(("seller_id" = i64, Path, description = "Seller id")),
    responses(
        (status = 200, description = "Seller catalog with per-item ratings", body = ApiResponse<ItemList>),
        (status = 404, description = "Seller not found")
    ),
    tag = "Catalog"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(seller_id): Path<i64>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = catalog_service::list_items(&state, seller_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog/sellers/{seller_id}/items/{item_id}",
    params(
        ("seller_id" = i64, Path, description = "Seller id"),
        ("item_id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item detail with rating", body = ApiResponse<RatedItem>),
        (status = 404, description = "Item not found")
    ),
    tag = "Catalog"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path((seller_id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<RatedItem>>> {
    let resp = catalog_service::get_item(&state, seller_id, item_id).await?;
    Ok(Json(resp))
}
