use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, patch, post},
};
use serde::Deserialize;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use utoipa::IntoParams;

use crate::{
    dto::orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::auth::Identity,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_orders))
        .route("/checkout", post(checkout))
        .route("/stream", get(order_stream))
        .route("/{id}", get(get_order).delete(delete_order))
        .route("/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    post,
    path = "/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<Order>),
        (status = 400, description = "Cart is empty or malformed"),
        (status = 404, description = "Seller not found")
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::checkout(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses((status = 200, description = "Orders placed by the signed-in customer", body = ApiResponse<OrderList>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::my_orders(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<Order>),
        (status = 404, description = "Order not found or not visible to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, &identity, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<Order>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_status(&state, &identity, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order(&state, &identity, id).await?;
    Ok(Json(resp))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StreamQuery {
    /// Seller whose incoming orders to watch.
    pub seller_id: i64,
}

#[utoipa::path(
    get,
    path = "/orders/stream",
    params(StreamQuery),
    responses((status = 200, description = "Server-sent events, one `order_placed` event per checkout against the seller")),
    tag = "Orders"
)]
pub async fn order_stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let seller_id = query.seller_id;
    let stream = BroadcastStream::new(state.events.subscribe())
        .filter_map(move |result| match result {
            Ok(event) if event.seller_id == seller_id => {
                Event::default().event("order_placed").json_data(&event).ok()
            }
            Ok(_) => None,
            Err(err) => {
                // Slow consumers skip what they missed; delivery is at most once.
                tracing::warn!(error = %err, "order stream lagged");
                None
            }
        })
        .map(Ok);
    Sse::new(stream).keep_alive(KeepAlive::default())
}
