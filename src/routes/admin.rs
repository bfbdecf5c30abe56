use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, patch},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{
        orders::OrderList,
        users::{UpdateUserStatusRequest, UserList},
    },
    error::AppResult,
    middleware::auth::Identity,
    models::{AuditEntry, User},
    response::ApiResponse,
    services::{admin_service, order_service, user_service},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AuditList {
    pub items: Vec<AuditEntry>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_all_orders))
        .route("/users", get(list_users))
        .route("/users/{email}/status", patch(update_user_status))
        .route("/audit", get(list_audit))
        .route("/export/{collection}", get(export_collection))
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    responses((status = 200, description = "Every order on the platform", body = ApiResponse<OrderList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::all_orders(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "All user accounts", body = ApiResponse<UserList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/users/{email}/status",
    params(("email" = String, Path, description = "Account email")),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(email): Path<String>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::set_status(&state, &identity, &email, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/audit",
    responses((status = 200, description = "Audit trail, newest first", body = ApiResponse<AuditList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_audit(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<AuditList>>> {
    let resp = admin_service::list_audit(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/export/{collection}",
    params(("collection" = String, Path, description = "users, orders, reviews, business_partners or delivery_partners")),
    responses(
        (status = 200, description = "CSV snapshot of the collection", content_type = "text/csv"),
        (status = 400, description = "Unknown collection")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn export_collection(
    State(state): State<AppState>,
    identity: Identity,
    Path(collection): Path<String>,
) -> AppResult<impl IntoResponse> {
    let csv = admin_service::export_collection(&state, &identity, &collection).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}
