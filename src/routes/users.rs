use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::users::UpdateProfileRequest,
    error::AppResult,
    middleware::auth::Identity,
    models::{Address, PaymentMethod, User},
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(start_session))
        .route("/me", get(my_profile).patch(update_profile))
        .route("/me/addresses", post(add_address))
        .route("/me/addresses/{label}", delete(remove_address))
        .route("/me/payment-methods", post(add_payment_method))
        .route("/me/payment-methods/{last4}", delete(remove_payment_method))
}

#[utoipa::path(
    post,
    path = "/users/session",
    responses(
        (status = 200, description = "Profile created on first sign-in, refreshed afterwards", body = ApiResponse<User>),
        (status = 403, description = "Account is suspended")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn start_session(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::ensure_user(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Profile of the signed-in user", body = ApiResponse<User>),
        (status = 404, description = "No profile yet")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_profile(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/users/me",
    request_body = UpdateProfileRequest,
    responses((status = 200, description = "Profile updated", body = ApiResponse<User>)),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_profile(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/users/me/addresses",
    request_body = Address,
    responses(
        (status = 200, description = "Address added or replaced by label", body = ApiResponse<User>),
        (status = 400, description = "Label or line missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn add_address(
    State(state): State<AppState>,
    identity: Identity,
    Json(address): Json<Address>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::add_address(&state, &identity, address).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users/me/addresses/{label}",
    params(("label" = String, Path, description = "Address label")),
    responses(
        (status = 200, description = "Address removed", body = ApiResponse<User>),
        (status = 404, description = "No address with that label")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn remove_address(
    State(state): State<AppState>,
    identity: Identity,
    Path(label): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::remove_address(&state, &identity, &label).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/users/me/payment-methods",
    request_body = PaymentMethod,
    responses(
        (status = 200, description = "Payment method saved", body = ApiResponse<User>),
        (status = 400, description = "Card digits rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn add_payment_method(
    State(state): State<AppState>,
    identity: Identity,
    Json(method): Json<PaymentMethod>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::add_payment_method(&state, &identity, method).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users/me/payment-methods/{last4}",
    params(("last4" = String, Path, description = "Last four card digits")),
    responses(
        (status = 200, description = "Payment method removed", body = ApiResponse<User>),
        (status = 404, description = "No card with those digits")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn remove_payment_method(
    State(state): State<AppState>,
    identity: Identity,
    Path(last4): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::remove_payment_method(&state, &identity, &last4).await?;
    Ok(Json(resp))
}
