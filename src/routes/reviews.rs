use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::reviews::{Eligibility, ReviewList, SubmitReviewRequest},
    error::AppResult,
    middleware::auth::Identity,
    models::{Review, TargetKind},
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_review))
        .route("/{id}", delete(delete_review))
        .route("/{kind}/{target_id}", get(list_reviews))
        .route("/{kind}/{target_id}/eligibility", get(review_eligibility))
}

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = SubmitReviewRequest,
    responses(
        (status = 200, description = "Review recorded", body = ApiResponse<Review>),
        (status = 400, description = "Rating out of range"),
        (status = 403, description = "Caller has not purchased the target"),
        (status = 409, description = "Caller already reviewed the target")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<SubmitReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::submit(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/reviews/{kind}/{target_id}",
    params(
        ("kind" = TargetKind, Path, description = "Review target kind"),
        ("target_id" = i64, Path, description = "Item or seller id")
    ),
    responses((status = 200, description = "Reviews for the target, newest first", body = ApiResponse<ReviewList>)),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path((kind, target_id)): Path<(TargetKind, i64)>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_for_target(&state, kind, target_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/reviews/{kind}/{target_id}/eligibility",
    params(
        ("kind" = TargetKind, Path, description = "Review target kind"),
        ("target_id" = i64, Path, description = "Item or seller id")
    ),
    responses((status = 200, description = "Whether the caller may review the target", body = ApiResponse<Eligibility>)),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn review_eligibility(
    State(state): State<AppState>,
    identity: Identity,
    Path((kind, target_id)): Path<(TargetKind, i64)>,
) -> AppResult<Json<ApiResponse<Eligibility>>> {
    let resp = review_service::eligibility(&state, &identity, kind, target_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_review(&state, &identity, id).await?;
    Ok(Json(resp))
}
