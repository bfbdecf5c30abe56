use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::reviews::{Eligibility, ReviewList, SubmitReviewRequest},
    error::{AppError, AppResult},
    middleware::auth::{Identity, ensure_admin},
    models::{Review, TargetKind},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// The purchase-gated review right. `has_reviewed` is an author match on
/// the target's review index; `has_purchased` walks the caller's orders:
/// a product target must appear in some order's lines, a restaurant
/// target must be some order's seller. Derived fresh on every call.
pub async fn eligibility_for(
    state: &AppState,
    email: &str,
    kind: TargetKind,
    target_id: i64,
) -> Eligibility {
    let has_reviewed = state
        .store
        .reviews
        .by_author(kind, target_id, email)
        .await
        .is_some();
    let orders = state.store.orders.all().await;
    let has_purchased = orders
        .iter()
        .filter(|order| order.customer_email.as_deref() == Some(email))
        .any(|order| match kind {
            TargetKind::Product => order.lines.iter().any(|line| line.item_id == target_id),
            TargetKind::Restaurant => order.seller_id == target_id,
        });
    Eligibility {
        can_review: has_purchased && !has_reviewed,
        has_reviewed,
    }
}

pub async fn eligibility(
    state: &AppState,
    identity: &Identity,
    kind: TargetKind,
    target_id: i64,
) -> AppResult<ApiResponse<Eligibility>> {
    let data = eligibility_for(state, &identity.email, kind, target_id).await;
    Ok(ApiResponse::success("Eligibility", data, Some(Meta::empty())))
}

pub async fn submit(
    state: &AppState,
    identity: &Identity,
    payload: SubmitReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::InvalidInput("Rating must be between 1 and 5".into()));
    }

    let eligibility = eligibility_for(state, &identity.email, payload.kind, payload.target_id).await;
    if eligibility.has_reviewed {
        return Err(AppError::Conflict("Already reviewed".into()));
    }
    if !eligibility.can_review {
        return Err(AppError::Forbidden);
    }

    let review = Review {
        id: Uuid::new_v4(),
        target_id: payload.target_id,
        kind: payload.kind,
        author_email: identity.email.clone(),
        author_name: identity.name.clone(),
        rating: payload.rating,
        comment: payload.comment,
        created_at: Utc::now(),
    };
    let review = state.store.reviews.put(review).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "review_submit",
        Some("reviews"),
        Some(serde_json::json!({
            "target_id": review.target_id,
            "kind": review.kind,
            "rating": review.rating
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Review submitted",
        review,
        Some(Meta::empty()),
    ))
}

pub async fn list_for_target(
    state: &AppState,
    kind: TargetKind,
    target_id: i64,
) -> AppResult<ApiResponse<ReviewList>> {
    let mut items = state.store.reviews.for_target(kind, target_id).await;
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(meta)))
}

pub async fn delete_review(
    state: &AppState,
    identity: &Identity,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(identity)?;
    let removed = state.store.reviews.delete(id).await?;
    if !removed {
        return Err(AppError::NotFound("Review"));
    }

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "review_delete",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
