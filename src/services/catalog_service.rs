use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    audit::log_audit,
    dto::catalog::{AvailabilityRequest, ItemList, RatedItem, RatedSeller, SellerList, UpsertItemRequest},
    error::{AppError, AppResult},
    middleware::auth::Identity,
    models::{CatalogItem, TargetKind},
    response::{ApiResponse, Meta},
    services::partner_service::business_for_identity,
    state::AppState,
    store::Store,
};

/// Placeholder rating shown until the first review lands.
const DEFAULT_RATING: Decimal = Decimal::from_parts(35, 0, 0, false, 1);

/// Live rating for one target: mean of its reviews rounded to one
/// decimal, or the 3.5/0 placeholder when none exist. The by-target
/// index makes this a map lookup, not a scan of every review.
pub async fn target_rating(store: &Store, kind: TargetKind, target_id: i64) -> (Decimal, usize) {
    let reviews = store.reviews.for_target(kind, target_id).await;
    if reviews.is_empty() {
        return (DEFAULT_RATING, 0);
    }
    let sum: Decimal = reviews.iter().map(|r| Decimal::from(r.rating)).sum();
    let mean = sum / Decimal::from(reviews.len());
    (
        mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        reviews.len(),
    )
}

pub async fn with_ratings(store: &Store, items: Vec<CatalogItem>) -> Vec<RatedItem> {
    let mut rated = Vec::with_capacity(items.len());
    for item in items {
        let (rating, review_count) = target_rating(store, TargetKind::Product, item.id).await;
        rated.push(RatedItem {
            item,
            rating,
            review_count,
        });
    }
    rated
}

pub async fn list_sellers(state: &AppState) -> AppResult<ApiResponse<SellerList>> {
    let partners = state.store.business_partners.all().await;
    let mut items = Vec::with_capacity(partners.len());
    for partner in partners {
        let (rating, review_count) =
            target_rating(&state.store, TargetKind::Restaurant, partner.id).await;
        items.push(RatedSeller {
            partner,
            rating,
            review_count,
        });
    }
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Sellers", SellerList { items }, Some(meta)))
}

pub async fn list_items(state: &AppState, seller_id: i64) -> AppResult<ApiResponse<ItemList>> {
    if state.store.business_partners.get(&seller_id).await.is_none() {
        return Err(AppError::NotFound("Seller"));
    }
    let items = state.store.catalog.items_for(seller_id).await?;
    let items = with_ratings(&state.store, items).await;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Menu", ItemList { items }, Some(meta)))
}

pub async fn get_item(
    state: &AppState,
    seller_id: i64,
    item_id: i64,
) -> AppResult<ApiResponse<RatedItem>> {
    let item = state.store.catalog.get_item(seller_id, item_id).await?;
    let item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound("Item")),
    };
    let (rating, review_count) = target_rating(&state.store, TargetKind::Product, item.id).await;
    let data = RatedItem {
        item,
        rating,
        review_count,
    };
    Ok(ApiResponse::success("Item", data, Some(Meta::empty())))
}

pub async fn upsert_item(
    state: &AppState,
    identity: &Identity,
    payload: UpsertItemRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    let seller = business_for_identity(state, identity).await?;
    if payload.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Item name is required".into()));
    }
    if payload.price < Decimal::ZERO {
        return Err(AppError::InvalidInput("Price cannot be negative".into()));
    }

    let item = CatalogItem {
        id: payload.id.unwrap_or(0),
        name: payload.name,
        category: payload.category,
        price: payload.price,
        variants: payload.variants,
        customizations: payload.customizations,
        available: payload.available,
        image: payload.image,
    };
    let item = match payload.id {
        Some(_) => state.store.catalog.put_item(seller.id, item).await?,
        None => state.store.catalog.insert_item(seller.id, item).await?,
    };

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "menu_upsert",
        Some("catalog"),
        Some(serde_json::json!({ "seller_id": seller.id, "item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Menu updated", item, Some(Meta::empty())))
}

pub async fn set_availability(
    state: &AppState,
    identity: &Identity,
    item_id: i64,
    payload: AvailabilityRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    let seller = business_for_identity(state, identity).await?;
    let item = state.store.catalog.get_item(seller.id, item_id).await?;
    let mut item = match item {
        Some(i) => i,
        None => return Err(AppError::NotFound("Item")),
    };
    item.available = payload.available;
    let item = state.store.catalog.put_item(seller.id, item).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "menu_availability",
        Some("catalog"),
        Some(serde_json::json!({
            "seller_id": seller.id,
            "item_id": item.id,
            "available": item.available
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Menu updated", item, Some(Meta::empty())))
}

pub async fn delete_item(
    state: &AppState,
    identity: &Identity,
    item_id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let seller = business_for_identity(state, identity).await?;
    let removed = state.store.catalog.delete_item(seller.id, item_id).await?;
    if !removed {
        return Err(AppError::NotFound("Item"));
    }

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "menu_delete",
        Some("catalog"),
        Some(serde_json::json!({ "seller_id": seller.id, "item_id": item_id })),
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
