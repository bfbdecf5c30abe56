use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    audit::log_audit,
    dto::orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    events::OrderPlaced,
    middleware::auth::{Identity, ensure_admin},
    models::{Order, OrderStatus},
    pricing,
    response::{ApiResponse, Meta},
    services::partner_service::business_for_identity,
    state::AppState,
};

/// Creates the order from the cart snapshot. Totals are derived here
/// once and frozen; the id comes from the persisted sequence. Works for
/// guests too, which is why no identity is required.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Order>> {
    if payload.lines.is_empty() {
        return Err(AppError::InvalidInput("Cart is empty".into()));
    }
    if payload.lines.iter().any(|line| line.quantity == 0) {
        return Err(AppError::InvalidInput("Cart has invalid quantity".into()));
    }
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::InvalidInput("Customer name is required".into()));
    }
    if state
        .store
        .business_partners
        .get(&payload.seller_id)
        .await
        .is_none()
    {
        return Err(AppError::NotFound("Seller"));
    }

    let subtotal: Decimal = payload
        .lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum();
    let totals = pricing::totals(subtotal, &payload.currency);

    let order = Order {
        id: 0,
        seller_id: payload.seller_id,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        lines: payload.lines,
        subtotal: totals.subtotal,
        delivery_fee: totals.delivery_fee,
        tax: totals.tax,
        total: totals.total,
        currency: payload.currency,
        status: OrderStatus::Processing,
        created_at: Utc::now(),
    };
    let order = state.store.orders.insert(order).await?;

    state.events.publish(OrderPlaced {
        order_id: order.id,
        seller_id: order.seller_id,
    });

    if let Err(err) = log_audit(
        &state.store,
        order.customer_email.as_deref(),
        "checkout",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": order.total })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Checkout success",
        order,
        Some(Meta::empty()),
    ))
}

/// Orders placed under the caller's email, newest first. Guest orders
/// never show up here; they carry no email to match on.
pub async fn my_orders(state: &AppState, identity: &Identity) -> AppResult<ApiResponse<OrderList>> {
    let mut items: Vec<Order> = state
        .store
        .orders
        .all()
        .await
        .into_iter()
        .filter(|order| order.customer_email.as_deref() == Some(identity.email.as_str()))
        .collect();
    items.sort_by(|a, b| b.id.cmp(&a.id));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn seller_orders(
    state: &AppState,
    identity: &Identity,
) -> AppResult<ApiResponse<OrderList>> {
    let seller = business_for_identity(state, identity).await?;
    let mut items: Vec<Order> = state
        .store
        .orders
        .all()
        .await
        .into_iter()
        .filter(|order| order.seller_id == seller.id)
        .collect();
    items.sort_by(|a, b| b.id.cmp(&a.id));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn all_orders(state: &AppState, identity: &Identity) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(identity)?;
    let mut items = state.store.orders.all().await;
    items.sort_by(|a, b| b.id.cmp(&a.id));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    identity: &Identity,
    id: i64,
) -> AppResult<ApiResponse<Order>> {
    let order = match state.store.orders.get(id).await {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };
    let is_owner = order.customer_email.as_deref() == Some(identity.email.as_str());
    let is_seller = identity.role == "business"
        && business_for_identity(state, identity)
            .await
            .map(|seller| seller.id == order.seller_id)
            .unwrap_or(false);
    if identity.role != "admin" && !is_owner && !is_seller {
        return Err(AppError::NotFound("Order"));
    }
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

/// Persists the new status verbatim. Any of the three statuses may be
/// set from any other; the store does not force forward-only moves.
pub async fn update_status(
    state: &AppState,
    identity: &Identity,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(identity)?;
    let mut order = match state.store.orders.get(id).await {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };
    order.status = payload.status;
    let order = state.store.orders.put(order).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

/// Hard delete, allowed at any lifecycle stage. The id is never handed
/// out again.
pub async fn delete_order(
    state: &AppState,
    identity: &Identity,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(identity)?;
    let removed = state.store.orders.delete(id).await?;
    if !removed {
        return Err(AppError::NotFound("Order"));
    }

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
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
