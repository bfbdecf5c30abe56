use rust_decimal::Decimal;

use crate::{
    audit::log_audit,
    dto::partners::{AddEarningsRequest, DeliveryPartnerList, UpdatePartnerStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::{Identity, ensure_admin, ensure_role},
    models::{BusinessPartner, DeliveryPartner},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Resolves the business account behind a `business`-role identity. The
/// partner directory is keyed by id, so this is an email scan; the
/// directory is small and seeded.
pub async fn business_for_identity(
    state: &AppState,
    identity: &Identity,
) -> AppResult<BusinessPartner> {
    ensure_role(identity, "business")?;
    state
        .store
        .business_partners
        .all()
        .await
        .into_iter()
        .find(|partner| partner.email == identity.email)
        .ok_or(AppError::Forbidden)
}

pub async fn my_business(
    state: &AppState,
    identity: &Identity,
) -> AppResult<ApiResponse<BusinessPartner>> {
    let partner = business_for_identity(state, identity).await?;
    Ok(ApiResponse::success(
        "Business profile",
        partner,
        Some(Meta::empty()),
    ))
}

pub async fn my_delivery_profile(
    state: &AppState,
    identity: &Identity,
) -> AppResult<ApiResponse<DeliveryPartner>> {
    ensure_role(identity, "delivery")?;
    let partner = state
        .store
        .delivery_partners
        .all()
        .await
        .into_iter()
        .find(|partner| partner.email == identity.email)
        .ok_or(AppError::Forbidden)?;
    Ok(ApiResponse::success(
        "Delivery profile",
        partner,
        Some(Meta::empty()),
    ))
}

pub async fn list_delivery(
    state: &AppState,
    identity: &Identity,
) -> AppResult<ApiResponse<DeliveryPartnerList>> {
    ensure_admin(identity)?;
    let mut items = state.store.delivery_partners.all().await;
    items.sort_by_key(|partner| partner.id);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Delivery partners",
        DeliveryPartnerList { items },
        Some(meta),
    ))
}

pub async fn set_business_status(
    state: &AppState,
    identity: &Identity,
    id: i64,
    payload: UpdatePartnerStatusRequest,
) -> AppResult<ApiResponse<BusinessPartner>> {
    ensure_admin(identity)?;
    let mut partner = match state.store.business_partners.get(&id).await {
        Some(p) => p,
        None => return Err(AppError::NotFound("Business partner")),
    };
    partner.status = payload.status;
    let partner = state.store.business_partners.put(partner).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "partner_status_update",
        Some("business_partners"),
        Some(serde_json::json!({ "partner_id": partner.id, "status": partner.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Partner updated",
        partner,
        Some(Meta::empty()),
    ))
}

pub async fn set_delivery_status(
    state: &AppState,
    identity: &Identity,
    id: i64,
    payload: UpdatePartnerStatusRequest,
) -> AppResult<ApiResponse<DeliveryPartner>> {
    ensure_admin(identity)?;
    let mut partner = match state.store.delivery_partners.get(&id).await {
        Some(p) => p,
        None => return Err(AppError::NotFound("Delivery partner")),
    };
    partner.status = payload.status;
    let partner = state.store.delivery_partners.put(partner).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "partner_status_update",
        Some("delivery_partners"),
        Some(serde_json::json!({ "partner_id": partner.id, "status": partner.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Partner updated",
        partner,
        Some(Meta::empty()),
    ))
}

/// Earnings only ever move up, by addition. They are a running counter,
/// never recomputed from delivered orders.
pub async fn add_earnings(
    state: &AppState,
    identity: &Identity,
    id: i64,
    payload: AddEarningsRequest,
) -> AppResult<ApiResponse<DeliveryPartner>> {
    ensure_admin(identity)?;
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::InvalidInput("Amount must be positive".into()));
    }
    let mut partner = match state.store.delivery_partners.get(&id).await {
        Some(p) => p,
        None => return Err(AppError::NotFound("Delivery partner")),
    };
    partner.earnings += payload.amount;
    let partner = state.store.delivery_partners.put(partner).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "earnings_add",
        Some("delivery_partners"),
        Some(serde_json::json!({ "partner_id": partner.id, "amount": payload.amount })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Earnings recorded",
        partner,
        Some(Meta::empty()),
    ))
}
