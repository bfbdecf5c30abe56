use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    export,
    middleware::auth::{Identity, ensure_admin},
    response::{ApiResponse, Meta},
    routes::admin::AuditList,
    state::AppState,
};

/// CSV snapshot of one collection. Review rows come out of a map, so
/// they are ordered by submission time before projecting.
pub async fn export_collection(
    state: &AppState,
    identity: &Identity,
    collection: &str,
) -> AppResult<String> {
    ensure_admin(identity)?;

    let csv = match collection {
        "users" => export::to_csv(&state.store.users.all().await)?,
        "orders" => export::to_csv(&state.store.orders.all().await)?,
        "reviews" => {
            let mut rows = state.store.reviews.all().await;
            rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            export::to_csv(&rows)?
        }
        "business_partners" => export::to_csv(&state.store.business_partners.all().await)?,
        "delivery_partners" => export::to_csv(&state.store.delivery_partners.all().await)?,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown collection: {collection}"
            )));
        }
    };

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "export",
        Some(collection),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(csv)
}

pub async fn list_audit(
    state: &AppState,
    identity: &Identity,
) -> AppResult<ApiResponse<AuditList>> {
    ensure_admin(identity)?;
    let mut items = state.store.audit_log.all().await;
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Audit log", AuditList { items }, Some(meta)))
}
