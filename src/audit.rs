use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    models::AuditEntry,
    store::{Store, StoreError},
};

/// Appends one entry to the audit trail. Call sites treat a failure as
/// non-fatal: log it and carry on, the triggering operation has already
/// succeeded.
pub async fn log_audit(
    store: &Store,
    actor: Option<&str>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> Result<(), StoreError> {
    let entry = AuditEntry {
        id: Uuid::new_v4(),
        actor: actor.map(str::to_string),
        action: action.to_string(),
        resource: resource.map(str::to_string),
        metadata,
        created_at: Utc::now(),
    };
    store.audit_log.put(entry).await?;
    Ok(())
}
