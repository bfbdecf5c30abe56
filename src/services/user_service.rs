use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::users::{UpdateProfileRequest, UpdateUserStatusRequest, UserList},
    error::{AppError, AppResult},
    middleware::auth::{Identity, ensure_admin},
    models::{Address, PaymentMethod, User, UserStatus},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// The external-identity integration point. Idempotent on email: the
/// first call creates the record, later calls refresh name/photo from
/// the provider and hand back the stored profile. Suspended accounts are
/// turned away here, not deeper in the store.
pub async fn ensure_user(state: &AppState, identity: &Identity) -> AppResult<ApiResponse<User>> {
    if identity.email.trim().is_empty() {
        return Err(AppError::InvalidInput("Email is required".into()));
    }

    if let Some(mut user) = state.store.users.get(&identity.email).await {
        if user.status == UserStatus::Suspended {
            return Err(AppError::Forbidden);
        }
        if user.name != identity.name || user.photo_url != identity.picture {
            user.name = identity.name.clone();
            user.photo_url = identity.picture.clone();
            user = state.store.users.put(user).await?;
        }
        return Ok(ApiResponse::success("Signed in", user, Some(Meta::empty())));
    }

    let user = User {
        email: identity.email.clone(),
        name: identity.name.clone(),
        phone: None,
        photo_url: identity.picture.clone(),
        addresses: Vec::new(),
        payment_methods: Vec::new(),
        status: UserStatus::Active,
        created_at: Utc::now(),
    };
    let user = state.store.users.put(user).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&user.email),
        "user_create",
        Some("users"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Account created",
        user,
        Some(Meta::empty()),
    ))
}

pub async fn get_profile(state: &AppState, identity: &Identity) -> AppResult<ApiResponse<User>> {
    let user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    Ok(ApiResponse::success("Profile", user, Some(Meta::empty())))
}

pub async fn update_profile(
    state: &AppState,
    identity: &Identity,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let mut user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(phone) = payload.phone {
        user.phone = Some(phone);
    }
    if let Some(photo_url) = payload.photo_url {
        user.photo_url = Some(photo_url);
    }
    let user = state.store.users.put(user).await?;
    Ok(ApiResponse::success("Updated", user, Some(Meta::empty())))
}

/// Addresses upsert by label, so saving "Home" twice replaces it.
pub async fn add_address(
    state: &AppState,
    identity: &Identity,
    address: Address,
) -> AppResult<ApiResponse<User>> {
    if address.label.trim().is_empty() {
        return Err(AppError::InvalidInput("Address label is required".into()));
    }
    if address.line.trim().is_empty() {
        return Err(AppError::InvalidInput("Address line is required".into()));
    }
    let mut user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    user.addresses.retain(|a| a.label != address.label);
    user.addresses.push(address);
    let user = state.store.users.put(user).await?;
    Ok(ApiResponse::success("Address saved", user, Some(Meta::empty())))
}

pub async fn remove_address(
    state: &AppState,
    identity: &Identity,
    label: &str,
) -> AppResult<ApiResponse<User>> {
    let mut user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    let before = user.addresses.len();
    user.addresses.retain(|a| a.label != label);
    if user.addresses.len() == before {
        return Err(AppError::NotFound("Address"));
    }
    let user = state.store.users.put(user).await?;
    Ok(ApiResponse::success(
        "Address removed",
        user,
        Some(Meta::empty()),
    ))
}

/// Cards are keyed by their masked last four digits; a new default
/// clears the flag on every other card.
pub async fn add_payment_method(
    state: &AppState,
    identity: &Identity,
    method: PaymentMethod,
) -> AppResult<ApiResponse<User>> {
    if method.last4.len() != 4 || !method.last4.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput("Card last4 must be 4 digits".into()));
    }
    let mut user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    if method.is_default {
        for existing in &mut user.payment_methods {
            existing.is_default = false;
        }
    }
    user.payment_methods.retain(|m| m.last4 != method.last4);
    user.payment_methods.push(method);
    let user = state.store.users.put(user).await?;
    Ok(ApiResponse::success(
        "Payment method saved",
        user,
        Some(Meta::empty()),
    ))
}

pub async fn remove_payment_method(
    state: &AppState,
    identity: &Identity,
    last4: &str,
) -> AppResult<ApiResponse<User>> {
    let mut user = match state.store.users.get(&identity.email).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    let before = user.payment_methods.len();
    user.payment_methods.retain(|m| m.last4 != last4);
    if user.payment_methods.len() == before {
        return Err(AppError::NotFound("Payment method"));
    }
    let user = state.store.users.put(user).await?;
    Ok(ApiResponse::success(
        "Payment method removed",
        user,
        Some(Meta::empty()),
    ))
}

pub async fn list_users(state: &AppState, identity: &Identity) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(identity)?;
    let items = state.store.users.all().await;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn set_status(
    state: &AppState,
    identity: &Identity,
    email: &str,
    payload: UpdateUserStatusRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(identity)?;
    let mut user = match state.store.users.get(&email.to_string()).await {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    user.status = payload.status;
    let user = state.store.users.put(user).await?;

    if let Err(err) = log_audit(
        &state.store,
        Some(&identity.email),
        "user_status_update",
        Some("users"),
        Some(serde_json::json!({ "email": user.email, "status": user.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("User updated", user, Some(Meta::empty())))
}
