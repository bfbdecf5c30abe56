use kirana_core::{
    dto::users::{UpdateProfileRequest, UpdateUserStatusRequest},
    error::AppError,
    middleware::auth::Identity,
    models::{Address, PaymentMethod, UserStatus},
    seed::seed_reference_data,
    services::user_service,
    state::AppState,
};

// Account lifecycle: first sign-in creates the profile, later sign-ins
// refresh it, and a suspension shuts the account out at the door.

#[tokio::test]
async fn first_session_creates_then_later_sessions_refresh() -> anyhow::Result<()> {
    let state = setup().await?;
    let mut asha = customer("asha@example.com", "Asha");

    let created = user_service::ensure_user(&state, &asha).await?;
    assert_eq!(created.message, "Account created");
    assert_eq!(created.data.unwrap().status, UserStatus::Active);

    // The provider now reports a new display name and photo.
    asha.name = "Asha R".into();
    asha.picture = Some("https://cdn.example/asha.png".into());
    let refreshed = user_service::ensure_user(&state, &asha).await?;
    assert_eq!(refreshed.message, "Signed in");
    let user = refreshed.data.unwrap();
    assert_eq!(user.name, "Asha R");
    assert_eq!(user.photo_url.as_deref(), Some("https://cdn.example/asha.png"));

    Ok(())
}

#[tokio::test]
async fn suspended_accounts_cannot_sign_in_until_reactivated() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    user_service::ensure_user(&state, &asha).await?;

    user_service::set_status(
        &state,
        &admin(),
        "asha@example.com",
        UpdateUserStatusRequest {
            status: UserStatus::Suspended,
        },
    )
    .await?;

    let err = user_service::ensure_user(&state, &asha).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    user_service::set_status(
        &state,
        &admin(),
        "asha@example.com",
        UpdateUserStatusRequest {
            status: UserStatus::Active,
        },
    )
    .await?;
    let back = user_service::ensure_user(&state, &asha).await?;
    assert_eq!(back.message, "Signed in");

    Ok(())
}

#[tokio::test]
async fn profile_updates_touch_only_the_given_fields() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    user_service::ensure_user(&state, &asha).await?;

    let updated = user_service::update_profile(
        &state,
        &asha,
        UpdateProfileRequest {
            name: None,
            phone: Some("+91 98450 00000".into()),
            photo_url: None,
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(updated.name, "Asha");
    assert_eq!(updated.phone.as_deref(), Some("+91 98450 00000"));

    Ok(())
}

#[tokio::test]
async fn addresses_upsert_by_label() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    user_service::ensure_user(&state, &asha).await?;

    user_service::add_address(&state, &asha, address("Home", "12 MG Road")).await?;
    user_service::add_address(&state, &asha, address("Work", "4 Residency Road")).await?;
    // Same label replaces, it does not duplicate.
    let user = user_service::add_address(&state, &asha, address("Home", "88 Brigade Road"))
        .await?
        .data
        .unwrap();
    assert_eq!(user.addresses.len(), 2);
    let home = user.addresses.iter().find(|a| a.label == "Home").unwrap();
    assert_eq!(home.line, "88 Brigade Road");

    let user = user_service::remove_address(&state, &asha, "Work").await?.data.unwrap();
    assert_eq!(user.addresses.len(), 1);

    let err = user_service::remove_address(&state, &asha, "Work").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Address")));

    let err = user_service::add_address(&state, &asha, address("", "nowhere")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    Ok(())
}

#[tokio::test]
async fn payment_methods_validate_digits_and_keep_one_default() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    user_service::ensure_user(&state, &asha).await?;

    user_service::add_payment_method(&state, &asha, card("4242", true)).await?;
    let user = user_service::add_payment_method(&state, &asha, card("1881", true))
        .await?
        .data
        .unwrap();

    assert_eq!(user.payment_methods.len(), 2);
    let defaults: Vec<&str> = user
        .payment_methods
        .iter()
        .filter(|m| m.is_default)
        .map(|m| m.last4.as_str())
        .collect();
    assert_eq!(defaults, vec!["1881"]);

    let err = user_service::add_payment_method(&state, &asha, card("12ab", false))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let user = user_service::remove_payment_method(&state, &asha, "4242").await?.data.unwrap();
    assert_eq!(user.payment_methods.len(), 1);
    let err = user_service::remove_payment_method(&state, &asha, "4242").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Payment method")));

    Ok(())
}

#[tokio::test]
async fn user_administration_is_admin_only() -> anyhow::Result<()> {
    let state = setup().await?;
    let asha = customer("asha@example.com", "Asha");
    user_service::ensure_user(&state, &asha).await?;

    let err = user_service::list_users(&state, &asha).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let users = user_service::list_users(&state, &admin()).await?.data.unwrap();
    assert_eq!(users.items.len(), 1);

    let err = user_service::set_status(
        &state,
        &admin(),
        "ghost@example.com",
        UpdateUserStatusRequest {
            status: UserStatus::Suspended,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("User")));

    Ok(())
}

async fn setup() -> anyhow::Result<AppState> {
    let state = AppState::in_memory().await?;
    seed_reference_data(&state.store).await?;
    Ok(state)
}

fn customer(email: &str, name: &str) -> Identity {
    Identity {
        email: email.into(),
        name: name.into(),
        picture: None,
        role: "customer".into(),
    }
}

fn admin() -> Identity {
    Identity {
        email: "ops@kirana.example".into(),
        name: "Ops".into(),
        picture: None,
        role: "admin".into(),
    }
}

fn address(label: &str, line: &str) -> Address {
    Address {
        label: label.into(),
        line: line.into(),
        city: "Bengaluru".into(),
        pincode: "560001".into(),
    }
}

fn card(last4: &str, is_default: bool) -> PaymentMethod {
    PaymentMethod {
        brand: "Visa".into(),
        last4: last4.into(),
        expiry: "12/27".into(),
        is_default,
    }
}
