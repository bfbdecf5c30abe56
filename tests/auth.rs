use axum::{
    extract::FromRequestParts,
    http::{Request, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use kirana_core::{
    error::AppError,
    middleware::auth::{Claims, Identity},
};

const SECRET: &str = "test-secret";

#[tokio::test]
async fn bearer_tokens_resolve_to_an_identity() -> anyhow::Result<()> {
    unsafe { std::env::set_var("AUTH_SECRET", SECRET) };

    let token = token_for("asha@example.com", "customer");
    let mut parts = parts_with(Some(&format!("Bearer {token}")));

    let identity = Identity::from_request_parts(&mut parts, &()).await?;
    assert_eq!(identity.email, "asha@example.com");
    assert_eq!(identity.name, "Asha");
    assert_eq!(identity.role, "customer");

    Ok(())
}

#[tokio::test]
async fn bad_tokens_are_rejected() -> anyhow::Result<()> {
    unsafe { std::env::set_var("AUTH_SECRET", SECRET) };

    let mut parts = parts_with(None);
    let err = Identity::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let mut parts = parts_with(Some("Basic Zm9vOmJhcg=="));
    let err = Identity::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    // Signed with a different secret.
    let claims = claims("asha@example.com", "customer");
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"other-secret"),
    )?;
    let mut parts = parts_with(Some(&format!("Bearer {forged}")));
    let err = Identity::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    Ok(())
}

#[tokio::test]
async fn tokens_without_an_email_are_rejected() -> anyhow::Result<()> {
    unsafe { std::env::set_var("AUTH_SECRET", SECRET) };

    let token = token_for("", "customer");
    let mut parts = parts_with(Some(&format!("Bearer {token}")));
    let err = Identity::from_request_parts(&mut parts, &()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    Ok(())
}

fn claims(email: &str, role: &str) -> Claims {
    Claims {
        sub: email.into(),
        name: "Asha".into(),
        picture: None,
        role: role.into(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    }
}

fn token_for(email: &str, role: &str) -> String {
    encode(
        &Header::default(),
        &claims(email, role),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token encodes")
}

fn parts_with(authorization: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/api/users/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let (parts, ()) = builder.body(()).expect("request builds").into_parts();
    parts
}
