use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims minted by the external identity provider. `sub` carries the
/// user's email, which is the natural key everywhere in the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: String,
}

pub fn ensure_role(identity: &Identity, role: &str) -> Result<(), AppError> {
    if identity.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(identity: &Identity) -> Result<(), AppError> {
    ensure_role(identity, "admin")
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::InvalidInput("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::InvalidInput("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::InvalidInput("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let secret = std::env::var("AUTH_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("AUTH_SECRET is not set")))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidInput("Invalid or expired token".into()))?;

        let claims = decoded.claims;
        if claims.sub.is_empty() {
            return Err(AppError::InvalidInput("Token carries no email".into()));
        }

        Ok(Identity {
            email: claims.sub,
            name: claims.name,
            picture: claims.picture,
            role: claims.role,
        })
    }
}
