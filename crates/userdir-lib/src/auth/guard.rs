// ============================
// userdir-lib/src/auth/guard.rs
// ============================
//! Actor authentication and the admin-only authorization guard.
use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::AppError;
use crate::registry::{Role, UserEntity, UserRegistry};

/// Username + secret extracted from an `Authorization: Basic` header.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse Basic credentials out of request headers. A missing,
    /// malformed, or non-Basic header is an authentication failure.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Unauthorized)?;

        let encoded = value.strip_prefix("Basic ").ok_or(AppError::Unauthorized)?;
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::Unauthorized)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AppError::Unauthorized)?;

        // The secret may itself contain ':'; only the first one splits.
        let (username, password) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;
        Ok(BasicCredentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Authenticate an actor by exact username + secret match.
///
/// An unknown username and a mismatched secret both collapse to the same
/// [`AppError::Unauthorized`], so callers cannot enumerate usernames.
pub fn authenticate(
    registry: &UserRegistry,
    credentials: &BasicCredentials,
) -> Result<UserEntity, AppError> {
    let entity = registry
        .get_by_username(Some(&credentials.username))
        .ok_or(AppError::Unauthorized)?;
    if entity.info.password != credentials.password {
        return Err(AppError::Unauthorized);
    }
    Ok(entity)
}

/// Permit the promote action only for admin actors.
///
/// Runs before the target id is resolved: a non-admin actor learns nothing
/// about whether the target exists.
pub fn requires_admin(actor: &UserEntity) -> Result<(), AppError> {
    if actor.info.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
