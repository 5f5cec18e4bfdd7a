// ============================
// userdir-lib/src/contracts.rs
// ============================
//! Request and response shapes for the HTTP boundary.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::registry::{Role, UserEntity, UserInfo};

/// Body of `POST /user-register`.
///
/// There is deliberately no `role` field: every registration creates a
/// USER-role record, and a stray `role` key in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub password: String,
}

impl RegisterUserRequest {
    pub fn into_info(self) -> UserInfo {
        UserInfo {
            username: self.username,
            name: self.name,
            birthdate: self.birthdate,
            role: Role::User,
            password: self.password,
        }
    }
}

/// Query parameters of `POST /user-get`. Exactly one key must be set.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub id: Option<u64>,
    pub username: Option<String>,
}

impl LookupParams {
    /// Enforce the one-of-{id, username} rule before any registry lookup.
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.id, self.username.as_deref()) {
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "id and username are mutually exclusive".to_string(),
            )),
            (None, None) => Err(AppError::InvalidInput(
                "either id or username must be provided".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Query parameters of `POST /user-promote`.
#[derive(Debug, Deserialize)]
pub struct PromoteParams {
    pub id: Option<u64>,
}

/// Outward representation of a user record. Never contains the secret;
/// the role is rendered with its lower-cased token.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub uid: u64,
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub role: &'static str,
}

impl UserResponse {
    pub fn from_entity(entity: &UserEntity) -> Self {
        UserResponse {
            uid: entity.uid,
            username: entity.info.username.clone(),
            name: entity.info.name.clone(),
            birthdate: entity.info.birthdate,
            role: entity.info.role.as_token(),
        }
    }
}
