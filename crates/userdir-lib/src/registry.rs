// ============================
// userdir-lib/src/registry.rs
// ============================
//! In-memory user registry: record storage, identifier assignment,
//! uniqueness enforcement, and role promotion.
use std::collections::HashMap;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::auth::policy::PasswordPolicy;
use crate::error::AppError;

/// Trust level of a user. `Admin` strictly outranks `User`; no other
/// roles exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    /// Lower-cased spelling used in responses (`"user"` / `"admin"`),
    /// distinct from the upper-cased input spelling.
    pub fn as_token(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Caller-supplied portion of a user record. The password is an opaque
/// secret; it is stored as received and never serialized outward.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub role: Role,
    pub password: String,
}

/// A stored user record. The `uid` is assigned by the registry and never
/// reused; only `info.role` is ever mutated after creation.
#[derive(Debug, Clone)]
pub struct UserEntity {
    pub uid: u64,
    pub info: UserInfo,
}

struct RegistryInner {
    users: HashMap<u64, UserEntity>,
    by_username: HashMap<String, u64>,
    next_uid: u64,
}

/// The authoritative in-memory store of user records.
///
/// All operations acquire one exclusive lock, so the uniqueness check and
/// identifier assignment in [`register`](Self::register) are atomic with
/// respect to concurrent callers, and readers never observe a
/// partially-constructed record.
pub struct UserRegistry {
    policy: PasswordPolicy,
    inner: Mutex<RegistryInner>,
}

impl UserRegistry {
    /// Create an empty registry with the given password policy. The policy
    /// is injected, never hardcoded here.
    pub fn new(policy: PasswordPolicy) -> Self {
        UserRegistry {
            policy,
            inner: Mutex::new(RegistryInner {
                users: HashMap::new(),
                by_username: HashMap::new(),
                next_uid: 1,
            }),
        }
    }

    /// Register a new user.
    ///
    /// Fails with [`AppError::InvalidPassword`] if any policy predicate
    /// rejects the password, and with [`AppError::UsernameTaken`] if a
    /// record with the same username already exists. On success the next
    /// identifier is assigned and the stored entity is returned.
    pub fn register(&self, info: UserInfo) -> Result<UserEntity, AppError> {
        if !self.policy.check(&info.password) {
            return Err(AppError::InvalidPassword);
        }

        let mut inner = self.inner.lock();
        if inner.by_username.contains_key(&info.username) {
            return Err(AppError::UsernameTaken);
        }

        let uid = inner.next_uid;
        inner.next_uid += 1;

        let entity = UserEntity { uid, info };
        inner.by_username.insert(entity.info.username.clone(), uid);
        inner.users.insert(uid, entity.clone());

        tracing::info!(uid, username = %entity.info.username, "registered user");
        Ok(entity)
    }

    /// Look up a user by identifier. An unset id or an unknown id both
    /// yield `None`; absence is a normal outcome, not an error.
    pub fn get_by_id(&self, id: Option<u64>) -> Option<UserEntity> {
        let id = id?;
        self.inner.lock().users.get(&id).cloned()
    }

    /// Look up a user by username (case-sensitive). An unset or empty
    /// username yields `None`.
    pub fn get_by_username(&self, username: Option<&str>) -> Option<UserEntity> {
        let username = username?;
        if username.is_empty() {
            return None;
        }
        let inner = self.inner.lock();
        let uid = *inner.by_username.get(username)?;
        inner.users.get(&uid).cloned()
    }

    /// Promote the user with the given identifier to [`Role::Admin`].
    ///
    /// Fails with [`AppError::UserNotFound`] if the id is unset or no such
    /// record exists; idempotent if the user is already an admin. The
    /// error path leaves the registry untouched.
    pub fn grant_admin(&self, id: Option<u64>) -> Result<UserEntity, AppError> {
        let id = id.ok_or(AppError::UserNotFound)?;
        let mut inner = self.inner.lock();
        let entity = inner.users.get_mut(&id).ok_or(AppError::UserNotFound)?;
        entity.info.role = Role::Admin;

        tracing::info!(uid = id, username = %entity.info.username, "granted admin role");
        Ok(entity.clone())
    }
}
