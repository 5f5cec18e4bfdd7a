// ============================
// userdir-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
    /// Admin account registered at startup
    pub seed_admin: SeedAdmin,
}

/// Password complexity requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    /// Minimum password length
    pub min_length: usize,
    /// Require at least one digit
    pub require_digit: bool,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
}

/// The administrator account created when the service starts. The
/// directory is volatile, so without a seed there would be no actor able
/// to perform promotions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAdmin {
    pub username: String,
    pub name: String,
    pub birthdate: NaiveDateTime,
    pub password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_string(),
            password_requirements: PasswordRequirements::default(),
            seed_admin: SeedAdmin::default(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        // min_length 9 keeps the historical "longer than 8" rule.
        Self {
            min_length: 9,
            require_digit: true,
            require_uppercase: false,
            require_lowercase: false,
        }
    }
}

impl Default for SeedAdmin {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            birthdate: NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            password: "superSecretAdminPassword123".to_string(),
        }
    }
}

impl Settings {
    /// Load settings: defaults, overridden by `userdir.toml`, overridden
    /// by `USERDIR_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("userdir.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("USERDIR_").split("__"))
            .extract()?;

        Ok(settings)
    }
}
