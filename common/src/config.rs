//! Application configuration.
//!
//! Values come from environment variables; every key except the two account
//! passwords has a default.

use crate::errors::{AppError, AppResult};
use crate::models::UserSpec;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_APP_DATABASE: &str = "BoutiqueComplete1";
pub const DEFAULT_ADMIN_DATABASE: &str = "admin";
pub const DEFAULT_ADMIN_USERNAME: &str = "boutiqueAdmin";
pub const DEFAULT_ADMIN_ROLE: &str = "userAdminAnyDatabase";
pub const DEFAULT_APP_USERNAME: &str = "boutiqueUser";
pub const DEFAULT_APP_ROLE: &str = "readWrite";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Shared configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Name of the binary or service using this config (for logs).
    pub service_name: String,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Administrative database.
    pub admin_database: String,
    /// Application database.
    pub app_database: String,
    /// Base URL of the console REST API.
    pub api_base_url: String,
    /// Account with user-administration rights, created in the admin database.
    pub admin_user: UserSpec,
    /// Application account with read/write rights on the application database.
    pub app_user: UserSpec,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn load_with_service(service: &str) -> AppResult<Self> {
        Self::from_lookup(service, |key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(service: &str, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} is not set", key)))
        };

        let admin_database = get("ADMIN_DATABASE", DEFAULT_ADMIN_DATABASE);
        let app_database = get("APP_DATABASE", DEFAULT_APP_DATABASE);

        // 管理员角色授予在 admin 库上，应用用户角色仅限应用库
        let admin_user = UserSpec::single_role(
            get("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            required("ADMIN_PASSWORD")?,
            admin_database.clone(),
            get("ADMIN_ROLE", DEFAULT_ADMIN_ROLE),
            admin_database.clone(),
        );
        let app_user = UserSpec::single_role(
            get("APP_USERNAME", DEFAULT_APP_USERNAME),
            required("APP_PASSWORD")?,
            app_database.clone(),
            get("APP_ROLE", DEFAULT_APP_ROLE),
            app_database.clone(),
        );

        Ok(Self {
            service_name: service.to_string(),
            mongo_uri: get("MONGO_URI", DEFAULT_MONGO_URI),
            admin_database,
            app_database,
            api_base_url: get("API_BASE_URL", DEFAULT_API_BASE_URL),
            admin_user,
            app_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(
            "test",
            lookup(&[("ADMIN_PASSWORD", "SecurePassword123!"), ("APP_PASSWORD", "BoutiquePass2024!")]),
        )
        .unwrap();

        assert_eq!(config.mongo_uri, DEFAULT_MONGO_URI);
        assert_eq!(config.app_database, "BoutiqueComplete1");
        assert_eq!(config.admin_user.username, "boutiqueAdmin");
        assert_eq!(config.admin_user.database, "admin");
        assert_eq!(config.admin_user.roles[0].role, "userAdminAnyDatabase");
        assert_eq!(config.app_user.roles[0].db, "BoutiqueComplete1");
        assert_eq!(config.app_user.database, "BoutiqueComplete1");
    }

    #[test]
    fn test_app_role_follows_app_database() {
        let config = AppConfig::from_lookup(
            "test",
            lookup(&[
                ("ADMIN_PASSWORD", "SecurePassword123!"),
                ("APP_PASSWORD", "BoutiquePass2024!"),
                ("APP_DATABASE", "staging"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app_user.roles[0].db, "staging");
        assert_eq!(config.admin_user.roles[0].db, "admin");
    }

    #[test]
    fn test_missing_password_is_config_error() {
        let result = AppConfig::from_lookup("test", lookup(&[("ADMIN_PASSWORD", "SecurePassword123!")]));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("APP_PASSWORD")));
    }
}
