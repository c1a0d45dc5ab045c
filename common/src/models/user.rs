//! Database account models.
//!
//! Describes the accounts the provisioning tool creates and the user
//! records it reads back for verification.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A role granted on a specific database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleGrant {
    /// Role name (e.g. "readWrite").
    pub role: String,
    /// Database the role applies to.
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            db: db.into(),
        }
    }
}

/// Account to create if absent.
#[derive(Clone, Deserialize, Validate)]
pub struct UserSpec {
    /// Account name.
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    /// Account password (never serialized).
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Database the account is created in (its authentication database).
    #[validate(length(min = 1, message = "database must not be empty"))]
    pub database: String,
    /// Roles granted to the account.
    #[validate(length(min = 1, message = "at least one role is required"))]
    pub roles: Vec<RoleGrant>,
}

impl UserSpec {
    /// Creates an account spec holding a single role on `role_db`.
    pub fn single_role(
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        role: impl Into<String>,
        role_db: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            database: database.into(),
            roles: vec![RoleGrant::new(role, role_db)],
        }
    }
}

impl std::fmt::Debug for UserSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSpec")
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Existing account as reported by the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    /// Account name.
    pub user: String,
    /// Authentication database.
    pub db: String,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<RoleGrant>,
}
