//! Account provisioning steps.
//!
//! Each step looks the account up before creating it, so running the tool
//! again is a no-op. A failed step is reported and the next step still runs.

use common::config::AppConfig;
use common::errors::AppResult;
use common::models::{UserInfo, UserSpec};
use validator::Validate;

use crate::directory::{CreateOutcome, UserDirectory};

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

/// Results of one provisioning run.
#[derive(Debug)]
pub struct ProvisionReport {
    pub admin: AppResult<ProvisionOutcome>,
    pub app: AppResult<ProvisionOutcome>,
    pub users: AppResult<Vec<UserInfo>>,
}

impl ProvisionReport {
    pub fn is_success(&self) -> bool {
        self.admin.is_ok() && self.app.is_ok() && self.users.is_ok()
    }

    /// Operator-facing summary.
    pub fn render(&self, config: &AppConfig) -> String {
        let mut out = String::new();
        out.push_str(&format!("Existing users in {}:\n", config.app_database));
        match &self.users {
            Ok(users) if users.is_empty() => out.push_str("   (none)\n"),
            Ok(users) => {
                for user in users {
                    let roles = serde_json::to_string(&user.roles).unwrap_or_default();
                    out.push_str(&format!("   - {}: {}\n", user.user, roles));
                }
            }
            Err(e) => out.push_str(&format!("   could not list users: {}\n", e)),
        }

        if self.is_success() {
            out.push_str("\nAuthentication setup complete!\n");
        } else {
            out.push_str("\nAuthentication setup finished with errors, see log above.\n");
        }
        out.push_str("\nTo test authentication, restart MongoDB with --auth and connect with:\n");
        out.push_str(&format!(
            "   mongosh -u {} -p --authenticationDatabase {}\n",
            config.app_user.username, config.app_user.database
        ));
        out
    }
}

/// Runs the provisioning sequence against a user directory.
pub struct Provisioner<D> {
    directory: D,
}

impl<D: UserDirectory> Provisioner<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Creates the account unless it already exists.
    ///
    /// A failed lookup (e.g. `usersInfo` not permitted under the localhost
    /// exception) does not fail the step: the create is attempted anyway and
    /// an existing account is detected from its error code.
    pub async fn ensure_user(&self, spec: &UserSpec) -> AppResult<ProvisionOutcome> {
        spec.validate()?;

        match self.directory.find_user(&spec.database, &spec.username).await {
            Ok(Some(_)) => {
                tracing::info!(user = %spec.username, db = %spec.database, "user already exists, skipping");
                return Ok(ProvisionOutcome::AlreadyExists);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user = %spec.username, db = %spec.database, error = %e, "user lookup failed, attempting create");
            }
        }

        match self.directory.create_user(spec).await? {
            CreateOutcome::Created => {
                tracing::info!(user = %spec.username, db = %spec.database, roles = ?spec.roles, "user created");
                Ok(ProvisionOutcome::Created)
            }
            CreateOutcome::AlreadyExists => {
                tracing::info!(user = %spec.username, db = %spec.database, "user already exists (created concurrently)");
                Ok(ProvisionOutcome::AlreadyExists)
            }
        }
    }

    /// Ensures the admin account, then the application account, then lists
    /// the application database's users.
    pub async fn run(&self, config: &AppConfig) -> ProvisionReport {
        let admin = self.step("admin user", &config.admin_user).await;
        let app = self.step("application user", &config.app_user).await;

        let users = self.directory.list_users(&config.app_database).await;
        if let Err(e) = &users {
            tracing::error!(db = %config.app_database, error = %e, "failed to list users");
        }

        ProvisionReport { admin, app, users }
    }

    async fn step(&self, step: &'static str, spec: &UserSpec) -> AppResult<ProvisionOutcome> {
        let result = self.ensure_user(spec).await;
        if let Err(e) = &result {
            tracing::error!(step, user = %spec.username, db = %spec.database, error = %e, "provisioning step failed");
        }
        result
    }
}
