//! Database user directory.
//!
//! `UserDirectory` is the seam between the provisioning steps and the
//! database; `MongoDirectory` implements it with MongoDB user-management
//! commands.

use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use common::models::{UserInfo, UserSpec};
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::Client;
use serde::Deserialize;

/// MongoDB error code for "User already exists".
const USER_ALREADY_EXISTS: i32 = 51003;

/// Result of a create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Another writer created the account between lookup and create.
    AlreadyExists,
}

/// User-management operations against one database server.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up `username` in `database`.
    async fn find_user(&self, database: &str, username: &str) -> AppResult<Option<UserInfo>>;

    /// Creates the account described by `spec` in `spec.database`.
    async fn create_user(&self, spec: &UserSpec) -> AppResult<CreateOutcome>;

    /// Lists accounts defined in `database`.
    async fn list_users(&self, database: &str) -> AppResult<Vec<UserInfo>>;
}

#[derive(Deserialize)]
struct UsersInfoReply {
    #[serde(default)]
    users: Vec<UserInfo>,
}

/// MongoDB-backed user directory.
pub struct MongoDirectory {
    client: Client,
}

impl MongoDirectory {
    /// Creates a client for `uri`. The server is contacted on first use.
    pub async fn connect(uri: &str) -> AppResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("invalid MongoDB URI: {}", e)))?;
        Ok(Self { client })
    }

    async fn users_info(&self, database: &str, filter: Document) -> AppResult<Vec<UserInfo>> {
        let reply = self
            .client
            .database(database)
            .run_command(filter)
            .await
            .map_err(|e| AppError::Database(format!("usersInfo on {} failed: {}", database, e)))?;
        let reply: UsersInfoReply = mongodb::bson::from_document(reply)
            .map_err(|e| AppError::Database(format!("unexpected usersInfo reply: {}", e)))?;
        Ok(reply.users)
    }
}

#[async_trait]
impl UserDirectory for MongoDirectory {
    async fn find_user(&self, database: &str, username: &str) -> AppResult<Option<UserInfo>> {
        let users = self
            .users_info(database, doc! { "usersInfo": { "user": username, "db": database } })
            .await?;
        Ok(users.into_iter().find(|u| u.user == username))
    }

    async fn create_user(&self, spec: &UserSpec) -> AppResult<CreateOutcome> {
        let roles: Vec<Document> = spec
            .roles
            .iter()
            .map(|r| doc! { "role": r.role.as_str(), "db": r.db.as_str() })
            .collect();
        let command = doc! {
            "createUser": spec.username.as_str(),
            "pwd": spec.password.as_str(),
            "roles": roles,
        };

        match self.client.database(&spec.database).run_command(command).await {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(e) => match *e.kind {
                ErrorKind::Command(ref cmd) if cmd.code == USER_ALREADY_EXISTS => {
                    Ok(CreateOutcome::AlreadyExists)
                }
                _ => Err(AppError::Database(format!(
                    "createUser {} on {} failed: {}",
                    spec.username, spec.database, e
                ))),
            },
        }
    }

    async fn list_users(&self, database: &str) -> AppResult<Vec<UserInfo>> {
        self.users_info(database, doc! { "usersInfo": 1 }).await
    }
}
