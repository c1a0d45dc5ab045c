//! Shared data models.

pub mod user;

// Re-export commonly used types
pub use user::{RoleGrant, UserInfo, UserSpec};
