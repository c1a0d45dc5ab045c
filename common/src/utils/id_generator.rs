//! Unique ID generator.
//!
//! Provides identifiers for transient UI entities.

use uuid::Uuid;

/// Generates unique identifiers for various entities.
pub struct IdGenerator;

impl IdGenerator {
    /// Generates a unique toast ID.
    ///
    /// # Returns
    /// An 8-character unique string.
    pub fn toast_id() -> String {
        Self::short_id()
    }

    /// Generates a short unique ID (first 8 characters of UUID).
    pub fn short_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }
}
