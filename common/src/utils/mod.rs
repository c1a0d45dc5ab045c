//! Utility functions and helpers.

pub mod id_generator;

// Re-export commonly used types
pub use id_generator::IdGenerator;
