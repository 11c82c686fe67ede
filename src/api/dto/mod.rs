//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod comment;
pub mod entry;
pub mod entry_types;
pub mod health;
pub mod pagination;
