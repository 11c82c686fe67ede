//! Application layer services implementing business logic.
//!
//! Services coordinate the entry kinds, validation rules and repository calls,
//! and give HTTP handlers and the admin CLI a single API to work against.
//!
//! # Available Services
//!
//! - [`services::entry_service::EntryService`] - Entry saving, querying, editing and rendering

pub mod services;
