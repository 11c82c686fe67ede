//! Business logic services for the application layer.

pub mod entry_service;

pub use entry_service::{EntryPage, EntryService};
