//! Entry repository implementations.
//!
//! - [`PgEntryRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryEntryRepository`] - In-process storage used when no database is
//!   configured and in tests

pub mod memory_entry_repository;
pub mod pg_entry_repository;

pub use memory_entry_repository::MemoryEntryRepository;
pub use pg_entry_repository::PgEntryRepository;
