//! Core domain entities.
//!
//! - [`Entry`] - A publishable entry of any kind
//! - [`Comment`] - A comment embedded in an entry

pub mod comment;
pub mod entry;

pub use comment::Comment;
pub use entry::Entry;
