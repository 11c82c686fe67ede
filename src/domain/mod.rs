//! Domain layer: the entry model and the rules attached to it.
//!
//! - [`entities`] - [`entities::Entry`] and its embedded [`entities::Comment`]s
//! - [`tags`] - Tag normalization applied on save
//! - [`schema`] - Field schema of the entry document and its validation
//! - [`forms`] - Admin form descriptions and form cleaning
//! - [`kinds`] - Entry kinds and the type registry
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependency on HTTP or on a particular database;
//! orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod forms;
pub mod kinds;
pub mod repositories;
pub mod schema;
pub mod tags;
