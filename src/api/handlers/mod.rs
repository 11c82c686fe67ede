//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod comments;
pub mod entries;
pub mod entry_detail;
pub mod entry_types;
pub mod health;
pub mod tags;

pub use comments::add_comment_handler;
pub use entries::{
    create_entry_handler, delete_entry_handler, entry_list_handler, get_entry_handler,
    update_entry_handler,
};
pub use entry_detail::entry_detail_handler;
pub use entry_types::entry_types_handler;
pub use health::health_handler;
pub use tags::tag_entries_handler;
