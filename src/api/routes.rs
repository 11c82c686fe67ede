//! API route configuration.

use crate::api::handlers::{
    add_comment_handler, create_entry_handler, delete_entry_handler, entry_list_handler,
    entry_types_handler, get_entry_handler, update_entry_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /entries`                - Live entries (paginated, optional tag filter)
/// - `GET    /entries/{id}`           - Any entry, drafts included
/// - `PUT    /entries/{id}`           - Resubmit the admin form of an entry
/// - `DELETE /entries/{id}`           - Delete an entry
/// - `POST   /entries/new/{type}`     - Submit the admin form of an entry type
/// - `POST   /entries/{id}/comments`  - Add a comment
/// - `GET    /entry-types`            - Registered entry types and their forms
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(entry_list_handler))
        .route(
            "/entries/{id}",
            get(get_entry_handler)
                .put(update_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/entries/new/{type}", post(create_entry_handler))
        .route("/entries/{id}/comments", post(add_comment_handler))
        .route("/entry-types", get(entry_types_handler))
}
