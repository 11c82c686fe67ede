//! Handler for listing entry kinds.

use axum::{Json, extract::State};

use crate::api::dto::entry_types::{EntryTypeItem, EntryTypeListResponse};
use crate::state::AppState;

/// Lists registered entry kinds with their admin forms.
///
/// # Endpoint
///
/// `GET /api/entry-types`
///
/// # Response
///
/// ```json
/// {
///   "items": [
///     {
///       "name": "link",
///       "form": {
///         "fields": [
///           { "name": "title", "kind": "char", "required": true },
///           { "name": "link_url", "kind": "char", "required": true }
///         ]
///       }
///     }
///   ]
/// }
/// ```
pub async fn entry_types_handler(State(state): State<AppState>) -> Json<EntryTypeListResponse> {
    let items = state
        .entry_service
        .entry_types()
        .into_iter()
        .map(|(name, form)| EntryTypeItem { name, form })
        .collect();

    Json(EntryTypeListResponse { items })
}
