//! Handler for tag pages.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::entry::{EntryItem, EntryListResponse};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists live entries carrying a tag.
///
/// # Endpoint
///
/// `GET /tag/{tag}`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid or the tag
/// normalizes to nothing.
pub async fn tag_entries_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<EntryListResponse>, AppError> {
    let window = params
        .window(state.page_size)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .entry_service
        .live_entries(Some(&tag), None, window.offset, window.limit)
        .await?;

    let items = page
        .items
        .into_iter()
        .map(|entry| EntryItem::build(&state.entry_service, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(EntryListResponse {
        pagination: PaginationMeta::new(window, page.total),
        items,
    }))
}
