//! Handler for the public entry URL.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::api::dto::entry::EntryItem;
use crate::error::AppError;
use crate::state::AppState;

/// Shows a published entry at its canonical URL.
///
/// # Endpoint
///
/// `GET /{year}/{month}/{day}/{slug}`
///
/// The month is the English abbreviation used by entry URLs, e.g.
/// `/2024/jan/05/hello-world/`.
///
/// # Errors
///
/// Returns 404 Not Found if the date is malformed or no published entry
/// matches. Drafts are never shown here.
pub async fn entry_detail_handler(
    State(state): State<AppState>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
) -> Result<Json<EntryItem>, AppError> {
    let date = parse_entry_date(&year, &month, &day)?;
    let entry = state.entry_service.get_published_entry(date, &slug).await?;

    Ok(Json(EntryItem::build(&state.entry_service, entry)?))
}

fn parse_entry_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(&format!("{year}/{month}/{day}"), "%Y/%b/%d").map_err(|_| {
        AppError::not_found(
            "Entry not found",
            json!({ "date": format!("{year}/{month}/{day}") }),
        )
    })
}
