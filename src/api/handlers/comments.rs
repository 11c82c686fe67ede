//! Handler for posting comments.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::comment::NewCommentRequest;
use crate::api::dto::entry::EntryItem;
use crate::error::AppError;
use crate::state::AppState;

/// Appends a comment to an entry.
///
/// # Endpoint
///
/// `POST /api/entries/{id}/comments`
///
/// # Request Body
///
/// ```json
/// { "author": "bob", "body": "Nice post" }
/// ```
///
/// # Response
///
/// 201 Created with the updated entry.
///
/// # Errors
///
/// - 400 Bad Request if a field is too long
/// - 404 Not Found if the entry does not exist
pub async fn add_comment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewCommentRequest>,
) -> Result<(StatusCode, Json<EntryItem>), AppError> {
    payload.validate()?;

    let entry = state
        .entry_service
        .add_comment(id, payload.author, payload.body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntryItem::build(&state.entry_service, entry)?),
    ))
}
