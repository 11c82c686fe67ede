//! Handlers for entry management endpoints.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::entry::{EntryItem, EntryListResponse};
use crate::api::dto::pagination::{EntryListParams, PaginationMeta};
use crate::error::AppError;
use crate::state::AppState;

/// Lists live entries, newest first.
///
/// # Endpoint
///
/// `GET /api/entries`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: `DEFAULT_PAGE_SIZE`, max: 100)
/// - `tag` (optional): Only entries carrying this tag; normalized before matching
/// - `type` (optional): Only entries of this type, e.g. `link`
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid or the tag
/// normalizes to nothing.
pub async fn entry_list_handler(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> Result<Json<EntryListResponse>, AppError> {
    let window = params
        .pagination
        .window(state.page_size)
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = state
        .entry_service
        .live_entries(
            params.tag.as_deref(),
            params.entry_type.as_deref(),
            window.offset,
            window.limit,
        )
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

/// Retrieves any entry by id, drafts included.
///
/// # Endpoint
///
/// `GET /api/entries/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the entry does not exist.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EntryItem>, AppError> {
    let entry = state.entry_service.get_entry(id).await?;

    Ok(Json(EntryItem::build(&state.entry_service, entry)?))
}

/// Creates an entry by submitting the admin form of an entry type.
///
/// # Endpoint
///
/// `POST /api/entries/new/{type}`
///
/// # Request Body
///
/// `application/x-www-form-urlencoded` with the fields of the type's admin form
/// (see `GET /api/entry-types`), plus an optional numeric `author_id`:
///
/// ```text
/// title=Hello&slug=hello&tags=Rust,%20Web%20Dev&published=on&content=Body
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the form or the resulting entry is invalid
/// - 404 Not Found if the entry type is not registered
pub async fn create_entry_handler(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
    Form(data): Form<HashMap<String, String>>,
) -> Result<(StatusCode, Json<EntryItem>), AppError> {
    let author_id = parse_author_id(&data)?;

    let entry = state
        .entry_service
        .create_from_form(&type_name, &data, author_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntryItem::build(&state.entry_service, entry)?),
    ))
}

/// Updates an entry by resubmitting its admin form.
///
/// # Endpoint
///
/// `PUT /api/entries/{id}`
///
/// The entry keeps its type, date, author and comments; every form field is
/// replaced, so omitted optional fields are cleared.
///
/// # Errors
///
/// - 400 Bad Request if the form or the resulting entry is invalid
/// - 404 Not Found if the entry does not exist
/// - 501 Not Implemented if the entry's type is no longer registered
pub async fn update_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(data): Form<HashMap<String, String>>,
) -> Result<Json<EntryItem>, AppError> {
    let entry = state.entry_service.update_from_form(id, &data).await?;

    Ok(Json(EntryItem::build(&state.entry_service, entry)?))
}

/// Deletes an entry together with its comments.
///
/// # Endpoint
///
/// `DELETE /api/entries/{id}`
///
/// # Response
///
/// 204 No Content on success.
///
/// # Errors
///
/// Returns 404 Not Found if the entry does not exist.
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.entry_service.delete_entry(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_author_id(data: &HashMap<String, String>) -> Result<Option<i64>, AppError> {
    match data.get("author_id").map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            AppError::bad_request(
                "Invalid author id",
                json!({ "fields": { "author_id": "Enter a whole number." } }),
            )
        }),
    }
}
