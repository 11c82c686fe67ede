//! DTOs for entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::comment::CommentItem;
use crate::api::dto::pagination::PaginationMeta;
use crate::application::services::EntryService;
use crate::domain::entities::Entry;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

/// Tag with the URL listing its live entries.
#[derive(Debug, Serialize)]
pub struct TagItem {
    pub name: String,
    pub url: String,
}

/// JSON representation of an entry.
#[derive(Debug, Serialize)]
pub struct EntryItem {
    pub id: Option<i64>,
    pub entry_type: String,
    pub title: String,
    pub slug: String,
    pub url: String,
    pub author_id: Option<i64>,
    pub date: DateTime<Utc>,
    pub published: bool,
    pub link_url: Option<String>,
    pub tags: Vec<TagItem>,
    pub fields: BTreeMap<String, String>,
    /// Markup produced by the entry's kind; absent for unregistered types.
    pub content: Option<String>,
    pub comments: Vec<CommentItem>,
}

impl EntryItem {
    /// Builds the response for an entry, rendering its content and URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if rendering fails or a route is missing.
    pub fn build(
        service: &EntryService<dyn EntryRepository>,
        entry: Entry,
    ) -> Result<Self, AppError> {
        let content = match service.render(&entry) {
            Ok(html) => Some(html),
            Err(AppError::NotImplemented { .. }) => None,
            Err(e) => return Err(e),
        };
        let url = service.absolute_url(&entry)?;
        let tags = entry
            .tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .map(|tag| {
                Ok(TagItem {
                    name: tag.clone(),
                    url: service.tag_url(tag)?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            id: entry.id,
            entry_type: entry.entry_type,
            title: entry.title,
            slug: entry.slug,
            url,
            author_id: entry.author_id,
            date: entry.date,
            published: entry.published,
            link_url: entry.link_url,
            tags,
            fields: entry.fields,
            content,
            comments: entry.comments.into_iter().map(CommentItem::from).collect(),
        })
    }
}

/// Paginated list of entries.
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<EntryItem>,
}
