//! Entry publishing service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::entities::{Comment, Entry};
use crate::domain::forms::AdminForm;
use crate::domain::kinds::{EntryKind, EntryTypeRegistry};
use crate::domain::repositories::{EntryQuery, EntryRepository};
use crate::domain::schema::validate_entry;
use crate::domain::tags::{normalize_tag, split_tags};
use crate::error::AppError;
use crate::utils::url_resolver::{TAG_DETAIL, UrlResolver};

/// One page of entries plus the total number of matches.
#[derive(Debug, Clone)]
pub struct EntryPage {
    pub items: Vec<Entry>,
    pub total: i64,
}

/// Service for saving, querying and rendering entries.
///
/// Owns the save pipeline: tags are normalized and the entry is validated
/// against the base schema and its kind before anything reaches the repository.
pub struct EntryService<R: EntryRepository + ?Sized> {
    repository: Arc<R>,
    registry: Arc<EntryTypeRegistry>,
    resolver: Arc<UrlResolver>,
}

impl<R: EntryRepository + ?Sized> EntryService<R> {
    /// Creates a new entry service.
    pub fn new(
        repository: Arc<R>,
        registry: Arc<EntryTypeRegistry>,
        resolver: Arc<UrlResolver>,
    ) -> Self {
        Self {
            repository,
            registry,
            resolver,
        }
    }

    pub fn registry(&self) -> &EntryTypeRegistry {
        &self.registry
    }

    /// Whether the underlying storage answers.
    pub async fn ping(&self) -> bool {
        self.repository.ping().await
    }

    /// Published entries, newest first, optionally restricted to a tag and an
    /// entry type.
    ///
    /// The tag is normalized before matching, so `"Web Dev"` finds entries
    /// tagged `web-dev`. Type names match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the tag normalizes to nothing.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn live_entries(
        &self,
        tag: Option<&str>,
        entry_type: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<EntryPage, AppError> {
        let tag = match tag.map(normalize_tag) {
            Some(normalized) if normalized.is_empty() => {
                return Err(AppError::bad_request(
                    "Tag is empty after normalization",
                    json!({ "tag": tag }),
                ));
            }
            normalized => normalized,
        };

        let query = Entry::live_entries()
            .with_tag(tag)
            .with_entry_type(entry_type)
            .paginate(offset, limit);

        self.find(query).await
    }

    /// Runs an arbitrary query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn find(&self, query: EntryQuery) -> Result<EntryPage, AppError> {
        let total = self.repository.count(query.clone()).await?;
        let items = self.repository.find(query).await?;

        Ok(EntryPage { items, total })
    }

    /// Retrieves any entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn get_entry(&self, id: i64) -> Result<Entry, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "id": id })))
    }

    /// Retrieves a published entry by its URL components.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no published entry matches.
    pub async fn get_published_entry(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Entry, AppError> {
        self.repository
            .find_published_by_date_and_slug(date, slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Entry not found",
                    json!({ "date": date.to_string(), "slug": slug }),
                )
            })
    }

    /// Normalizes, validates and persists an entry.
    ///
    /// Every tag is replaced by its normalized form before validation, so raw
    /// tags never reach storage. The entry type is stored as its lower-cased
    /// registry key. Entries without an id are inserted; the others replace the
    /// stored version.
    ///
    /// Entries whose type has no registered kind are checked against the base
    /// schema only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a required field is empty, the slug
    /// is malformed, a tag is too long or a kind-specific rule fails.
    /// Returns [`AppError::NotFound`] when updating an entry that no longer exists.
    /// Returns [`AppError::Conflict`] if another published entry already lives
    /// at the same URL.
    pub async fn save(&self, mut entry: Entry) -> Result<Entry, AppError> {
        entry.normalize_tags();
        entry.entry_type = entry.entry_type.to_lowercase();

        let kind = self.registry.get(&entry.entry_type);
        let extra_fields = kind.as_ref().map_or(&[][..], |kind| kind.fields());
        validate_entry(&entry, extra_fields)?;
        if let Some(kind) = &kind {
            kind.validate(&entry)?;
        }

        let saved = match entry.id {
            Some(id) => self.repository.update(id, entry).await?,
            None => self.repository.insert(entry).await?,
        };

        tracing::info!(
            id = saved.id,
            entry_type = %saved.entry_type,
            slug = %saved.slug,
            "Entry saved"
        );

        Ok(saved)
    }

    /// Creates an entry of the given kind from submitted admin form data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the type is not registered.
    /// Returns [`AppError::Validation`] if the form or the resulting entry is invalid.
    pub async fn create_from_form(
        &self,
        type_name: &str,
        data: &HashMap<String, String>,
        author_id: Option<i64>,
    ) -> Result<Entry, AppError> {
        let kind = self.registry.get(type_name).ok_or_else(|| {
            AppError::not_found("Unknown entry type", json!({ "entry_type": type_name }))
        })?;

        let mut entry = Entry::new(kind.type_name().to_lowercase(), "", "");
        entry.author_id = author_id;
        apply_admin_form(kind.as_ref(), &mut entry, data)?;

        self.save(entry).await
    }

    /// Updates an existing entry from submitted admin form data.
    ///
    /// The entry keeps its kind, date, author and comments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    /// Returns [`AppError::NotImplemented`] if the entry's kind is not registered.
    /// Returns [`AppError::Validation`] if the form or the resulting entry is invalid.
    pub async fn update_from_form(
        &self,
        id: i64,
        data: &HashMap<String, String>,
    ) -> Result<Entry, AppError> {
        let mut entry = self.get_entry(id).await?;
        let kind = self.kind_of(&entry)?;
        apply_admin_form(kind.as_ref(), &mut entry, data)?;

        self.save(entry).await
    }

    /// Appends a comment to an entry and saves it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn add_comment(
        &self,
        id: i64,
        author: Option<String>,
        body: Option<String>,
    ) -> Result<Entry, AppError> {
        let mut entry = self.get_entry(id).await?;
        entry.add_comment(Comment::new(author, body));

        self.save(entry).await
    }

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the entry does not exist.
    pub async fn delete_entry(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Entry not found", json!({ "id": id })));
        }

        tracing::info!(id, "Entry deleted");
        Ok(())
    }

    /// Markup of an entry, produced by its kind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotImplemented`] if no kind is registered for the
    /// entry's type: the base entry has no content of its own.
    pub fn render(&self, entry: &Entry) -> Result<String, AppError> {
        self.kind_of(entry)?.rendered_content(entry)
    }

    /// Canonical URL of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the `entry-detail` route is missing.
    pub fn absolute_url(&self, entry: &Entry) -> Result<String, AppError> {
        entry.get_absolute_url(&self.resolver)
    }

    /// URL listing live entries with a tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the `tag-detail` route is missing.
    pub fn tag_url(&self, tag: &str) -> Result<String, AppError> {
        self.resolver.reverse(TAG_DETAIL, &[tag])
    }

    /// Registered kinds with the admin form of each, sorted by name.
    pub fn entry_types(&self) -> Vec<(String, AdminForm)> {
        self.registry
            .type_names()
            .into_iter()
            .filter_map(|name| {
                self.registry
                    .get(name)
                    .map(|kind| (name.to_string(), kind.admin_form()))
            })
            .collect()
    }

    fn kind_of(&self, entry: &Entry) -> Result<Arc<dyn EntryKind>, AppError> {
        self.registry.get(&entry.entry_type).ok_or_else(|| {
            AppError::not_implemented(
                "No entry kind registered for this entry type",
                json!({ "entry_type": entry.entry_type }),
            )
        })
    }
}

/// Copies cleaned admin form values onto an entry.
fn apply_admin_form(
    kind: &dyn EntryKind,
    entry: &mut Entry,
    data: &HashMap<String, String>,
) -> Result<(), AppError> {
    let cleaned = kind.admin_form().clean(data)?;

    entry.title = cleaned.text("title").unwrap_or_default().to_string();
    entry.slug = cleaned.text("slug").unwrap_or_default().to_string();
    entry.tags = split_tags(cleaned.text("tags").unwrap_or_default());
    entry.published = cleaned.flag("published");
    kind.apply_form(entry, &cleaned);

    Ok(())
}
