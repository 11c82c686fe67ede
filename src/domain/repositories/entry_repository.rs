//! Repository trait for entry storage.

use crate::domain::entities::Entry;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Description of a set of entries.
///
/// A query is plain data: building one reads nothing. Repositories execute it
/// and return matches newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub published: Option<bool>,
    pub tag: Option<String>,
    pub entry_type: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl Default for EntryQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl EntryQuery {
    /// Default page size when none is requested.
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Matches every entry, published or not.
    pub fn all() -> Self {
        Self {
            published: None,
            tag: None,
            entry_type: None,
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Matches published entries only.
    pub fn live() -> Self {
        Self {
            published: Some(true),
            ..Self::all()
        }
    }

    /// Restricts the query to entries carrying a (normalized) tag.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    /// Restricts the query to one entry kind. The name is lower-cased to match
    /// the stored registry key.
    pub fn with_entry_type(mut self, entry_type: Option<&str>) -> Self {
        self.entry_type = entry_type.map(str::to_lowercase);
        self
    }

    pub fn paginate(mut self, offset: i64, limit: i64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Returns true if the entry satisfies the filters (pagination aside).
    pub fn matches(&self, entry: &Entry) -> bool {
        self.published.is_none_or(|published| entry.published == published)
            && self
                .tag
                .as_ref()
                .is_none_or(|tag| entry.tags.iter().any(|t| t == tag))
            && self
                .entry_type
                .as_ref()
                .is_none_or(|entry_type| entry.entry_type == *entry_type)
    }
}

/// Repository interface for entries.
///
/// Stores entries exactly as given: normalization and validation happen in
/// [`crate::application::services::EntryService::save`] before any call here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEntryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryEntryRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Inserts a new entry and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if another published entry already has
    /// the same day and slug.
    /// Returns [`AppError::Validation`] if the author reference is dangling.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, entry: Entry) -> Result<Entry, AppError>;

    /// Replaces a stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has the given id.
    /// Returns [`AppError::Conflict`] if another published entry already has
    /// the same day and slug.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, id: i64, entry: Entry) -> Result<Entry, AppError>;

    /// Finds an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Entry>, AppError>;

    /// Finds the published entry under `slug` on the given (UTC) day.
    ///
    /// Drafts are never returned. At most one published entry holds a given
    /// day and slug; `insert` and `update` reject a second one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_published_by_date_and_slug(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Entry>, AppError>;

    /// Runs a query, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, query: EntryQuery) -> Result<Vec<Entry>, AppError>;

    /// Counts entries matching a query, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self, query: EntryQuery) -> Result<i64, AppError>;

    /// Deletes an entry. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap round trip used by health checks.
    async fn ping(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_query() {
        let query = EntryQuery::live();
        let mut entry = Entry::new("text", "t", "s");

        assert!(query.matches(&entry));
        entry.published = false;
        assert!(!query.matches(&entry));
        assert!(EntryQuery::all().matches(&entry));
    }

    #[test]
    fn test_tag_and_type_filters() {
        let mut entry = Entry::new("text", "t", "s");
        entry.tags = vec!["rust".to_string()];

        assert!(EntryQuery::all().with_tag(Some("rust".into())).matches(&entry));
        assert!(!EntryQuery::all().with_tag(Some("go".into())).matches(&entry));
        assert!(EntryQuery::all().with_entry_type(Some("TEXT")).matches(&entry));
        assert!(!EntryQuery::all().with_entry_type(Some("link")).matches(&entry));
        assert_eq!(
            EntryQuery::all().with_entry_type(Some("Link")).entry_type.as_deref(),
            Some("link")
        );
    }

    #[test]
    fn test_paginate() {
        let query = EntryQuery::live().paginate(20, 5);
        assert_eq!(query.offset, 20);
        assert_eq!(query.limit, 5);
        assert_eq!(query.published, Some(true));
    }
}
