//! Entry entity: the persisted document shared by every entry kind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Comment;
use crate::domain::repositories::EntryQuery;
use crate::domain::tags::normalize_tag;
use crate::error::AppError;
use crate::utils::url_resolver::{ENTRY_DETAIL, UrlResolver};

/// A publishable entry.
///
/// The base metadata is common to every kind; kind-specific content (such as
/// the body of a text entry) lives in [`Entry::fields`]. `entry_type` names the
/// kind in the [`crate::domain::kinds::EntryTypeRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Storage identity, `None` until the entry is first saved.
    pub id: Option<i64>,
    pub entry_type: String,
    pub title: String,
    pub slug: String,
    /// Identifier of the authoring user.
    pub author_id: Option<i64>,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub comments: Vec<Comment>,
    pub published: bool,
    /// Overrides the link target of the entry title.
    pub link_url: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an unsaved, published entry dated now.
    pub fn new(
        entry_type: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            entry_type: entry_type.into(),
            title: title.into(),
            slug: slug.into(),
            author_id: None,
            date: Utc::now(),
            tags: Vec::new(),
            comments: Vec::new(),
            published: true,
            link_url: None,
            fields: BTreeMap::new(),
        }
    }

    /// Query matching only published entries.
    ///
    /// Nothing is read until a repository runs the query.
    pub fn live_entries() -> EntryQuery {
        EntryQuery::live()
    }

    /// Returns true once the entry has been persisted.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Returns a kind-specific field, if set.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Date segment of the entry URL, e.g. `2024/jan/05`.
    pub fn date_path(&self) -> String {
        self.date.format("%Y/%b/%d").to_string().to_lowercase()
    }

    /// Canonical URL of the entry, resolved through the `entry-detail` route.
    ///
    /// Depends only on `date` and `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the resolver has no `entry-detail` route.
    pub fn get_absolute_url(&self, resolver: &UrlResolver) -> Result<String, AppError> {
        resolver.reverse(ENTRY_DETAIL, &[&self.date_path(), &self.slug])
    }

    /// Replaces every tag with its normalized form, keeping order and duplicates.
    pub fn normalize_tags(&mut self) {
        self.tags = self.tags.iter().map(|tag| normalize_tag(tag)).collect();
    }

    /// Appends a comment.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dated_entry(slug: &str) -> Entry {
        let mut entry = Entry::new("text", "Hello", slug);
        entry.date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        entry
    }

    #[test]
    fn test_new_entry_defaults() {
        let entry = Entry::new("text", "Hello", "hello");

        assert!(entry.id.is_none());
        assert!(!entry.is_saved());
        assert!(entry.published);
        assert!(entry.tags.is_empty());
        assert!(entry.comments.is_empty());
        assert!(entry.link_url.is_none());
    }

    #[test]
    fn test_date_path_uses_lowercase_month() {
        assert_eq!(dated_entry("hello").date_path(), "2024/jan/05");
    }

    #[test]
    fn test_get_absolute_url() {
        let resolver = UrlResolver::default();
        let url = dated_entry("hello-world").get_absolute_url(&resolver).unwrap();

        assert_eq!(url, "/2024/jan/05/hello-world/");
    }

    #[test]
    fn test_absolute_url_depends_only_on_date_and_slug() {
        let resolver = UrlResolver::default();
        let first = dated_entry("same");
        let mut second = dated_entry("same");
        second.title = "Another title".to_string();
        second.entry_type = "link".to_string();
        second.published = false;

        assert_eq!(
            first.get_absolute_url(&resolver).unwrap(),
            second.get_absolute_url(&resolver).unwrap()
        );
    }

    #[test]
    fn test_normalize_tags_keeps_order_and_duplicates() {
        let mut entry = dated_entry("hello");
        entry.tags = vec![
            "  Web Dev!! ".to_string(),
            "Rust".to_string(),
            "rust".to_string(),
        ];

        entry.normalize_tags();

        assert_eq!(entry.tags, vec!["web-dev", "rust", "rust"]);
    }

    #[test]
    fn test_live_entries_query_is_published_only() {
        assert_eq!(Entry::live_entries().published, Some(true));
    }
}
