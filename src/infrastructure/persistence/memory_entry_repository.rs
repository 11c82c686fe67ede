//! In-process entry repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Entry;
use crate::domain::repositories::{EntryQuery, EntryRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    entries: BTreeMap<i64, Entry>,
}

/// Entry repository that keeps everything in memory.
///
/// Used when no database is configured and by the HTTP tests. Contents are
/// lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryEntryRepository {
    store: RwLock<Store>,
}

impl MemoryEntryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory entry storage");
        Self::default()
    }
}

fn newest_first(a: &Entry, b: &Entry) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

fn same_live_url(a: &Entry, b: &Entry) -> bool {
    a.published && b.published && a.slug == b.slug && a.date.date_naive() == b.date.date_naive()
}

impl Store {
    /// Mirrors the `entries_live_url_key` index of the PostgreSQL schema.
    fn check_live_url(&self, entry: &Entry, id: Option<i64>) -> Result<(), AppError> {
        let taken = self
            .entries
            .iter()
            .any(|(other_id, other)| Some(*other_id) != id && same_live_url(entry, other));

        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "entries_live_url_key" }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryRepository for MemoryEntryRepository {
    async fn insert(&self, mut entry: Entry) -> Result<Entry, AppError> {
        let mut store = self.store.write().await;
        store.check_live_url(&entry, None)?;
        store.next_id += 1;
        let id = store.next_id;

        entry.id = Some(id);
        store.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn update(&self, id: i64, mut entry: Entry) -> Result<Entry, AppError> {
        let mut store = self.store.write().await;
        if !store.entries.contains_key(&id) {
            return Err(AppError::not_found("Entry not found", json!({ "id": id })));
        }
        store.check_live_url(&entry, Some(id))?;

        entry.id = Some(id);
        store.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Entry>, AppError> {
        Ok(self.store.read().await.entries.get(&id).cloned())
    }

    async fn find_published_by_date_and_slug(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Entry>, AppError> {
        Ok(self
            .store
            .read()
            .await
            .entries
            .values()
            .find(|entry| entry.published && entry.slug == slug && entry.date.date_naive() == date)
            .cloned())
    }

    async fn find(&self, query: EntryQuery) -> Result<Vec<Entry>, AppError> {
        let store = self.store.read().await;
        let mut matches: Vec<Entry> = store
            .entries
            .values()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        matches.sort_by(newest_first);

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);

        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: EntryQuery) -> Result<i64, AppError> {
        let store = self.store.read().await;
        let count = store
            .entries
            .values()
            .filter(|entry| query.matches(entry))
            .count();

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.write().await.entries.remove(&id).is_some())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(slug: &str, published: bool, days_ago: i64) -> Entry {
        let mut entry = Entry::new("text", "Title", slug);
        entry.published = published;
        entry.date = Utc::now() - Duration::days(days_ago);
        entry
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let repo = MemoryEntryRepository::new();
        let first = repo.insert(entry("a", true, 0)).await.unwrap();
        let second = repo.insert(entry("b", true, 0)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().slug, "b");
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let repo = MemoryEntryRepository::new();
        let result = repo.update(42, entry("a", true, 0)).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_live_query_excludes_drafts_and_orders_newest_first() {
        let repo = MemoryEntryRepository::new();
        repo.insert(entry("old", true, 3)).await.unwrap();
        repo.insert(entry("draft", false, 1)).await.unwrap();
        repo.insert(entry("new", true, 0)).await.unwrap();

        let live = repo.find(Entry::live_entries()).await.unwrap();
        let slugs: Vec<_> = live.iter().map(|e| e.slug.as_str()).collect();

        assert_eq!(slugs, vec!["new", "old"]);
        assert_eq!(repo.count(Entry::live_entries()).await.unwrap(), 2);
        assert_eq!(repo.count(EntryQuery::all()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = MemoryEntryRepository::new();
        for days in 0..5 {
            repo.insert(entry(&format!("e{days}"), true, days)).await.unwrap();
        }

        let page = repo
            .find(EntryQuery::live().paginate(2, 2))
            .await
            .unwrap();
        let slugs: Vec<_> = page.iter().map(|e| e.slug.as_str()).collect();

        assert_eq!(slugs, vec!["e2", "e3"]);
    }

    #[tokio::test]
    async fn test_find_published_by_date_and_slug() {
        let repo = MemoryEntryRepository::new();
        let saved = repo.insert(entry("hello", true, 0)).await.unwrap();

        let found = repo
            .find_published_by_date_and_slug(saved.date.date_naive(), "hello")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, saved.id);

        let other_day = saved.date.date_naive() - Duration::days(1);
        assert!(
            repo.find_published_by_date_and_slug(other_day, "hello")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_lookup_skips_earlier_draft_with_same_url() {
        let repo = MemoryEntryRepository::new();
        let draft = repo.insert(entry("hello", false, 0)).await.unwrap();

        let mut live = entry("hello", true, 0);
        live.date = draft.date;
        let live = repo.insert(live).await.unwrap();

        let found = repo
            .find_published_by_date_and_slug(live.date.date_naive(), "hello")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, live.id);
    }

    #[tokio::test]
    async fn test_second_live_entry_with_same_url_conflicts() {
        let repo = MemoryEntryRepository::new();
        let first = repo.insert(entry("hello", true, 0)).await.unwrap();

        let mut second = entry("hello", true, 0);
        second.date = first.date;
        let result = repo.insert(second.clone()).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));

        second.published = false;
        let draft = repo.insert(second).await.unwrap();

        let mut publish = draft.clone();
        publish.published = true;
        let result = repo.update(draft.id.unwrap(), publish).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));

        // Re-saving the live entry itself is not a collision.
        assert!(repo.update(first.id.unwrap(), first).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = MemoryEntryRepository::new();
        repo.insert(entry("a", true, 0)).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }
}
