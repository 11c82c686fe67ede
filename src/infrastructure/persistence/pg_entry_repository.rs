//! PostgreSQL implementation of the entry repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entities::{Comment, Entry};
use crate::domain::repositories::{EntryQuery, EntryRepository};
use crate::error::AppError;

const ENTRY_COLUMNS: &str = "id, entry_type, title, slug, author_id, date, tags, comments, \
                             published, link_url, fields";

/// Row shape of the `entries` table.
///
/// Tags are a `TEXT[]`; comments and kind-specific fields are stored as JSONB.
#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i64,
    entry_type: String,
    title: String,
    slug: String,
    author_id: Option<i64>,
    date: DateTime<Utc>,
    tags: Vec<String>,
    comments: Json<Vec<Comment>>,
    published: bool,
    link_url: Option<String>,
    fields: Json<BTreeMap<String, String>>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: Some(row.id),
            entry_type: row.entry_type,
            title: row.title,
            slug: row.slug,
            author_id: row.author_id,
            date: row.date,
            tags: row.tags,
            comments: row.comments.0,
            published: row.published,
            link_url: row.link_url,
            fields: row.fields.0,
        }
    }
}

/// PostgreSQL repository for entries.
pub struct PgEntryRepository {
    pool: Arc<PgPool>,
}

impl PgEntryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn insert(&self, entry: Entry) -> Result<Entry, AppError> {
        let sql = format!(
            r#"
            INSERT INTO entries
                (entry_type, title, slug, author_id, date, tags, comments, published, link_url, fields)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ENTRY_COLUMNS}
            "#
        );

        let row: EntryRow = sqlx::query_as(&sql)
            .bind(&entry.entry_type)
            .bind(&entry.title)
            .bind(&entry.slug)
            .bind(entry.author_id)
            .bind(entry.date)
            .bind(&entry.tags)
            .bind(Json(&entry.comments))
            .bind(entry.published)
            .bind(&entry.link_url)
            .bind(Json(&entry.fields))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, entry: Entry) -> Result<Entry, AppError> {
        let sql = format!(
            r#"
            UPDATE entries
            SET entry_type = $1, title = $2, slug = $3, author_id = $4, date = $5,
                tags = $6, comments = $7, published = $8, link_url = $9, fields = $10
            WHERE id = $11
            RETURNING {ENTRY_COLUMNS}
            "#
        );

        let row: Option<EntryRow> = sqlx::query_as(&sql)
            .bind(&entry.entry_type)
            .bind(&entry.title)
            .bind(&entry.slug)
            .bind(entry.author_id)
            .bind(entry.date)
            .bind(&entry.tags)
            .bind(Json(&entry.comments))
            .bind(entry.published)
            .bind(&entry.link_url)
            .bind(Json(&entry.fields))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Entry::from)
            .ok_or_else(|| AppError::not_found("Entry not found", json!({ "id": id })))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Entry>, AppError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1");

        let row: Option<EntryRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Entry::from))
    }

    async fn find_published_by_date_and_slug(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Entry>, AppError> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE slug = $1
              AND (date AT TIME ZONE 'UTC')::date = $2
              AND published
            LIMIT 1
            "#
        );

        let row: Option<EntryRow> = sqlx::query_as(&sql)
            .bind(slug)
            .bind(date)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Entry::from))
    }

    async fn find(&self, query: EntryQuery) -> Result<Vec<Entry>, AppError> {
        let sql = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM entries
            WHERE ($1::boolean IS NULL OR published = $1)
              AND ($2::text IS NULL OR $2 = ANY(tags))
              AND ($3::text IS NULL OR entry_type = $3)
            ORDER BY date DESC, id DESC
            LIMIT $4 OFFSET $5
            "#
        );

        let rows: Vec<EntryRow> = sqlx::query_as(&sql)
            .bind(query.published)
            .bind(&query.tag)
            .bind(&query.entry_type)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn count(&self, query: EntryQuery) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM entries
            WHERE ($1::boolean IS NULL OR published = $1)
              AND ($2::text IS NULL OR $2 = ANY(tags))
              AND ($3::text IS NULL OR entry_type = $3)
            "#,
        )
        .bind(query.published)
        .bind(&query.tag)
        .bind(&query.entry_type)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
