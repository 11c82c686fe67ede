//! Field schema of the entry document and the routine that validates it.
//!
//! The base document is described by [`ENTRY_SCHEMA`]. Entry kinds describe the
//! extra fields they keep in [`Entry::fields`] with the same [`FieldSchema`]
//! type, and [`validate_entry`] checks both in one pass so the caller sees every
//! violation at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::domain::entities::Entry;
use crate::error::AppError;

/// Allowed slug characters. The whole slug must match.
pub static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern is valid"));

/// Maximum stored length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Storage type of a document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    StringList,
    DateTime,
    Boolean,
    Reference,
    EmbeddedList,
}

/// Description of one document field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Pattern every present string value must match.
    pub pattern: Option<&'static LazyLock<Regex>>,
    /// Maximum character count of a string, or of each list element.
    pub max_length: Option<usize>,
}

impl FieldSchema {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            pattern: None,
            max_length: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn pattern(mut self, pattern: &'static LazyLock<Regex>) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Fields of the base entry document.
pub static ENTRY_SCHEMA: [FieldSchema; 8] = [
    FieldSchema::string("title").required(),
    FieldSchema::string("slug").required().pattern(&SLUG_PATTERN),
    FieldSchema::new("author_id", FieldKind::Reference),
    FieldSchema::new("date", FieldKind::DateTime).required(),
    FieldSchema::new("tags", FieldKind::StringList).max_length(MAX_TAG_LENGTH),
    FieldSchema::new("comments", FieldKind::EmbeddedList),
    FieldSchema::new("published", FieldKind::Boolean),
    FieldSchema::string("link_url"),
];

enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    TextList(&'a [String]),
    Present,
}

fn base_value<'a>(entry: &'a Entry, name: &str) -> FieldValue<'a> {
    match name {
        "title" => FieldValue::Text(&entry.title),
        "slug" => FieldValue::Text(&entry.slug),
        "link_url" => entry
            .link_url
            .as_deref()
            .map_or(FieldValue::Missing, FieldValue::Text),
        "author_id" => entry.author_id.map_or(FieldValue::Missing, |_| FieldValue::Present),
        "tags" => FieldValue::TextList(&entry.tags),
        _ => FieldValue::Present,
    }
}

fn extra_value<'a>(entry: &'a Entry, name: &str) -> FieldValue<'a> {
    entry.field(name).map_or(FieldValue::Missing, FieldValue::Text)
}

fn check_text(schema: &FieldSchema, value: &str, messages: &mut Vec<String>) {
    if let Some(max) = schema.max_length
        && value.chars().count() > max
    {
        messages.push(format!("must be at most {max} characters"));
    }
    if let Some(pattern) = schema.pattern
        && !pattern.is_match(value)
    {
        messages.push(format!("must match {}", pattern.as_str()));
    }
}

fn check_field(schema: &FieldSchema, value: FieldValue<'_>) -> Vec<String> {
    let mut messages = Vec::new();

    match value {
        FieldValue::Missing if schema.required => messages.push("is required".to_string()),
        FieldValue::Missing | FieldValue::Present => {}
        FieldValue::Text(text) if text.is_empty() => {
            if schema.required {
                messages.push("is required".to_string());
            }
        }
        FieldValue::Text(text) => check_text(schema, text, &mut messages),
        FieldValue::TextList(items) => {
            for (index, item) in items.iter().enumerate() {
                let mut item_messages = Vec::new();
                check_text(schema, item, &mut item_messages);
                messages.extend(
                    item_messages
                        .into_iter()
                        .map(|message| format!("item {index} {message}")),
                );
            }
        }
    }

    messages
}

/// Validates an entry against the base schema and a kind's extra fields.
///
/// # Errors
///
/// Returns [`AppError::Validation`] whose `details` map every failing field
/// name to its messages.
pub fn validate_entry(entry: &Entry, extra_fields: &[FieldSchema]) -> Result<(), AppError> {
    let mut errors: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    for schema in &ENTRY_SCHEMA {
        let messages = check_field(schema, base_value(entry, schema.name));
        if !messages.is_empty() {
            errors.insert(schema.name, messages);
        }
    }

    for schema in extra_fields {
        let messages = check_field(schema, extra_value(entry, schema.name));
        if !messages.is_empty() {
            errors.insert(schema.name, messages);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Entry validation failed",
            json!({ "fields": errors }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_entry() -> Entry {
        Entry::new("text", "Hello", "hello-world_2")
    }

    fn failing_fields(result: Result<(), AppError>) -> Vec<String> {
        match result {
            Err(AppError::Validation { details, .. }) => details["fields"]
                .as_object()
                .unwrap()
                .keys()
                .cloned()
                .collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_entry_passes() {
        assert!(validate_entry(&valid_entry(), &[]).is_ok());
    }

    #[test]
    fn test_slug_with_disallowed_characters_fails() {
        let mut entry = valid_entry();
        entry.slug = "my slug!".to_string();

        assert_eq!(failing_fields(validate_entry(&entry, &[])), vec!["slug"]);
    }

    #[test]
    fn test_slug_must_match_entirely() {
        let mut entry = valid_entry();
        entry.slug = "good-start/bad-end".to_string();

        assert!(validate_entry(&entry, &[]).is_err());
    }

    #[test]
    fn test_empty_title_and_slug_fail_together() {
        let mut entry = valid_entry();
        entry.title = String::new();
        entry.slug = String::new();

        assert_eq!(
            failing_fields(validate_entry(&entry, &[])),
            vec!["slug", "title"]
        );
    }

    #[test]
    fn test_overlong_tag_fails() {
        let mut entry = valid_entry();
        entry.tags = vec!["ok".to_string(), "x".repeat(MAX_TAG_LENGTH + 1)];

        assert_eq!(failing_fields(validate_entry(&entry, &[])), vec!["tags"]);
    }

    #[test]
    fn test_tag_at_max_length_passes() {
        let mut entry = valid_entry();
        entry.tags = vec!["x".repeat(MAX_TAG_LENGTH)];

        assert!(validate_entry(&entry, &[]).is_ok());
    }

    #[test]
    fn test_required_extra_field() {
        let extra = [FieldSchema::string("content").required()];
        let mut entry = valid_entry();

        assert_eq!(failing_fields(validate_entry(&entry, &extra)), vec!["content"]);

        entry
            .fields
            .insert("content".to_string(), "Body".to_string());
        assert!(validate_entry(&entry, &extra).is_ok());
    }

    #[test]
    fn test_optional_extra_field_may_be_absent() {
        let extra = [FieldSchema::string("description").max_length(5)];
        let mut entry = valid_entry();
        assert!(validate_entry(&entry, &extra).is_ok());

        entry
            .fields
            .insert("description".to_string(), "too long".to_string());
        assert!(validate_entry(&entry, &extra).is_err());
    }
}
