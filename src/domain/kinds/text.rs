//! Plain-text entries rendered as escaped paragraphs.

use askama::Template;

use super::{EntryKind, render_template};
use crate::domain::entities::Entry;
use crate::domain::forms::{AdminForm, FormField};
use crate::domain::schema::FieldSchema;
use crate::error::AppError;

static TEXT_FIELDS: [FieldSchema; 1] = [FieldSchema::string("content").required()];

#[derive(Template)]
#[template(path = "entries/text.html")]
struct TextTemplate<'a> {
    paragraphs: Vec<&'a str>,
}

/// An entry whose body is plain text. Blank lines separate paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEntry;

impl EntryKind for TextEntry {
    fn type_name(&self) -> &'static str {
        "Text"
    }

    fn fields(&self) -> &'static [FieldSchema] {
        &TEXT_FIELDS
    }

    fn admin_form(&self) -> AdminForm {
        AdminForm::base().with_field(FormField::char("content"))
    }

    fn rendered_content(&self, entry: &Entry) -> Result<String, AppError> {
        let content = entry.field("content").unwrap_or_default().replace("\r\n", "\n");
        let paragraphs = content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        render_template(&TextTemplate { paragraphs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with(content: &str) -> Entry {
        let mut entry = Entry::new("text", "Title", "title");
        entry
            .fields
            .insert("content".to_string(), content.to_string());
        entry
    }

    #[test]
    fn test_renders_paragraphs() {
        let html = TextEntry
            .rendered_content(&entry_with("First\r\n\r\nSecond\n\n\n"))
            .unwrap();

        assert!(html.contains("<p>First</p>"));
        assert!(html.contains("<p>Second</p>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn test_escapes_markup() {
        let html = TextEntry
            .rendered_content(&entry_with("<script>alert(1)</script>"))
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_admin_form_adds_content() {
        let form = TextEntry.admin_form();
        assert!(form.field("content").unwrap().required);
        assert!(form.field("title").is_some());
    }
}
