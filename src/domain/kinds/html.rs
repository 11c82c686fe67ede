//! Entries authored directly in HTML.

use super::EntryKind;
use crate::domain::entities::Entry;
use crate::domain::forms::{AdminForm, FormField};
use crate::domain::schema::FieldSchema;
use crate::error::AppError;

static HTML_FIELDS: [FieldSchema; 1] = [FieldSchema::string("content").required()];

/// An entry whose body is trusted markup, rendered as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEntry;

impl EntryKind for HtmlEntry {
    fn type_name(&self) -> &'static str {
        "HTML"
    }

    fn fields(&self) -> &'static [FieldSchema] {
        &HTML_FIELDS
    }

    fn admin_form(&self) -> AdminForm {
        AdminForm::base().with_field(FormField::char("content"))
    }

    fn rendered_content(&self, entry: &Entry) -> Result<String, AppError> {
        Ok(entry.field("content").unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_raw_markup() {
        let mut entry = Entry::new("html", "Title", "title");
        entry
            .fields
            .insert("content".to_string(), "<em>raw</em>".to_string());

        assert_eq!(HtmlEntry.rendered_content(&entry).unwrap(), "<em>raw</em>");
    }
}
