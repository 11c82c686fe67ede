//! Entries that point at an external page.

use askama::Template;
use serde_json::json;
use url::Url;

use super::{EntryKind, render_template};
use crate::domain::entities::Entry;
use crate::domain::forms::{AdminForm, CleanedData, FormField};
use crate::domain::schema::FieldSchema;
use crate::error::AppError;

static LINK_FIELDS: [FieldSchema; 1] = [FieldSchema::string("description")];

#[derive(Template)]
#[template(path = "entries/link.html")]
struct LinkTemplate<'a> {
    url: &'a str,
    title: &'a str,
    description: Option<&'a str>,
}

/// A link entry. `link_url` is required and the entry title links to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkEntry;

impl EntryKind for LinkEntry {
    fn type_name(&self) -> &'static str {
        "Link"
    }

    fn fields(&self) -> &'static [FieldSchema] {
        &LINK_FIELDS
    }

    fn admin_form(&self) -> AdminForm {
        AdminForm::base()
            .with_field(FormField::char("link_url"))
            .with_field(FormField::char("description").optional())
    }

    fn apply_form(&self, entry: &mut Entry, cleaned: &CleanedData) {
        entry.link_url = cleaned.text("link_url").map(str::to_string);
        if let Some(description) = cleaned.text("description") {
            entry
                .fields
                .insert("description".to_string(), description.to_string());
        } else {
            entry.fields.remove("description");
        }
    }

    fn validate(&self, entry: &Entry) -> Result<(), AppError> {
        let Some(link_url) = entry.link_url.as_deref() else {
            return Err(AppError::bad_request(
                "Link entries require a link_url",
                json!({ "fields": { "link_url": ["is required"] } }),
            ));
        };

        let valid = Url::parse(link_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);

        if valid {
            Ok(())
        } else {
            Err(AppError::bad_request(
                "Invalid link URL",
                json!({ "fields": { "link_url": ["must be an http or https URL"] } }),
            ))
        }
    }

    fn rendered_content(&self, entry: &Entry) -> Result<String, AppError> {
        render_template(&LinkTemplate {
            url: entry.link_url.as_deref().unwrap_or_default(),
            title: &entry.title,
            description: entry.field("description"),
        })
    }
}
