//! Entry kinds and the registry that maps type names to them.
//!
//! An entry kind supplies what the base entry cannot: its rendered markup, the
//! extra document fields it stores, and the admin form used to edit it. Kinds
//! are registered explicitly at startup; nothing is discovered implicitly.

mod html;
mod link;
mod registry;
mod text;

use std::fmt;

use askama::Template;
use serde_json::json;

pub use html::HtmlEntry;
pub use link::LinkEntry;
pub use registry::EntryTypeRegistry;
pub use text::TextEntry;

use crate::domain::entities::Entry;
use crate::domain::forms::{AdminForm, CleanedData};
use crate::domain::schema::FieldSchema;
use crate::error::AppError;

/// Behaviour specific to one kind of entry.
pub trait EntryKind: Send + Sync + fmt::Debug {
    /// Name the kind is registered under. Lookups are case-insensitive.
    fn type_name(&self) -> &'static str;

    /// Extra fields this kind keeps in [`Entry::fields`].
    fn fields(&self) -> &'static [FieldSchema] {
        &[]
    }

    /// Form used to edit entries of this kind.
    fn admin_form(&self) -> AdminForm {
        AdminForm::base()
    }

    /// Copies kind-specific values from a cleaned admin form onto the entry.
    ///
    /// The default copies every field listed by [`EntryKind::fields`]; blank
    /// values remove the field.
    fn apply_form(&self, entry: &mut Entry, cleaned: &CleanedData) {
        for schema in self.fields() {
            if !cleaned.contains(schema.name) {
                continue;
            }
            match cleaned.text(schema.name) {
                Some(value) => {
                    entry
                        .fields
                        .insert(schema.name.to_string(), value.to_string());
                }
                None => {
                    entry.fields.remove(schema.name);
                }
            }
        }
    }

    /// Checks rules that the field schema cannot express.
    fn validate(&self, _entry: &Entry) -> Result<(), AppError> {
        Ok(())
    }

    /// Markup shown as the entry's content.
    fn rendered_content(&self, entry: &Entry) -> Result<String, AppError>;
}

pub(crate) fn render_template(template: &impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| {
        AppError::internal(
            "Failed to render entry",
            json!({ "reason": e.to_string() }),
        )
    })
}
