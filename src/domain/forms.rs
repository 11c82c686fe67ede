//! Admin form descriptions and the cleaning of submitted form data.
//!
//! Every entry kind exposes an [`AdminForm`] listing the fields an editor may
//! change. Kinds that add fields start from [`AdminForm::base`] and extend it.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

/// Widget and cleaning rules of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldKind {
    /// Free text, trimmed.
    Char,
    /// Checkbox.
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FormFieldKind,
    pub required: bool,
}

impl FormField {
    pub const fn char(name: &'static str) -> Self {
        Self {
            name,
            kind: FormFieldKind::Char,
            required: true,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FormFieldKind::Boolean,
            required: false,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Value produced by cleaning one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanedValue {
    Text(String),
    Flag(bool),
}

/// Cleaned form data keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedData(BTreeMap<&'static str, CleanedValue>);

impl CleanedData {
    /// Text value of a field; empty optional fields yield `None`.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(CleanedValue::Text(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Flag value of a boolean field, `false` when absent.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(CleanedValue::Flag(true)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// The editable surface of an entry kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminForm {
    pub fields: Vec<FormField>,
}

impl AdminForm {
    /// Fields every entry kind can edit: title, slug, tags and published.
    pub fn base() -> Self {
        Self {
            fields: vec![
                FormField::char("title"),
                FormField::char("slug"),
                FormField::char("tags").optional(),
                FormField::boolean("published"),
            ],
        }
    }

    /// Adds a field, replacing any existing field of the same name.
    pub fn with_field(mut self, field: FormField) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Cleans submitted data.
    ///
    /// Unknown keys are ignored. Text is trimmed; checkboxes accept `on`,
    /// `true`, `1` and `yes`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming every required field left empty.
    pub fn clean(&self, data: &HashMap<String, String>) -> Result<CleanedData, AppError> {
        let mut cleaned = BTreeMap::new();
        let mut errors = BTreeMap::new();

        for field in &self.fields {
            let raw = data.get(field.name).map(String::as_str);

            match field.kind {
                FormFieldKind::Char => {
                    let text = raw.unwrap_or_default().trim().to_string();
                    if field.required && text.is_empty() {
                        errors.insert(field.name, "This field is required.");
                        continue;
                    }
                    cleaned.insert(field.name, CleanedValue::Text(text));
                }
                FormFieldKind::Boolean => {
                    let checked = raw.is_some_and(is_checked);
                    if field.required && !checked {
                        errors.insert(field.name, "This field is required.");
                        continue;
                    }
                    cleaned.insert(field.name, CleanedValue::Flag(checked));
                }
            }
        }

        if errors.is_empty() {
            Ok(CleanedData(cleaned))
        } else {
            Err(AppError::bad_request(
                "Form validation failed",
                json!({ "fields": errors }),
            ))
        }
    }
}

fn is_checked(value: &str) -> bool {
    let value = value.trim();
    ["on", "true", "1", "yes"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_base_form_fields() {
        let form = AdminForm::base();
        let names: Vec<_> = form.fields.iter().map(|f| f.name).collect();

        assert_eq!(names, vec!["title", "slug", "tags", "published"]);
        assert!(form.field("title").unwrap().required);
        assert!(!form.field("tags").unwrap().required);
        assert_eq!(form.field("published").unwrap().kind, FormFieldKind::Boolean);
    }

    #[test]
    fn test_clean_valid_submission() {
        let cleaned = AdminForm::base()
            .clean(&data(&[
                ("title", "  Hello "),
                ("slug", "hello"),
                ("published", "on"),
                ("ignored", "x"),
            ]))
            .unwrap();

        assert_eq!(cleaned.text("title"), Some("Hello"));
        assert_eq!(cleaned.text("slug"), Some("hello"));
        assert_eq!(cleaned.text("tags"), None);
        assert!(cleaned.flag("published"));
        assert!(!cleaned.contains("ignored"));
    }

    #[test]
    fn test_clean_unchecked_box_is_false() {
        let cleaned = AdminForm::base()
            .clean(&data(&[("title", "Hello"), ("slug", "hello")]))
            .unwrap();

        assert!(!cleaned.flag("published"));
        assert!(cleaned.contains("published"));
    }

    #[test]
    fn test_clean_reports_all_missing_required_fields() {
        let err = AdminForm::base()
            .clean(&data(&[("title", "   ")]))
            .unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                let fields = details["fields"].as_object().unwrap();
                assert!(fields.contains_key("title"));
                assert!(fields.contains_key("slug"));
                assert!(!fields.contains_key("tags"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_field_extends_and_replaces() {
        let form = AdminForm::base()
            .with_field(FormField::char("content"))
            .with_field(FormField::char("tags"));

        assert_eq!(form.fields.len(), 5);
        assert!(form.field("tags").unwrap().required);
        assert!(form.field("content").is_some());
    }

    #[test]
    fn test_required_boolean_must_be_checked() {
        let form = AdminForm {
            fields: vec![FormField {
                required: true,
                ..FormField::boolean("agree")
            }],
        };

        assert!(form.clean(&data(&[("agree", "off")])).is_err());
        assert!(form.clean(&data(&[("agree", "TRUE")])).is_ok());
    }
}
