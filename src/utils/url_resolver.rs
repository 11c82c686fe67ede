//! Named-route resolver used to build canonical URLs.
//!
//! Routes are path patterns with `{placeholder}` segments. [`UrlResolver::reverse`]
//! substitutes positional arguments, so callers address pages by route name
//! rather than by hard-coded paths.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::json;

use crate::error::AppError;

/// Entry detail page, arguments `(date, slug)`.
pub const ENTRY_DETAIL: &str = "entry-detail";

/// Live entries carrying a tag, argument `(tag)`.
pub const TAG_DETAIL: &str = "tag-detail";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}/]+\}").expect("placeholder pattern is valid"));

/// Table of named routes.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    routes: HashMap<&'static str, String>,
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new()
            .route(ENTRY_DETAIL, "/{date}/{slug}/")
            .route(TAG_DETAIL, "/tag/{tag}/")
    }
}

impl UrlResolver {
    /// Creates a resolver with no routes.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Adds or replaces a named route.
    pub fn route(mut self, name: &'static str, pattern: impl Into<String>) -> Self {
        self.routes.insert(name, pattern.into());
        self
    }

    /// Builds the path of a named route from positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the route is unknown or the number of
    /// arguments differs from the number of placeholders.
    pub fn reverse(&self, name: &str, args: &[&str]) -> Result<String, AppError> {
        let pattern = self.routes.get(name).ok_or_else(|| {
            AppError::internal("Unknown route", json!({ "route": name }))
        })?;

        let expected = PLACEHOLDER.find_iter(pattern).count();
        if expected != args.len() {
            return Err(AppError::internal(
                "Wrong number of route arguments",
                json!({ "route": name, "expected": expected, "given": args.len() }),
            ));
        }

        let mut values = args.iter();
        let path = PLACEHOLDER.replace_all(pattern, |_: &Captures<'_>| {
            values.next().copied().unwrap_or_default().to_string()
        });

        Ok(path.into_owned())
    }
}
