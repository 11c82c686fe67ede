//! Registry of entry kinds keyed by lower-cased type name.

use std::collections::HashMap;
use std::sync::Arc;

use super::{EntryKind, HtmlEntry, LinkEntry, TextEntry};

/// Maps type names to entry kinds.
///
/// Built once at startup and shared read-only afterwards. Registering a second
/// kind under an existing name replaces the first.
#[derive(Debug, Default, Clone)]
pub struct EntryTypeRegistry {
    types: HashMap<String, Arc<dyn EntryKind>>,
}

impl EntryTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the text, HTML and link kinds.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextEntry));
        registry.register(Arc::new(HtmlEntry));
        registry.register(Arc::new(LinkEntry));
        registry
    }

    /// Registers a kind under its lower-cased type name.
    ///
    /// Returns the kind previously registered under that name, if any.
    pub fn register(&mut self, kind: Arc<dyn EntryKind>) -> Option<Arc<dyn EntryKind>> {
        let key = kind.type_name().to_lowercase();
        tracing::debug!(entry_type = %key, "Registering entry type");

        let previous = self.types.insert(key, kind);
        if let Some(previous) = &previous {
            tracing::debug!(
                entry_type = previous.type_name(),
                "Replaced previously registered entry type"
            );
        }
        previous
    }

    /// Looks up a kind by name, ignoring case.
    pub fn get(&self, type_name: &str) -> Option<Arc<dyn EntryKind>> {
        self.types.get(&type_name.to_lowercase()).cloned()
    }

    /// Registered keys, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Entry;
    use crate::error::AppError;

    #[derive(Debug)]
    struct Fixed(&'static str, &'static str);

    impl EntryKind for Fixed {
        fn type_name(&self) -> &'static str {
            self.0
        }

        fn rendered_content(&self, _entry: &Entry) -> Result<String, AppError> {
            Ok(self.1.to_string())
        }
    }

    #[test]
    fn test_register_keys_by_lowercase_name() {
        let mut registry = EntryTypeRegistry::new();
        registry.register(Arc::new(Fixed("Quote", "q")));

        assert!(registry.get("quote").is_some());
        assert!(registry.get("QUOTE").is_some());
        assert_eq!(registry.type_names(), vec!["quote"]);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = EntryTypeRegistry::new();
        let first = registry.register(Arc::new(Fixed("Quote", "first")));
        let second = registry.register(Arc::new(Fixed("quote", "second")));

        assert!(first.is_none());
        assert!(second.is_some());
        assert_eq!(registry.len(), 1);

        let entry = Entry::new("quote", "t", "s");
        let kind = registry.get("Quote").unwrap();
        assert_eq!(kind.rendered_content(&entry).unwrap(), "second");
    }

    #[test]
    fn test_unknown_type_is_absent() {
        let registry = EntryTypeRegistry::with_builtin_kinds();
        assert!(registry.get("video").is_none());
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = EntryTypeRegistry::with_builtin_kinds();

        assert_eq!(registry.type_names(), vec!["html", "link", "text"]);
        assert!(!registry.is_empty());
    }
}
