//! Shortcut and macro registries.
//!
//! A [`Registry`] is an immutable-once-built catalog of named generators. `#name` keys are
//! shortcut templates that expand to a full note block; `@name` keys are data macros that
//! expand to a short inline value. The expansion engine takes a registry by value, so tests
//! and callers can supply their own catalogs instead of the built-in one.

mod macros;
mod shortcuts;

use crate::context::PatientContext;
use crate::{NoteError, NoteResult};
use clinote_types::{TokenKey, TokenKind};
use serde::Serialize;
use std::sync::Arc;

/// A generator turning a patient context into expansion text.
pub type Generator = Arc<dyn Fn(&PatientContext) -> String + Send + Sync>;

/// One registered shortcut or macro.
#[derive(Clone)]
pub struct Entry {
    key: TokenKey,
    description: String,
    generate: Generator,
}

impl Entry {
    pub fn key(&self) -> &TokenKey {
        &self.key
    }

    pub fn kind(&self) -> TokenKind {
        self.key.kind()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn generate(&self, ctx: &PatientContext) -> String {
        (self.generate)(ctx)
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Catalog listing for autocomplete and help surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub key: String,
    pub description: String,
    pub kind: TokenKind,
}

/// Ordered shortcut and macro catalogs.
///
/// Registration order is expansion order within each kind.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    shortcuts: Vec<Entry>,
    macros: Vec<Entry>,
}

impl Registry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in shortcut and macro catalogs.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        shortcuts::register(&mut registry);
        macros::register(&mut registry);
        registry
    }

    /// Register a generator under `key`. The sigil of `key` decides whether it is a shortcut
    /// (`#`) or a macro (`@`).
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidKey` if `key` is malformed and `NoteError::DuplicateKey` if it
    /// is already registered.
    pub fn register<F>(&mut self, key: &str, description: &str, generate: F) -> NoteResult<()>
    where
        F: Fn(&PatientContext) -> String + Send + Sync + 'static,
    {
        let key = TokenKey::parse(key)?;
        if self.get(key.as_str()).is_some() {
            return Err(NoteError::DuplicateKey(key.to_string()));
        }

        let entry = Entry {
            key,
            description: description.to_string(),
            generate: Arc::new(generate),
        };
        match entry.kind() {
            TokenKind::Template => self.shortcuts.push(entry),
            TokenKind::Macro => self.macros.push(entry),
        }
        Ok(())
    }

    /// Builder-style [`Registry::register`].
    pub fn with<F>(mut self, key: &str, description: &str, generate: F) -> NoteResult<Self>
    where
        F: Fn(&PatientContext) -> String + Send + Sync + 'static,
    {
        self.register(key, description, generate)?;
        Ok(self)
    }

    /// Built-in keys are compile-time literals; a bad one is a programming error.
    fn register_builtin(
        &mut self,
        key: &'static str,
        description: &'static str,
        generate: fn(&PatientContext) -> String,
    ) {
        self.register(key, description, generate)
            .expect("built-in registry keys are valid and unique");
    }

    pub fn shortcuts(&self) -> &[Entry] {
        &self.shortcuts
    }

    pub fn macros(&self) -> &[Entry] {
        &self.macros
    }

    /// Shortcuts first, then macros: the order the engine applies them.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.shortcuts.iter().chain(self.macros.iter())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|e| e.key.as_str() == key)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len() + self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.entries()
            .map(|e| CatalogEntry {
                key: e.key.to_string(),
                description: e.description.clone(),
                kind: e.kind(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_expected_keys() {
        let registry = Registry::builtin();
        for key in [
            "#diabetes",
            "#hypertension",
            "#wellness",
            "#cold",
            "#asthma",
            "#uti",
            "#backpain",
        ] {
            let entry = registry.get(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(entry.kind(), TokenKind::Template);
        }
        for key in [
            "@bp",
            "@age",
            "@gender",
            "@meds",
            "@allergies",
            "@condition",
            "@risk",
            "@dob",
            "@phone",
            "@email",
            "@address",
            "@family",
            "@lifestyle",
        ] {
            let entry = registry.get(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(entry.kind(), TokenKind::Macro);
        }
        assert_eq!(registry.len(), 20);
    }

    #[test]
    fn register_rejects_duplicates_and_bad_keys() {
        let mut registry = Registry::empty();
        registry
            .register("@mood", "Mood", |_| "Mood: stable".into())
            .unwrap();

        let err = registry
            .register("@mood", "Again", |_| String::new())
            .unwrap_err();
        assert!(matches!(err, NoteError::DuplicateKey(k) if k == "@mood"));

        let err = registry
            .register("mood", "No sigil", |_| String::new())
            .unwrap_err();
        assert!(matches!(err, NoteError::InvalidKey(_)));
    }

    #[test]
    fn sigil_decides_catalog() {
        let registry = Registry::empty()
            .with("#sports", "Sports physical", |_| "Sports physical".into())
            .unwrap()
            .with("@height", "Height", |_| "Height: 180 cm".into())
            .unwrap();

        assert_eq!(registry.shortcuts().len(), 1);
        assert_eq!(registry.macros().len(), 1);

        let catalog = registry.catalog();
        assert_eq!(catalog[0].key, "#sports");
        assert_eq!(catalog[0].kind, TokenKind::Template);
        assert_eq!(catalog[1].key, "@height");
        assert_eq!(catalog[1].kind, TokenKind::Macro);
    }

    #[test]
    fn catalog_serializes_kind_in_snake_case() {
        let registry = Registry::empty()
            .with("@bp", "Blood pressure", |_| String::new())
            .unwrap();
        let json = serde_json::to_string(&registry.catalog()).unwrap();
        assert_eq!(
            json,
            r#"[{"key":"@bp","description":"Blood pressure","kind":"macro"}]"#
        );
    }
}
