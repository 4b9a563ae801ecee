//! Shortcut and macro expansion.
//!
//! Every shortcut in the registry is applied first, in registration order, then every macro,
//! each against the text as modified so far. Only registered keys are touched. A key is matched
//! as a plain substring, so `#cold` also matches the start of `#colder`.

use crate::config::EngineConfig;
use crate::context::PatientContext;
use crate::registry::{CatalogEntry, Registry};
use std::sync::LazyLock;

static BUILTIN: LazyLock<ExpansionEngine> =
    LazyLock::new(|| ExpansionEngine::new(Registry::builtin()));

/// Expands registered `#shortcut` and `@macro` keys in note text.
#[derive(Clone, Debug)]
pub struct ExpansionEngine {
    registry: Registry,
    first_occurrence_only: bool,
}

impl ExpansionEngine {
    /// An engine over `registry` that replaces only the first occurrence of each key.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            first_occurrence_only: true,
        }
    }

    /// An engine over `registry` using the configured occurrence mode.
    pub fn with_config(registry: Registry, config: &EngineConfig) -> Self {
        Self::new(registry).first_occurrence_only(config.first_occurrence_only())
    }

    /// The shared engine over the built-in registry with default settings.
    pub fn builtin() -> &'static ExpansionEngine {
        &BUILTIN
    }

    /// When `true` (the default) only the first occurrence of each key is expanded and any
    /// repeats are left as literal text. Stored notes depend on this behaviour.
    pub fn first_occurrence_only(mut self, first_occurrence_only: bool) -> Self {
        self.first_occurrence_only = first_occurrence_only;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Expand registered keys in `text` using `ctx`.
    ///
    /// Generators run only for keys present in the text. Unregistered look-alike tokens are
    /// left untouched. Never fails.
    pub fn expand(&self, text: &str, ctx: &PatientContext) -> String {
        let mut output = text.to_string();

        for entry in self.registry.entries() {
            let key = entry.key().as_str();
            if !output.contains(key) {
                continue;
            }

            let replacement = entry.generate(ctx);
            output = if self.first_occurrence_only {
                output.replacen(key, &replacement, 1)
            } else {
                output.replace(key, &replacement)
            };
            tracing::trace!(key, "expanded token");
        }

        output
    }

    /// True if any registered key appears anywhere in `text`.
    pub fn has_shortcuts(&self, text: &str) -> bool {
        self.registry
            .entries()
            .any(|e| text.contains(e.key().as_str()))
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.registry.catalog()
    }
}

/// Expand with the built-in registry.
pub fn expand(text: &str, ctx: &PatientContext) -> String {
    ExpansionEngine::builtin().expand(text, ctx)
}

/// Check for built-in keys without expanding.
pub fn has_shortcuts(text: &str) -> bool {
    ExpansionEngine::builtin().has_shortcuts(text)
}

/// Built-in shortcuts and macros, in expansion order.
pub fn catalog() -> Vec<CatalogEntry> {
    ExpansionEngine::builtin().catalog()
}
