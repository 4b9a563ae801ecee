//! Structured sections → flat canonical text.
//!
//! Wire format per emitted section: `"{HEADER}:\n{value}\n\n"`, in schema order. Silent-skip
//! mode omits empty sections; placeholder mode writes the placeholder text under them and may
//! append specialty catalog blocks. The result is never empty.

use crate::catalog::SpecialtyCatalog;
use crate::config::EngineConfig;
use crate::constants::{
    DIAGNOSES_CATALOG_HEADER, EMPTY_NOTE_FALLBACK, MEDICATIONS_CATALOG_HEADER, PLACEHOLDER_TEXT,
    TESTS_CATALOG_HEADER,
};
use crate::schema::{SectionKey, SectionSchema};
use crate::sections::NoteSections;
use std::collections::BTreeSet;

/// Which catalog blocks to append in placeholder mode, and where their items come from.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogAppendix<'a> {
    pub catalog: Option<&'a SpecialtyCatalog>,
    pub diagnoses: bool,
    pub tests: bool,
    pub medications: bool,
}

impl<'a> CatalogAppendix<'a> {
    /// All three blocks from `catalog`.
    pub fn all(catalog: &'a SpecialtyCatalog) -> Self {
        Self {
            catalog: Some(catalog),
            diagnoses: true,
            tests: true,
            medications: true,
        }
    }
}

/// Options for [`SectionSchema::combine`].
#[derive(Clone, Debug)]
pub struct CombineOptions<'a> {
    /// Sections to consider; `None` means every section of the schema.
    pub include: Option<BTreeSet<SectionKey>>,
    pub placeholder_mode: bool,
    pub appendix: CatalogAppendix<'a>,
    pub placeholder_text: String,
    pub fallback_text: String,
}

impl Default for CombineOptions<'_> {
    fn default() -> Self {
        Self {
            include: None,
            placeholder_mode: false,
            appendix: CatalogAppendix::default(),
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
            fallback_text: EMPTY_NOTE_FALLBACK.to_string(),
        }
    }
}

impl<'a> CombineOptions<'a> {
    /// Silent-skip options using the configured fallback text.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            placeholder_text: config.placeholder_text().as_str().to_string(),
            fallback_text: config.empty_note_fallback().as_str().to_string(),
            ..Self::default()
        }
    }

    /// Placeholder-mode options, for building a blank note template.
    pub fn template() -> Self {
        Self {
            placeholder_mode: true,
            ..Self::default()
        }
    }

    pub fn with_placeholders(mut self, placeholder_mode: bool) -> Self {
        self.placeholder_mode = placeholder_mode;
        self
    }

    pub fn with_include(mut self, keys: impl IntoIterator<Item = SectionKey>) -> Self {
        self.include = Some(keys.into_iter().collect());
        self
    }

    pub fn with_appendix(mut self, appendix: CatalogAppendix<'a>) -> Self {
        self.appendix = appendix;
        self
    }

    fn includes(&self, key: SectionKey) -> bool {
        self.include.as_ref().map_or(true, |set| set.contains(&key))
    }
}

impl SectionSchema {
    /// Render sections as canonical text.
    ///
    /// Output order is always schema order. Keys outside the schema are ignored.
    pub fn combine(&self, sections: &NoteSections, options: &CombineOptions<'_>) -> String {
        let mut out = String::new();

        for key in self.keys().filter(|k| options.includes(*k)) {
            let value = sections.get(key);
            if !value.trim().is_empty() {
                push_section(&mut out, key.header_label(), value);
            } else if options.placeholder_mode {
                push_section(&mut out, key.header_label(), &options.placeholder_text);
            }
        }

        if options.placeholder_mode {
            push_appendix(&mut out, &options.appendix);
        }

        if out.is_empty() {
            tracing::debug!("no section content; using fallback text");
            return options.fallback_text.clone();
        }
        out
    }
}

/// Render sections against the full schema.
pub fn combine_sections(sections: &NoteSections, options: &CombineOptions<'_>) -> String {
    SectionSchema::full().combine(sections, options)
}

fn push_section(out: &mut String, header: &str, value: &str) {
    out.push_str(header);
    out.push_str(":\n");
    out.push_str(value);
    out.push_str("\n\n");
}

fn push_list_block(out: &mut String, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(header);
    out.push_str(":\n");
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
    out.push('\n');
}

fn push_appendix(out: &mut String, appendix: &CatalogAppendix<'_>) {
    let Some(catalog) = appendix.catalog else {
        return;
    };

    if appendix.diagnoses {
        push_list_block(out, DIAGNOSES_CATALOG_HEADER, &catalog.common_diagnoses);
    }
    if appendix.tests {
        push_list_block(out, TESTS_CATALOG_HEADER, &catalog.common_tests);
    }
    if appendix.medications {
        push_list_block(out, MEDICATIONS_CATALOG_HEADER, &catalog.common_medications);
    }
}
