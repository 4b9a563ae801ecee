use crate::schema::SectionKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-text content of a note, keyed by section.
///
/// Absent keys and empty strings are equivalent: both read back as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteSections(BTreeMap<SectionKey, String>);

impl NoteSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// The section's text, or `""` when absent.
    pub fn get(&self, key: SectionKey) -> &str {
        self.0.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: SectionKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Builder-style [`NoteSections::set`].
    pub fn with(mut self, key: SectionKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// True when the section's trimmed text is non-empty.
    pub fn has_content(&self, key: SectionKey) -> bool {
        !self.get(key).trim().is_empty()
    }

    /// Keys with non-empty trimmed content, in canonical order.
    pub fn filled_keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.0
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(SectionKey, String)> for NoteSections {
    fn from_iter<I: IntoIterator<Item = (SectionKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
