//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the serializer and expansion engine. Nothing in the engine reads environment
//! variables while handling a note; the binary decides where the configuration comes from.

use crate::constants::{EMPTY_NOTE_FALLBACK, PLACEHOLDER_TEXT};
use crate::{NoteError, NoteResult};
use clinote_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    first_occurrence_only: bool,
    placeholder_text: NonEmptyText,
    empty_note_fallback: NonEmptyText,
}

/// On-disk YAML shape. Every key is optional and falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineConfigWire {
    #[serde(default)]
    first_occurrence_only: Option<bool>,
    #[serde(default)]
    placeholder_text: Option<NonEmptyText>,
    #[serde(default)]
    empty_note_fallback: Option<NonEmptyText>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_occurrence_only: true,
            placeholder_text: NonEmptyText::new(PLACEHOLDER_TEXT)
                .expect("placeholder constant is non-empty"),
            empty_note_fallback: NonEmptyText::new(EMPTY_NOTE_FALLBACK)
                .expect("fallback constant is non-empty"),
        }
    }
}

impl EngineConfig {
    /// Create a new `EngineConfig`.
    pub fn new(
        first_occurrence_only: bool,
        placeholder_text: NonEmptyText,
        empty_note_fallback: NonEmptyText,
    ) -> Self {
        Self {
            first_occurrence_only,
            placeholder_text,
            empty_note_fallback,
        }
    }

    /// Only the first occurrence of each registered key is expanded when `true`.
    pub fn first_occurrence_only(&self) -> bool {
        self.first_occurrence_only
    }

    pub fn placeholder_text(&self) -> &NonEmptyText {
        &self.placeholder_text
    }

    pub fn empty_note_fallback(&self) -> &NonEmptyText {
        &self.empty_note_fallback
    }

    /// Parse configuration from YAML text.
    ///
    /// This uses `serde_path_to_error` so a bad value is reported with its key, e.g.
    /// `placeholder_text`. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidConfig` for unknown keys, wrong types or blank text values.
    pub fn from_yaml_str(yaml_text: &str) -> NoteResult<Self> {
        if yaml_text.trim().is_empty() {
            return Ok(Self::default());
        }

        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, EngineConfigWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(NoteError::InvalidConfig(format!(
                    "configuration schema mismatch at {path}: {source}"
                )));
            }
        };

        let defaults = Self::default();
        Ok(Self {
            first_occurrence_only: wire
                .first_occurrence_only
                .unwrap_or(defaults.first_occurrence_only),
            placeholder_text: wire.placeholder_text.unwrap_or(defaults.placeholder_text),
            empty_note_fallback: wire
                .empty_note_fallback
                .unwrap_or(defaults.empty_note_fallback),
        })
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::ConfigRead` if the file cannot be read, or any error from
    /// [`EngineConfig::from_yaml_str`].
    pub fn load(path: &Path) -> NoteResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(NoteError::ConfigRead)?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!("loaded engine configuration from {}", path.display());
        Ok(config)
    }
}

/// Resolve the configuration file path without reading environment variables.
///
/// An explicit `override_path` wins over `env_value`; blank values are ignored. Returns
/// `None` when neither names a file, meaning the defaults apply.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    override_path
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| {
            env_value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_wire_format_literals() {
        let config = EngineConfig::default();
        assert!(config.first_occurrence_only());
        assert_eq!(config.placeholder_text().as_str(), "[To be documented]");
        assert_eq!(
            config.empty_note_fallback().as_str(),
            "Note content not yet documented"
        );
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(
            EngineConfig::from_yaml_str("  \n").unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn partial_yaml_overrides_only_given_keys() {
        let config = EngineConfig::from_yaml_str("first_occurrence_only: false\n").unwrap();
        assert!(!config.first_occurrence_only());
        assert_eq!(config.placeholder_text().as_str(), "[To be documented]");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = EngineConfig::from_yaml_str("expand_everything: true\n").unwrap_err();
        match err {
            NoteError::InvalidConfig(msg) => assert!(msg.contains("expand_everything")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_placeholder() {
        let err = EngineConfig::from_yaml_str("placeholder_text: '   '\n").unwrap_err();
        match err {
            NoteError::InvalidConfig(msg) => assert!(msg.contains("placeholder_text")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "placeholder_text: \"[Pending]\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.placeholder_text().as_str(), "[Pending]");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, NoteError::ConfigRead(_)));
    }

    #[test]
    fn resolve_prefers_override() {
        let resolved = resolve_config_path(
            Some(PathBuf::from("cli.yaml")),
            Some("env.yaml".to_string()),
        );
        assert_eq!(resolved, Some(PathBuf::from("cli.yaml")));

        let resolved = resolve_config_path(None, Some(" env.yaml ".to_string()));
        assert_eq!(resolved, Some(PathBuf::from("env.yaml")));

        assert_eq!(resolve_config_path(None, Some("  ".to_string())), None);
    }
}
