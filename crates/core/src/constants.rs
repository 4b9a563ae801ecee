//! Constants used throughout the clinote core crate.
//!
//! Literal strings in this module are part of the persisted note format or of text that
//! previously stored notes already contain. Changing them breaks byte compatibility.

/// Text emitted under an empty section header in placeholder mode.
pub const PLACEHOLDER_TEXT: &str = "[To be documented]";

/// Returned by the serializer when no section produced any output.
pub const EMPTY_NOTE_FALLBACK: &str = "Note content not yet documented";

/// Header of the appended diagnoses catalog block (placeholder mode only).
pub const DIAGNOSES_CATALOG_HEADER: &str = "COMMON DIAGNOSES TO CONSIDER";

/// Header of the appended tests catalog block (placeholder mode only).
pub const TESTS_CATALOG_HEADER: &str = "COMMON TESTS";

/// Header of the appended medications catalog block (placeholder mode only).
pub const MEDICATIONS_CATALOG_HEADER: &str = "COMMON MEDICATIONS";

/// Environment variable naming an engine configuration YAML file.
pub const CONFIG_ENV_VAR: &str = "CLINOTE_CONFIG";

// Patient context fallbacks.

pub const BLOOD_PRESSURE_FALLBACK: &str = "Not recorded";
pub const ALLERGIES_FALLBACK: &str = "None known";
pub const CONDITION_FALLBACK: &str = "None documented";
pub const GENDER_FALLBACK: &str = "Not specified";
pub const AGE_FALLBACK: &str = "Unknown";
pub const MEDICATIONS_FALLBACK: &str = "None";
pub const FAMILY_HISTORY_FALLBACK: &str = "None reported";
pub const LIFESTYLE_FALLBACK: &str = "Not documented";
pub const CONTACT_FALLBACK: &str = "Not on file";
pub const RISK_SCORE_FALLBACK: &str = "Not calculated";
