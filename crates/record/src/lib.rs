//! Patient record wire/boundary support.
//!
//! This crate provides the **wire model** and **translation helpers** for the patient record
//! snapshot that the note engine reads from its caller:
//! - YAML or JSON documents (camelCase keys, as produced by the charting front end)
//!
//! This crate focuses on:
//! - strict serialisation/deserialisation with path-aware schema errors
//! - translation between the wire structs and the domain-level [`PatientRecord`]
//!
//! Clinical projection of a record into note-expansion fields lives in `clinote-core`.

pub mod patient;

pub use patient::{Lifestyle, Medication, MedicationStatus, PatientFile, PatientRecord, Vitals};

/// Errors returned by the `clinote-record` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`RecordError`].
pub type RecordResult<T> = Result<T, RecordError>;
