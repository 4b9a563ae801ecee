//! # clinote core
//!
//! Content engine for clinical notes.
//!
//! This crate converts between per-section note data and the canonical flat-text document,
//! and expands `#shortcut` / `@macro` tokens from a patient context:
//! - [`parse_sections`]: canonical text → [`NoteSections`]
//! - [`combine_sections`]: [`NoteSections`] → canonical text
//! - [`expand`] / [`has_shortcuts`] / [`catalog()`]: token expansion over the built-in [`Registry`]
//! - [`to_patient_context`]: [`clinote_record::PatientRecord`] → [`PatientContext`]
//!
//! Every operation here is a pure function of its inputs.
//!
//! **No I/O concerns**: Storage, HTTP, rendering and UI belong to the caller. Persistence is
//! reached only through the [`NoteSink`] trait.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod expansion;
pub mod note;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod sections;
pub mod serializer;

pub use catalog::SpecialtyCatalog;
pub use config::EngineConfig;
pub use context::{to_patient_context, to_patient_context_as_of, PatientContext};
pub use error::{NoteError, NoteResult};
pub use expansion::{catalog, expand, has_shortcuts, ExpansionEngine};
pub use note::{
    submit, NoteDraft, NoteSink, NoteSubmission, NoteType, SinkError, SubmissionOutcome,
};
pub use parser::parse_sections;
pub use registry::{CatalogEntry, Registry};
pub use schema::{SchemaVariant, SectionDescriptor, SectionKey, SectionSchema};
pub use sections::NoteSections;
pub use serializer::{combine_sections, CatalogAppendix, CombineOptions};

pub use clinote_types::{NonEmptyText, TokenKey, TokenKind};
