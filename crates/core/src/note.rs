//! Note drafts and hand-off to an external persistence sink.
//!
//! The engine does not store notes. [`NoteDraft::finalise`] turns edited sections into the
//! `{ id, title, content, date, type }` payload, and [`submit`] passes it to a caller-supplied
//! [`NoteSink`]. A sink failure is reported as [`SubmissionOutcome::RetainedLocally`] so the
//! caller can keep the note locally; it is never an engine error.

use crate::config::EngineConfig;
use crate::context::PatientContext;
use crate::expansion::ExpansionEngine;
use crate::schema::SchemaVariant;
use crate::sections::NoteSections;
use crate::serializer::CombineOptions;
use chrono::{DateTime, Utc};
use clinote_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of clinical note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    #[default]
    Soap,
    /// Lighter five-section note.
    Progress,
    Consultation,
    Procedure,
    Discharge,
    Wellness,
}

impl NoteType {
    /// Section schema used for notes of this type.
    pub fn schema_variant(self) -> SchemaVariant {
        match self {
            NoteType::Progress => SchemaVariant::Simplified,
            _ => SchemaVariant::Full,
        }
    }

    /// Title used when a draft has none.
    pub fn default_title(self) -> &'static str {
        match self {
            NoteType::Soap => "SOAP Note",
            NoteType::Progress => "Progress Note",
            NoteType::Consultation => "Consultation Note",
            NoteType::Procedure => "Procedure Note",
            NoteType::Discharge => "Discharge Summary",
            NoteType::Wellness => "Wellness Visit",
        }
    }
}

impl std::str::FromStr for NoteType {
    type Err = crate::NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soap" => Ok(NoteType::Soap),
            "progress" => Ok(NoteType::Progress),
            "consultation" => Ok(NoteType::Consultation),
            "procedure" => Ok(NoteType::Procedure),
            "discharge" => Ok(NoteType::Discharge),
            "wellness" => Ok(NoteType::Wellness),
            other => Err(crate::NoteError::InvalidInput(format!(
                "unknown note type: {other}"
            ))),
        }
    }
}

/// Payload handed to the persistence sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSubmission {
    pub id: Uuid,
    pub title: NonEmptyText,
    /// Canonical text exactly as combined and expanded; never blank.
    pub content: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub note_type: NoteType,
}

/// A note being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub note_type: NoteType,
    pub sections: NoteSections,
}

impl NoteDraft {
    pub fn new(note_type: NoteType) -> Self {
        Self {
            note_type,
            ..Self::default()
        }
    }

    /// Reopen a stored note for editing by parsing its canonical text.
    pub fn reopen(title: impl Into<String>, note_type: NoteType, content: &str) -> Self {
        Self {
            title: title.into(),
            note_type,
            sections: note_type.schema_variant().schema().parse(content),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sections(mut self, sections: NoteSections) -> Self {
        self.sections = sections;
        self
    }

    /// Combine (silent-skip) and expand the draft into a submission.
    ///
    /// A blank title falls back to the note type's default title. Content is never empty: if
    /// expansion leaves nothing, the configured fallback text is used.
    pub fn finalise(
        &self,
        engine: &ExpansionEngine,
        config: &EngineConfig,
        ctx: &PatientContext,
        date: DateTime<Utc>,
    ) -> NoteSubmission {
        let schema = self.note_type.schema_variant().schema();
        let combined = schema.combine(&self.sections, &CombineOptions::from_config(config));
        let expanded = engine.expand(&combined, ctx);

        let title = NonEmptyText::new(&self.title).unwrap_or_else(|_| {
            NonEmptyText::new(self.note_type.default_title())
                .expect("default titles are non-empty")
        });
        let content = if expanded.trim().is_empty() {
            config.empty_note_fallback().as_str().to_string()
        } else {
            expanded
        };

        NoteSubmission {
            id: Uuid::new_v4(),
            title,
            content,
            date,
            note_type: self.note_type,
        }
    }
}

/// Errors a persistence sink may report.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("persistence sink unavailable: {0}")]
    Unavailable(String),
    #[error("persistence sink rejected note: {0}")]
    Rejected(String),
}

/// External store for finalised notes.
pub trait NoteSink {
    fn persist(&self, note: &NoteSubmission) -> Result<(), SinkError>;
}

/// Result of handing a note to the sink.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Persisted(NoteSubmission),
    /// The sink failed; the caller keeps the note locally.
    RetainedLocally {
        note: NoteSubmission,
        reason: SinkError,
    },
}

impl SubmissionOutcome {
    pub fn note(&self) -> &NoteSubmission {
        match self {
            SubmissionOutcome::Persisted(note) => note,
            SubmissionOutcome::RetainedLocally { note, .. } => note,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, SubmissionOutcome::Persisted(_))
    }
}

/// Pass `note` to `sink` once. No retry.
pub fn submit(sink: &dyn NoteSink, note: NoteSubmission) -> SubmissionOutcome {
    match sink.persist(&note) {
        Ok(()) => {
            tracing::debug!(id = %note.id, "note persisted");
            SubmissionOutcome::Persisted(note)
        }
        Err(reason) => {
            tracing::warn!(id = %note.id, "note not persisted, retaining locally: {}", reason);
            SubmissionOutcome::RetainedLocally { note, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SectionKey;
    use std::cell::RefCell;

    struct RecordingSink {
        fail: bool,
        seen: RefCell<Vec<Uuid>>,
    }

    impl NoteSink for RecordingSink {
        fn persist(&self, note: &NoteSubmission) -> Result<(), SinkError> {
            self.seen.borrow_mut().push(note.id);
            if self.fail {
                Err(SinkError::Unavailable("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    fn date() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-15T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn finalise_combines_and_expands() {
        let draft = NoteDraft::new(NoteType::Soap)
            .with_title("Clinic visit")
            .with_sections(
                NoteSections::new()
                    .with(SectionKey::VitalSigns, "@bp")
                    .with(SectionKey::Plan, "Review"),
            );

        let note = draft.finalise(
            ExpansionEngine::builtin(),
            &EngineConfig::default(),
            &PatientContext::default(),
            date(),
        );

        assert_eq!(note.title.as_str(), "Clinic visit");
        assert_eq!(
            note.content,
            "VITAL SIGNS:\nBlood pressure: Not recorded\n\nPLAN:\nReview\n\n"
        );
        assert_eq!(note.note_type, NoteType::Soap);
        assert_eq!(note.date, date());
    }

    #[test]
    fn finalise_empty_draft_uses_fallbacks() {
        let note = NoteDraft::new(NoteType::Progress).finalise(
            ExpansionEngine::builtin(),
            &EngineConfig::default(),
            &PatientContext::default(),
            date(),
        );

        assert_eq!(note.title.as_str(), "Progress Note");
        assert_eq!(note.content, "Note content not yet documented");
    }

    #[test]
    fn progress_notes_use_simplified_schema() {
        let draft = NoteDraft::new(NoteType::Progress).with_sections(
            NoteSections::new()
                .with(SectionKey::VitalSigns, "BP fine")
                .with(SectionKey::Assessment, "Stable"),
        );
        let note = draft.finalise(
            ExpansionEngine::builtin(),
            &EngineConfig::default(),
            &PatientContext::default(),
            date(),
        );
        assert_eq!(note.content, "ASSESSMENT:\nStable\n\n");
    }

    #[test]
    fn reopen_parses_stored_content() {
        let draft = NoteDraft::reopen(
            "Old note",
            NoteType::Progress,
            "CHIEF COMPLAINT:\nCough\n\nPLAN:\nFluids\n\n",
        );
        assert_eq!(draft.sections.get(SectionKey::ChiefComplaint), "Cough");
        assert_eq!(draft.sections.get(SectionKey::Plan), "Fluids");
    }

    #[test]
    fn submit_reports_persisted() {
        let sink = RecordingSink {
            fail: false,
            seen: RefCell::new(Vec::new()),
        };
        let note = NoteDraft::new(NoteType::Soap).finalise(
            ExpansionEngine::builtin(),
            &EngineConfig::default(),
            &PatientContext::default(),
            date(),
        );
        let id = note.id;

        let outcome = submit(&sink, note);
        assert!(outcome.is_persisted());
        assert_eq!(*sink.seen.borrow(), vec![id]);
    }

    #[test]
    fn submit_failure_retains_locally() {
        let sink = RecordingSink {
            fail: true,
            seen: RefCell::new(Vec::new()),
        };
        let note = NoteDraft::new(NoteType::Soap).finalise(
            ExpansionEngine::builtin(),
            &EngineConfig::default(),
            &PatientContext::default(),
            date(),
        );

        let outcome = submit(&sink, note.clone());
        match outcome {
            SubmissionOutcome::RetainedLocally { note: kept, reason } => {
                assert_eq!(kept, note);
                assert!(matches!(reason, SinkError::Unavailable(_)));
            }
            other => panic!("expected RetainedLocally, got {other:?}"),
        }
        assert_eq!(sink.seen.borrow().len(), 1);
    }

    #[test]
    fn submission_serializes_type_field() {
        let note = NoteSubmission {
            id: Uuid::nil(),
            title: NonEmptyText::new("T").unwrap(),
            content: "C".into(),
            date: date(),
            note_type: NoteType::Discharge,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["type"], "discharge");
        assert_eq!(json["title"], "T");
    }

    #[test]
    fn note_type_from_str() {
        assert_eq!("Progress".parse::<NoteType>().unwrap(), NoteType::Progress);
        assert!("memo".parse::<NoteType>().is_err());
    }
}
