//! Section schema: the ordered catalog of note sections.
//!
//! The canonical order is the declaration order of [`SectionKey`]. A [`SectionSchema`] is an
//! ordered subset of those keys together with the matchers the parser needs. Each section's
//! terminator set is derived from the schema itself: every section after it, plus end of text.
//! Adding a key to the enum is enough to extend both the parser and the serializer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// One of the fixed note section keys, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    ChiefComplaint,
    Hpi,
    ReviewOfSystems,
    VitalSigns,
    PhysicalExam,
    SocialHistory,
    FamilyHistory,
    MedicationReconciliation,
    DiagnosisCodes,
    Assessment,
    Plan,
    PatientInstructions,
    FollowUp,
}

impl SectionKey {
    /// Every key, in canonical order.
    pub const ALL: [SectionKey; 13] = [
        SectionKey::ChiefComplaint,
        SectionKey::Hpi,
        SectionKey::ReviewOfSystems,
        SectionKey::VitalSigns,
        SectionKey::PhysicalExam,
        SectionKey::SocialHistory,
        SectionKey::FamilyHistory,
        SectionKey::MedicationReconciliation,
        SectionKey::DiagnosisCodes,
        SectionKey::Assessment,
        SectionKey::Plan,
        SectionKey::PatientInstructions,
        SectionKey::FollowUp,
    ];

    /// Keys of the lighter five-section note.
    pub const SIMPLIFIED: [SectionKey; 5] = [
        SectionKey::ChiefComplaint,
        SectionKey::Hpi,
        SectionKey::PhysicalExam,
        SectionKey::Assessment,
        SectionKey::Plan,
    ];

    /// Header label as written in the canonical document, without the trailing colon.
    pub fn header_label(self) -> &'static str {
        match self {
            SectionKey::ChiefComplaint => "CHIEF COMPLAINT",
            SectionKey::Hpi => "HISTORY OF PRESENT ILLNESS",
            SectionKey::ReviewOfSystems => "REVIEW OF SYSTEMS",
            SectionKey::VitalSigns => "VITAL SIGNS",
            SectionKey::PhysicalExam => "PHYSICAL EXAMINATION",
            SectionKey::SocialHistory => "SOCIAL HISTORY",
            SectionKey::FamilyHistory => "FAMILY HISTORY",
            SectionKey::MedicationReconciliation => "MEDICATION RECONCILIATION",
            SectionKey::DiagnosisCodes => "DIAGNOSIS CODES",
            SectionKey::Assessment => "ASSESSMENT",
            SectionKey::Plan => "PLAN",
            SectionKey::PatientInstructions => "PATIENT INSTRUCTIONS",
            SectionKey::FollowUp => "FOLLOW-UP",
        }
    }

    /// Position in the canonical order, starting at zero.
    pub fn order(self) -> usize {
        self as usize
    }

    /// The camelCase key used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::ChiefComplaint => "chiefComplaint",
            SectionKey::Hpi => "hpi",
            SectionKey::ReviewOfSystems => "reviewOfSystems",
            SectionKey::VitalSigns => "vitalSigns",
            SectionKey::PhysicalExam => "physicalExam",
            SectionKey::SocialHistory => "socialHistory",
            SectionKey::FamilyHistory => "familyHistory",
            SectionKey::MedicationReconciliation => "medicationReconciliation",
            SectionKey::DiagnosisCodes => "diagnosisCodes",
            SectionKey::Assessment => "assessment",
            SectionKey::Plan => "plan",
            SectionKey::PatientInstructions => "patientInstructions",
            SectionKey::FollowUp => "followUp",
        }
    }

    pub fn descriptor(self) -> SectionDescriptor {
        SectionDescriptor {
            key: self,
            header_label: self.header_label(),
            order: self.order(),
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = crate::NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::NoteError::InvalidInput(format!("unknown section key: {s}")))
    }
}

/// Static description of one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    pub key: SectionKey,
    pub header_label: &'static str,
    pub order: usize,
}

/// Compiled patterns for one section of a schema.
#[derive(Debug)]
pub(crate) struct SectionMatcher {
    pub key: SectionKey,
    /// `HEADER:` followed by any whitespace, case-insensitive.
    pub header: Regex,
    /// Any later section's `HEADER:`; `None` for the last section, which runs to end of text.
    pub terminator: Option<Regex>,
}

/// An ordered set of note sections with the parser's matchers derived from it.
#[derive(Debug)]
pub struct SectionSchema {
    descriptors: Vec<SectionDescriptor>,
    matchers: Vec<SectionMatcher>,
}

static FULL: LazyLock<SectionSchema> = LazyLock::new(|| SectionSchema::new(SectionKey::ALL));

static SIMPLIFIED: LazyLock<SectionSchema> =
    LazyLock::new(|| SectionSchema::new(SectionKey::SIMPLIFIED));

impl SectionSchema {
    /// Build a schema over the given keys. Keys are deduplicated and put in canonical order,
    /// so the caller's ordering never affects output.
    pub fn new(keys: impl IntoIterator<Item = SectionKey>) -> Self {
        let keys: Vec<SectionKey> = keys
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let matchers = keys
            .iter()
            .enumerate()
            .map(|(i, key)| SectionMatcher {
                key: *key,
                header: header_pattern(*key),
                terminator: terminator_pattern(&keys[i + 1..]),
            })
            .collect();

        Self {
            descriptors: keys.iter().map(|k| k.descriptor()).collect(),
            matchers,
        }
    }

    /// The 13-section schema.
    pub fn full() -> &'static SectionSchema {
        &FULL
    }

    /// The 5-section schema used by the lighter note type.
    pub fn simplified() -> &'static SectionSchema {
        &SIMPLIFIED
    }

    pub fn descriptors(&self) -> &[SectionDescriptor] {
        &self.descriptors
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.descriptors.iter().map(|d| d.key)
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.descriptors.iter().any(|d| d.key == key)
    }

    pub(crate) fn matchers(&self) -> &[SectionMatcher] {
        &self.matchers
    }
}

/// Which built-in schema a note uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    #[default]
    Full,
    Simplified,
}

impl SchemaVariant {
    pub fn schema(self) -> &'static SectionSchema {
        match self {
            SchemaVariant::Full => SectionSchema::full(),
            SchemaVariant::Simplified => SectionSchema::simplified(),
        }
    }
}

fn header_pattern(key: SectionKey) -> Regex {
    let pattern = format!(r"(?i){}:\s*", regex::escape(key.header_label()));
    Regex::new(&pattern).expect("escaped header label is a valid pattern")
}

fn terminator_pattern(later: &[SectionKey]) -> Option<Regex> {
    if later.is_empty() {
        return None;
    }

    let alternatives = later
        .iter()
        .map(|k| format!("{}:", regex::escape(k.header_label())))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("(?i){alternatives}");
    Some(Regex::new(&pattern).expect("escaped header labels are a valid pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_schema_is_canonical_order() {
        let orders: Vec<usize> = SectionSchema::full()
            .descriptors()
            .iter()
            .map(|d| d.order)
            .collect();
        assert_eq!(orders, (0..13).collect::<Vec<_>>());
        assert_eq!(SectionSchema::full().descriptors()[12].header_label, "FOLLOW-UP");
    }

    #[test]
    fn new_schema_ignores_input_order_and_duplicates() {
        let schema = SectionSchema::new([
            SectionKey::Plan,
            SectionKey::ChiefComplaint,
            SectionKey::Plan,
            SectionKey::Assessment,
        ]);
        let keys: Vec<SectionKey> = schema.keys().collect();
        assert_eq!(
            keys,
            vec![SectionKey::ChiefComplaint, SectionKey::Assessment, SectionKey::Plan]
        );
    }

    #[test]
    fn terminators_cover_every_later_section() {
        let schema = SectionSchema::full();
        let first = &schema.matchers()[0];
        let terminator = first.terminator.as_ref().unwrap();
        for key in &SectionKey::ALL[1..] {
            let probe = format!("{}:", key.header_label().to_lowercase());
            assert!(terminator.is_match(&probe), "missing terminator for {key}");
        }
        assert!(!terminator.is_match("CHIEF COMPLAINT:"));
        assert!(schema.matchers()[12].terminator.is_none());
    }

    #[test]
    fn simplified_terminators_only_use_subset() {
        let schema = SectionSchema::simplified();
        let hpi = &schema.matchers()[1];
        let terminator = hpi.terminator.as_ref().unwrap();
        assert!(terminator.is_match("PHYSICAL EXAMINATION:"));
        assert!(!terminator.is_match("VITAL SIGNS:"));
    }

    #[test]
    fn key_round_trips_through_str() {
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>().unwrap(), key);
            assert_eq!(
                serde_json::to_string(&key).unwrap(),
                format!("\"{}\"", key.as_str())
            );
        }
        assert!("diagnosis".parse::<SectionKey>().is_err());
    }
}
