//! Patient record wire models and translation helpers.
//!
//! Responsibilities:
//! - Define the public domain-level [`PatientRecord`] consumed by the note engine
//! - Define a strict wire model for YAML/JSON serialisation
//! - Translate between the two, validating dates and medication names
//!
//! Notes:
//! - Records are snapshots supplied by the caller; nothing here writes them back anywhere

use crate::{RecordError, RecordResult};
use chrono::NaiveDate;
use clinote_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// Date format used for `dateOfBirth` on the wire.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Prescribing status of a medication entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MedicationStatus {
    Active,
    Discontinued,
    OnHold,
    Completed,
    /// Any status string the front end sends that is not one of the above.
    Other(String),
}

impl MedicationStatus {
    /// Convert to wire format string.
    fn to_wire(&self) -> &str {
        match self {
            MedicationStatus::Active => "Active",
            MedicationStatus::Discontinued => "Discontinued",
            MedicationStatus::OnHold => "On Hold",
            MedicationStatus::Completed => "Completed",
            MedicationStatus::Other(s) => s.as_str(),
        }
    }

    /// Parse from wire format string. Matching is exact: `"active"` is not `Active`.
    fn from_wire(s: &str) -> Self {
        match s {
            "Active" => MedicationStatus::Active,
            "Discontinued" => MedicationStatus::Discontinued,
            "On Hold" => MedicationStatus::OnHold,
            "Completed" => MedicationStatus::Completed,
            other => MedicationStatus::Other(other.to_string()),
        }
    }
}

/// One medication on the patient's list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Medication {
    pub name: NonEmptyText,
    pub status: MedicationStatus,
    pub dosage: Option<String>,
}

impl Medication {
    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// Most recent vital sign readings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vitals {
    /// Systolic blood pressure in mmHg.
    pub systolic: Option<u16>,
    /// Diastolic blood pressure in mmHg.
    pub diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
}

/// Lifestyle and social-determinant fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lifestyle {
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub exercise: Option<String>,
    pub diet: Option<String>,
    pub occupation: Option<String>,
    pub housing: Option<String>,
}

/// Domain-level carrier for a patient snapshot (flat structure).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientRecord {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Age in whole years, when the front end has already computed it.
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub vitals: Option<Vitals>,
    pub medications: Vec<Medication>,
    pub allergies: Vec<String>,
    /// Free-text primary condition.
    pub condition: Option<String>,
    pub family_history: Vec<String>,
    pub lifestyle: Lifestyle,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub risk_score: Option<f64>,
}

// ============================================================================
// Public PatientFile operations
// ============================================================================

/// Patient record file operations.
///
/// This is a zero-sized type used for namespacing record parsing and rendering.
/// All methods are associated functions.
pub struct PatientFile;

impl PatientFile {
    /// Parse a patient record from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `medications[0].name`)
    /// to the failing field when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if:
    /// - the YAML does not represent a patient record mapping,
    /// - any field has an unexpected type,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - `dateOfBirth` is not a `YYYY-MM-DD` date, or a medication name is blank.
    pub fn parse_yaml(yaml_text: &str) -> RecordResult<PatientRecord> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = deserialize_wire(deserializer)?;
        wire_to_domain(wire)
    }

    /// Parse a patient record from JSON text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PatientFile::parse_yaml`], plus trailing characters after the
    /// JSON document.
    pub fn parse_json(json_text: &str) -> RecordResult<PatientRecord> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let wire = deserialize_wire(&mut deserializer)?;
        deserializer.end()?;
        wire_to_domain(wire)
    }

    /// Render a patient record as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Translation`] if serialisation fails.
    pub fn render_yaml(record: &PatientRecord) -> RecordResult<String> {
        let wire = domain_to_wire(record);
        serde_yaml::to_string(&wire)
            .map_err(|e| RecordError::Translation(format!("Failed to serialise patient: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PatientWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<VitalsWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<MedicationWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_history: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<LifestyleWire>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct VitalsWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct MedicationWire {
    pub name: String,

    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct LifestyleWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn deserialize_wire<'de, D>(deserializer: D) -> RecordResult<PatientWire>
where
    D: serde::Deserializer<'de>,
{
    serde_path_to_error::deserialize::<_, PatientWire>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        RecordError::Translation(format!("Patient record schema mismatch at {path}: {source}"))
    })
}

fn wire_to_domain(wire: PatientWire) -> RecordResult<PatientRecord> {
    let date_of_birth = wire
        .date_of_birth
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
                RecordError::Translation(format!("Invalid dateOfBirth '{s}': {e}"))
            })
        })
        .transpose()?;

    let medications = wire
        .medications
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let name = NonEmptyText::new(&m.name).map_err(|_| {
                RecordError::InvalidInput(format!("medications[{i}].name must not be blank"))
            })?;
            Ok(Medication {
                name,
                status: MedicationStatus::from_wire(m.status.trim()),
                dosage: m.dosage,
            })
        })
        .collect::<RecordResult<Vec<_>>>()?;

    let vitals = wire.vitals.map(|v| Vitals {
        systolic: v.systolic,
        diastolic: v.diastolic,
        heart_rate: v.heart_rate,
    });

    let lifestyle = wire
        .lifestyle
        .map(|l| Lifestyle {
            smoking: l.smoking,
            alcohol: l.alcohol,
            exercise: l.exercise,
            diet: l.diet,
            occupation: l.occupation,
            housing: l.housing,
        })
        .unwrap_or_default();

    Ok(PatientRecord {
        id: wire.id,
        first_name: wire.first_name,
        last_name: wire.last_name,
        date_of_birth,
        age: wire.age,
        gender: wire.gender,
        vitals,
        medications,
        allergies: wire.allergies,
        condition: wire.condition,
        family_history: wire.family_history,
        lifestyle,
        phone: wire.phone,
        email: wire.email,
        address: wire.address,
        risk_score: wire.risk_score,
    })
}

fn domain_to_wire(record: &PatientRecord) -> PatientWire {
    let lifestyle = &record.lifestyle;
    let lifestyle = if *lifestyle == Lifestyle::default() {
        None
    } else {
        Some(LifestyleWire {
            smoking: lifestyle.smoking.clone(),
            alcohol: lifestyle.alcohol.clone(),
            exercise: lifestyle.exercise.clone(),
            diet: lifestyle.diet.clone(),
            occupation: lifestyle.occupation.clone(),
            housing: lifestyle.housing.clone(),
        })
    };

    PatientWire {
        id: record.id.clone(),
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        date_of_birth: record
            .date_of_birth
            .map(|d| d.format(DATE_FORMAT).to_string()),
        age: record.age,
        gender: record.gender.clone(),
        vitals: record.vitals.as_ref().map(|v| VitalsWire {
            systolic: v.systolic,
            diastolic: v.diastolic,
            heart_rate: v.heart_rate,
        }),
        medications: record
            .medications
            .iter()
            .map(|m| MedicationWire {
                name: m.name.as_str().to_string(),
                status: m.status.to_wire().to_string(),
                dosage: m.dosage.clone(),
            })
            .collect(),
        allergies: record.allergies.clone(),
        condition: record.condition.clone(),
        family_history: record.family_history.clone(),
        lifestyle,
        phone: record.phone.clone(),
        email: record.email.clone(),
        address: record.address.clone(),
        risk_score: record.risk_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"id: p-1001
firstName: Sarah
lastName: Williams
dateOfBirth: 1980-06-15
age: 45
gender: female
vitals:
  systolic: 128
  diastolic: 82
medications:
  - name: Metformin
    status: Active
    dosage: 500mg twice daily
  - name: Lisinopril
    status: Discontinued
allergies:
  - Penicillin
condition: Type 2 diabetes
familyHistory:
  - Father - myocardial infarction
lifestyle:
  smoking: Never
  exercise: Walks 3 times a week
phone: 555-0100
riskScore: 12.5
"#;

    #[test]
    fn parses_full_yaml_record() {
        let record = PatientFile::parse_yaml(SAMPLE_YAML).expect("parse yaml");
        assert_eq!(record.age, Some(45));
        assert_eq!(
            record.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1980, 6, 15).unwrap())
        );
        assert_eq!(record.medications.len(), 2);
        assert!(record.medications[0].is_active());
        assert_eq!(record.medications[1].status, MedicationStatus::Discontinued);
        assert_eq!(record.lifestyle.smoking.as_deref(), Some("Never"));
        assert_eq!(record.risk_score, Some(12.5));
    }

    #[test]
    fn round_trips_sample_yaml() {
        let record = PatientFile::parse_yaml(SAMPLE_YAML).expect("parse yaml");
        let output = PatientFile::render_yaml(&record).expect("render record");
        let reparsed = PatientFile::parse_yaml(&output).expect("reparse yaml");
        assert_eq!(record, reparsed);
    }

    #[test]
    fn parses_json_record() {
        let input = r#"{
            "age": 62,
            "gender": "male",
            "medications": [{ "name": "Amlodipine", "status": "Active" }],
            "vitals": { "systolic": 150, "diastolic": 95 }
        }"#;

        let record = PatientFile::parse_json(input).expect("parse json");
        assert_eq!(record.gender.as_deref(), Some("male"));
        assert_eq!(record.vitals.unwrap().systolic, Some(150));
        assert_eq!(record.medications[0].name.as_str(), "Amlodipine");
    }

    #[test]
    fn parses_empty_mapping() {
        let record = PatientFile::parse_json("{}").expect("empty record");
        assert_eq!(record, PatientRecord::default());
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = "age: 40\nunexpectedKey: true\n";

        let err = PatientFile::parse_yaml(input).expect_err("should reject unknown key");
        match err {
            RecordError::Translation(msg) => assert!(msg.contains("unexpectedKey")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_reports_nested_path() {
        let input = "medications:\n  - name: Metformin\n    status: [1, 2]\n";

        let err = PatientFile::parse_yaml(input).expect_err("should reject wrong type");
        match err {
            RecordError::Translation(msg) => assert!(msg.contains("medications[0].status")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_date_of_birth() {
        let err = PatientFile::parse_yaml("dateOfBirth: 15/06/1980\n").expect_err("bad date");
        match err {
            RecordError::Translation(msg) => assert!(msg.contains("dateOfBirth")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_medication_name() {
        let input = "medications:\n  - name: '  '\n    status: Active\n";

        let err = PatientFile::parse_yaml(input).expect_err("blank name");
        assert!(matches!(err, RecordError::InvalidInput(_)));
    }

    #[test]
    fn medication_status_is_case_sensitive() {
        let input = "medications:\n  - name: Aspirin\n    status: active\n";

        let record = PatientFile::parse_yaml(input).expect("parse");
        assert!(!record.medications[0].is_active());
        assert_eq!(
            record.medications[0].status,
            MedicationStatus::Other("active".into())
        );
    }

    #[test]
    fn rejects_trailing_json() {
        assert!(PatientFile::parse_json("{} {}").is_err());
    }
}
