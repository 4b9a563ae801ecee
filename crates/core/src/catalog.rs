//! Specialty catalogs appended to placeholder-mode note templates.
//!
//! A catalog lists the diagnoses, tests and medications a clinician commonly reaches for in a
//! specialty. The serializer renders each list as its own block, only when asked to and only
//! when the list is non-empty.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Common diagnoses, tests and medications for one specialty or template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialtyCatalog {
    pub name: String,
    #[serde(default)]
    pub common_diagnoses: Vec<String>,
    #[serde(default)]
    pub common_tests: Vec<String>,
    #[serde(default)]
    pub common_medications: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static BUILTIN: LazyLock<Vec<SpecialtyCatalog>> = LazyLock::new(|| {
    vec![
        SpecialtyCatalog {
            name: "General Practice".into(),
            common_diagnoses: owned(&[
                "Upper respiratory tract infection",
                "Essential hypertension",
                "Type 2 diabetes mellitus",
                "Low back pain",
                "Generalised anxiety disorder",
            ]),
            common_tests: owned(&[
                "Full blood count",
                "Basic metabolic panel",
                "HbA1c",
                "Lipid panel",
                "Urinalysis",
            ]),
            common_medications: owned(&[
                "Paracetamol",
                "Ibuprofen",
                "Amoxicillin",
                "Lisinopril",
                "Metformin",
            ]),
        },
        SpecialtyCatalog {
            name: "Cardiology".into(),
            common_diagnoses: owned(&[
                "Essential hypertension",
                "Atrial fibrillation",
                "Stable angina",
                "Heart failure with reduced ejection fraction",
                "Hyperlipidaemia",
            ]),
            common_tests: owned(&[
                "12-lead ECG",
                "Echocardiogram",
                "Troponin",
                "BNP",
                "Lipid panel",
            ]),
            common_medications: owned(&[
                "Atorvastatin",
                "Aspirin",
                "Bisoprolol",
                "Ramipril",
                "Apixaban",
            ]),
        },
        SpecialtyCatalog {
            name: "Endocrinology".into(),
            common_diagnoses: owned(&[
                "Type 2 diabetes mellitus",
                "Type 1 diabetes mellitus",
                "Hypothyroidism",
                "Hyperthyroidism",
                "Osteoporosis",
            ]),
            common_tests: owned(&[
                "HbA1c",
                "Fasting glucose",
                "TSH and free T4",
                "Urine albumin-creatinine ratio",
                "Vitamin D",
            ]),
            common_medications: owned(&[
                "Metformin",
                "Insulin glargine",
                "Empagliflozin",
                "Levothyroxine",
                "Alendronic acid",
            ]),
        },
        SpecialtyCatalog {
            name: "Respiratory".into(),
            common_diagnoses: owned(&[
                "Asthma",
                "Chronic obstructive pulmonary disease",
                "Community-acquired pneumonia",
                "Acute bronchitis",
            ]),
            common_tests: owned(&[
                "Spirometry",
                "Peak expiratory flow",
                "Chest X-ray",
                "Pulse oximetry",
            ]),
            common_medications: owned(&[
                "Salbutamol inhaler",
                "Beclometasone inhaler",
                "Tiotropium",
                "Prednisolone",
            ]),
        },
    ]
});

impl SpecialtyCatalog {
    /// All built-in catalogs.
    pub fn builtin_all() -> &'static [SpecialtyCatalog] {
        &BUILTIN
    }

    /// Look up a built-in catalog by name, ignoring ASCII case and surrounding whitespace.
    pub fn builtin(name: &str) -> Option<&'static SpecialtyCatalog> {
        let name = name.trim();
        BUILTIN.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.common_diagnoses.is_empty()
            && self.common_tests.is_empty()
            && self.common_medications.is_empty()
    }
}
