//! Patient context: the narrow, read-only projection of a patient record that shortcut and
//! macro generators read.
//!
//! Every accessor that produces display text has a defined fallback, so generated note text
//! never contains an empty slot where a value was missing. Blank strings on the record count as
//! missing.

use crate::constants::{
    AGE_FALLBACK, ALLERGIES_FALLBACK, BLOOD_PRESSURE_FALLBACK, CONDITION_FALLBACK,
    CONTACT_FALLBACK, FAMILY_HISTORY_FALLBACK, GENDER_FALLBACK, LIFESTYLE_FALLBACK,
    MEDICATIONS_FALLBACK, RISK_SCORE_FALLBACK,
};
use chrono::{Datelike, NaiveDate};
use clinote_record::PatientRecord;

/// Lifestyle and social-determinant fields of the context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifestyleContext {
    smoking: Option<String>,
    alcohol: Option<String>,
    exercise: Option<String>,
    diet: Option<String>,
    occupation: Option<String>,
    housing: Option<String>,
}

impl LifestyleContext {
    pub fn smoking(&self) -> &str {
        or_fallback(&self.smoking, LIFESTYLE_FALLBACK)
    }

    pub fn alcohol(&self) -> &str {
        or_fallback(&self.alcohol, LIFESTYLE_FALLBACK)
    }

    pub fn exercise(&self) -> &str {
        or_fallback(&self.exercise, LIFESTYLE_FALLBACK)
    }

    pub fn diet(&self) -> &str {
        or_fallback(&self.diet, LIFESTYLE_FALLBACK)
    }

    pub fn occupation(&self) -> &str {
        or_fallback(&self.occupation, LIFESTYLE_FALLBACK)
    }

    pub fn housing(&self) -> &str {
        or_fallback(&self.housing, LIFESTYLE_FALLBACK)
    }

    /// One-line summary of the fields that are documented, or the fallback if none are.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            ("Smoking", &self.smoking),
            ("Alcohol", &self.alcohol),
            ("Exercise", &self.exercise),
            ("Diet", &self.diet),
            ("Occupation", &self.occupation),
            ("Housing", &self.housing),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| format!("{label}: {v}")))
        .collect();

        if parts.is_empty() {
            LIFESTYLE_FALLBACK.to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Read-only patient snapshot for note expansion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientContext {
    age: Option<u32>,
    gender: Option<String>,
    blood_pressure: Option<String>,
    active_medications: Vec<String>,
    allergies: Vec<String>,
    condition: Option<String>,
    family_history: Vec<String>,
    lifestyle: LifestyleContext,
    date_of_birth: Option<NaiveDate>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    risk_score: Option<f64>,
}

impl PatientContext {
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    /// Age in years as text, e.g. `"45"`.
    pub fn age_text(&self) -> String {
        self.age
            .map(|a| a.to_string())
            .unwrap_or_else(|| AGE_FALLBACK.to_string())
    }

    pub fn gender(&self) -> &str {
        or_fallback(&self.gender, GENDER_FALLBACK)
    }

    /// Short demographic phrase used to open templates, e.g. `"45-year-old male"`.
    pub fn demographic_phrase(&self) -> String {
        match (self.age, self.gender.as_deref()) {
            (Some(age), Some(gender)) => format!("{age}-year-old {gender}"),
            (Some(age), None) => format!("{age}-year-old patient"),
            (None, Some(gender)) => format!("{gender} patient of unknown age"),
            (None, None) => "patient of unknown age".to_string(),
        }
    }

    /// Blood pressure as `"SYS/DIA"`.
    pub fn blood_pressure(&self) -> &str {
        or_fallback(&self.blood_pressure, BLOOD_PRESSURE_FALLBACK)
    }

    pub fn has_blood_pressure(&self) -> bool {
        self.blood_pressure.is_some()
    }

    /// Names of active medications only.
    pub fn active_medications(&self) -> &[String] {
        &self.active_medications
    }

    pub fn medications_text(&self) -> String {
        join_or(&self.active_medications, MEDICATIONS_FALLBACK)
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn allergies_text(&self) -> String {
        join_or(&self.allergies, ALLERGIES_FALLBACK)
    }

    pub fn condition(&self) -> &str {
        or_fallback(&self.condition, CONDITION_FALLBACK)
    }

    pub fn family_history(&self) -> &[String] {
        &self.family_history
    }

    pub fn family_history_text(&self) -> String {
        join_or(&self.family_history, FAMILY_HISTORY_FALLBACK)
    }

    pub fn lifestyle(&self) -> &LifestyleContext {
        &self.lifestyle
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Date of birth as `YYYY-MM-DD`.
    pub fn date_of_birth_text(&self) -> String {
        self.date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| CONTACT_FALLBACK.to_string())
    }

    pub fn phone(&self) -> &str {
        or_fallback(&self.phone, CONTACT_FALLBACK)
    }

    pub fn email(&self) -> &str {
        or_fallback(&self.email, CONTACT_FALLBACK)
    }

    pub fn address(&self) -> &str {
        or_fallback(&self.address, CONTACT_FALLBACK)
    }

    pub fn risk_score(&self) -> Option<f64> {
        self.risk_score
    }

    pub fn risk_score_text(&self) -> String {
        self.risk_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| RISK_SCORE_FALLBACK.to_string())
    }
}

/// Project a patient record into a [`PatientContext`].
///
/// Pure: the record is only borrowed. Only medications whose status is exactly `Active` are
/// kept. Blood pressure is present only when both readings are.
pub fn to_patient_context(record: &PatientRecord) -> PatientContext {
    let blood_pressure = record
        .vitals
        .as_ref()
        .and_then(|v| match (v.systolic, v.diastolic) {
            (Some(sys), Some(dia)) => Some(format!("{sys}/{dia}")),
            _ => None,
        });

    let lifestyle = &record.lifestyle;

    PatientContext {
        age: record.age,
        gender: present(&record.gender),
        blood_pressure,
        active_medications: record
            .medications
            .iter()
            .filter(|m| m.is_active())
            .map(|m| m.name.as_str().to_string())
            .collect(),
        allergies: present_items(&record.allergies),
        condition: present(&record.condition),
        family_history: present_items(&record.family_history),
        lifestyle: LifestyleContext {
            smoking: present(&lifestyle.smoking),
            alcohol: present(&lifestyle.alcohol),
            exercise: present(&lifestyle.exercise),
            diet: present(&lifestyle.diet),
            occupation: present(&lifestyle.occupation),
            housing: present(&lifestyle.housing),
        },
        date_of_birth: record.date_of_birth,
        phone: present(&record.phone),
        email: present(&record.email),
        address: present(&record.address),
        risk_score: record.risk_score.filter(|s| s.is_finite()),
    }
}

/// As [`to_patient_context`], deriving the age from the date of birth on `as_of` when the
/// record carries no explicit age.
pub fn to_patient_context_as_of(record: &PatientRecord, as_of: NaiveDate) -> PatientContext {
    let mut context = to_patient_context(record);
    if context.age.is_none() {
        context.age = record
            .date_of_birth
            .and_then(|dob| whole_years_between(dob, as_of));
    }
    context
}

fn whole_years_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    if to < from {
        return None;
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn present_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_fallback<'a>(value: &'a Option<String>, fallback: &'static str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
