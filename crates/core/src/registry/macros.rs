//! Built-in `@name` data macros. Each expands to one short labelled line.

use super::Registry;
use crate::context::PatientContext;

pub(super) fn register(registry: &mut Registry) {
    registry.register_builtin("@bp", "Most recent blood pressure", |ctx| {
        format!("Blood pressure: {}", ctx.blood_pressure())
    });
    registry.register_builtin("@age", "Patient age", |ctx| {
        match ctx.age() {
            Some(age) => format!("Age: {age} years"),
            None => format!("Age: {}", ctx.age_text()),
        }
    });
    registry.register_builtin("@gender", "Patient gender", |ctx| {
        format!("Gender: {}", ctx.gender())
    });
    registry.register_builtin("@meds", "Active medications", |ctx| {
        format!("Current medications: {}", ctx.medications_text())
    });
    registry.register_builtin("@allergies", "Known allergies", |ctx| {
        format!("Allergies: {}", ctx.allergies_text())
    });
    registry.register_builtin("@condition", "Primary condition", |ctx| {
        format!("Condition: {}", ctx.condition())
    });
    registry.register_builtin("@risk", "Calculated risk score", risk);
    registry.register_builtin("@dob", "Date of birth", |ctx| {
        format!("Date of birth: {}", ctx.date_of_birth_text())
    });
    registry.register_builtin("@phone", "Contact phone number", |ctx| {
        format!("Phone: {}", ctx.phone())
    });
    registry.register_builtin("@email", "Contact email address", |ctx| {
        format!("Email: {}", ctx.email())
    });
    registry.register_builtin("@address", "Home address", |ctx| {
        format!("Address: {}", ctx.address())
    });
    registry.register_builtin("@family", "Family history", |ctx| {
        format!("Family medical history: {}", ctx.family_history_text())
    });
    registry.register_builtin("@lifestyle", "Lifestyle and social factors", |ctx| {
        format!("Lifestyle: {}", ctx.lifestyle().summary())
    });
}

fn risk(ctx: &PatientContext) -> String {
    match ctx.risk_score() {
        Some(score) => format!("Risk score: {score} ({})", risk_band(score)),
        None => format!("Risk score: {}", ctx.risk_score_text()),
    }
}

/// Band thresholds for the composite risk score.
fn risk_band(score: f64) -> &'static str {
    if score >= 20.0 {
        "high"
    } else if score >= 10.0 {
        "moderate"
    } else {
        "low"
    }
}
