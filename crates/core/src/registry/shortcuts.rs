//! Built-in `#name` shortcut templates.
//!
//! Templates use their own free-form headings. They deliberately avoid the canonical section
//! labels so an expanded block inside one section does not split it when the note is parsed
//! again.

use super::Registry;
use crate::context::PatientContext;

pub(super) fn register(registry: &mut Registry) {
    registry.register_builtin("#diabetes", "Diabetes follow-up visit", diabetes);
    registry.register_builtin("#hypertension", "Hypertension review", hypertension);
    registry.register_builtin("#wellness", "Annual wellness examination", wellness);
    registry.register_builtin("#cold", "Common cold / viral URI", cold);
    registry.register_builtin("#asthma", "Asthma review", asthma);
    registry.register_builtin("#uti", "Uncomplicated urinary tract infection", uti);
    registry.register_builtin("#backpain", "Acute low back pain", back_pain);
}

fn diabetes(ctx: &PatientContext) -> String {
    format!(
        "Diabetes Follow-up Visit
Subjective: {demo} presenting for diabetes follow-up. Reports adherence to current regimen.
Current medications: {meds}
Allergies: {allergies}
Objective: Blood pressure {bp}. Foot examination: sensation intact to monofilament, no ulceration.
Impression: Diabetes mellitus, control to be confirmed with HbA1c.
Management:
- Continue current medications ({meds})
- HbA1c, renal function and urine albumin-creatinine ratio
- Annual retinal screening
- Diet and exercise counselling provided
- Review in 3 months",
        demo = ctx.demographic_phrase(),
        meds = ctx.medications_text(),
        allergies = ctx.allergies_text(),
        bp = ctx.blood_pressure(),
    )
}

fn hypertension(ctx: &PatientContext) -> String {
    let target = if ctx.age().is_some_and(|a| a >= 80) {
        "below 150/90"
    } else {
        "below 140/90"
    };

    format!(
        "Hypertension Review
Subjective: {demo} attending for blood pressure review. No chest pain, headache or visual disturbance reported.
Current medications: {meds}
Objective: Blood pressure today {bp}.
Impression: Essential hypertension.
Management:
- Target clinic blood pressure {target}
- Continue antihypertensive therapy ({meds})
- Renal function and electrolytes
- Reduce salt intake, regular aerobic exercise
- Home blood pressure monitoring, review in 4 weeks",
        demo = ctx.demographic_phrase(),
        meds = ctx.medications_text(),
        bp = ctx.blood_pressure(),
    )
}

fn wellness(ctx: &PatientContext) -> String {
    let lifestyle = ctx.lifestyle();
    format!(
        "Annual Wellness Examination
Subjective: {demo} presenting for routine wellness visit.
Known conditions: {condition}
Current medications: {meds}
Allergies: {allergies}
Family background: {family}
Lifestyle: smoking {smoking}; alcohol {alcohol}; exercise {exercise}; diet {diet}
Objective: Blood pressure {bp}.
Risk score: {risk}
Preventive care:
- Age-appropriate cancer screening reviewed
- Immunisations reviewed and updated
- Lipid panel and fasting glucose
- Lifestyle counselling provided",
        demo = ctx.demographic_phrase(),
        condition = ctx.condition(),
        meds = ctx.medications_text(),
        allergies = ctx.allergies_text(),
        family = ctx.family_history_text(),
        smoking = lifestyle.smoking(),
        alcohol = lifestyle.alcohol(),
        exercise = lifestyle.exercise(),
        diet = lifestyle.diet(),
        bp = ctx.blood_pressure(),
        risk = ctx.risk_score_text(),
    )
}

fn cold(ctx: &PatientContext) -> String {
    format!(
        "Viral Upper Respiratory Infection
Subjective: {demo} with nasal congestion, rhinorrhoea, sore throat and mild cough for several days. No shortness of breath.
Allergies: {allergies}
Objective: Afebrile, mild pharyngeal erythema, chest clear.
Impression: Common cold (viral URI).
Management:
- Rest, fluids and saline nasal rinses
- Paracetamol or ibuprofen for symptom relief
- Antibiotics not indicated
- Seek review if fever persists beyond 3 days or breathing worsens",
        demo = ctx.demographic_phrase(),
        allergies = ctx.allergies_text(),
    )
}

fn asthma(ctx: &PatientContext) -> String {
    format!(
        "Asthma Review
Subjective: {demo} attending for asthma review. Daytime symptoms, night waking and reliever use discussed.
Current medications: {meds}
Smoking: {smoking}
Objective: Peak flow and inhaler technique checked.
Impression: Asthma, control to be graded against symptom score.
Management:
- Personalised asthma action plan reviewed
- Step treatment up or down according to control
- Annual influenza vaccination",
        demo = ctx.demographic_phrase(),
        meds = ctx.medications_text(),
        smoking = ctx.lifestyle().smoking(),
    )
}

fn uti(ctx: &PatientContext) -> String {
    format!(
        "Urinary Tract Infection
Subjective: {demo} with dysuria, frequency and urgency. No loin pain, fever or rigors.
Allergies: {allergies}
Objective: Afebrile. Urine dipstick positive for nitrites and leukocytes.
Impression: Uncomplicated lower urinary tract infection.
Management:
- Antibiotic course chosen against allergy list
- Urine culture if symptoms persist
- Increase fluid intake
- Return if fever, flank pain or no improvement in 48 hours",
        demo = ctx.demographic_phrase(),
        allergies = ctx.allergies_text(),
    )
}

fn back_pain(ctx: &PatientContext) -> String {
    format!(
        "Acute Low Back Pain
Subjective: {demo} with mechanical low back pain. No saddle anaesthesia, bladder or bowel change, or weight loss.
Occupation: {occupation}
Objective: Paraspinal tenderness, straight leg raise negative, neurology intact.
Impression: Non-specific acute low back pain.
Management:
- Stay active, avoid bed rest
- Simple analgesia
- Physiotherapy referral if not improving in 6 weeks
- Red flag symptoms explained",
        demo = ctx.demographic_phrase(),
        occupation = ctx.lifestyle().occupation(),
    )
}
