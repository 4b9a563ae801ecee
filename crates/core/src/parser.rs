//! Flat canonical text → structured sections.
//!
//! Each section is matched independently against the whole text: find the first
//! `HEADER:` (case-insensitive, anywhere in the text), then take everything up to the
//! first header of any *later* section in the schema, or end of text. Because sections are
//! not consumed sequentially, a later section's label that happens to appear inside an
//! earlier section's free text is treated as a real boundary.

use crate::schema::SectionSchema;
use crate::sections::NoteSections;

impl SectionSchema {
    /// Parse canonical text against this schema.
    ///
    /// Every key of the schema is present in the result; sections whose header is missing
    /// are `""`. Captured text is trimmed. Never fails.
    pub fn parse(&self, text: &str) -> NoteSections {
        let mut sections = NoteSections::new();

        for matcher in self.matchers() {
            let value = match matcher.header.find(text) {
                Some(header) => {
                    let start = header.end();
                    let end = matcher
                        .terminator
                        .as_ref()
                        .and_then(|t| t.find_at(text, start))
                        .map(|m| m.start())
                        .unwrap_or(text.len());
                    text[start..end].trim()
                }
                None => "",
            };
            sections.set(matcher.key, value);
        }

        tracing::trace!(
            filled = sections.filled_keys().count(),
            "parsed note sections"
        );
        sections
    }
}

/// Parse canonical text against the full 13-section schema.
pub fn parse_sections(text: &str) -> NoteSections {
    SectionSchema::full().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SectionKey;

    #[test]
    fn parses_two_sections_leaving_others_empty() {
        let sections = parse_sections("CHIEF COMPLAINT:\nHeadache\n\nASSESSMENT:\nMigraine");

        assert_eq!(sections.get(SectionKey::ChiefComplaint), "Headache");
        assert_eq!(sections.get(SectionKey::Assessment), "Migraine");
        for key in SectionKey::ALL {
            if key != SectionKey::ChiefComplaint && key != SectionKey::Assessment {
                assert_eq!(sections.get(key), "", "{key} should be empty");
            }
        }
        assert_eq!(sections.iter().count(), 13);
    }

    #[test]
    fn headers_are_case_insensitive_and_need_not_start_a_line() {
        let sections = parse_sections("Visit note. chief complaint: sore throat  plan: fluids");

        assert_eq!(sections.get(SectionKey::ChiefComplaint), "sore throat");
        assert_eq!(sections.get(SectionKey::Plan), "fluids");
    }

    #[test]
    fn header_order_in_text_does_not_matter() {
        let sections = parse_sections("PLAN:\nRest\n\nCHIEF COMPLAINT:\nFatigue\n");

        // CHIEF COMPLAINT runs to the end: PLAN is before it, so it cannot terminate it.
        assert_eq!(sections.get(SectionKey::ChiefComplaint), "Fatigue");
        // PLAN is only terminated by later sections, and CHIEF COMPLAINT is earlier.
        assert_eq!(
            sections.get(SectionKey::Plan),
            "Rest\n\nCHIEF COMPLAINT:\nFatigue"
        );
    }

    #[test]
    fn embedded_later_label_is_a_boundary() {
        let text = "HISTORY OF PRESENT ILLNESS:\nDiscussed plan: start walking\n\nASSESSMENT:\nObesity";
        let sections = parse_sections(text);

        assert_eq!(sections.get(SectionKey::Hpi), "Discussed");
        // ASSESSMENT precedes PLAN in the schema, so it does not end the false PLAN capture.
        assert_eq!(
            sections.get(SectionKey::Plan),
            "start walking\n\nASSESSMENT:\nObesity"
        );
        assert_eq!(sections.get(SectionKey::Assessment), "Obesity");
    }

    #[test]
    fn empty_section_between_headers() {
        let sections = parse_sections("VITAL SIGNS:\n\nPHYSICAL EXAMINATION:\nNormal");

        assert_eq!(sections.get(SectionKey::VitalSigns), "");
        assert_eq!(sections.get(SectionKey::PhysicalExam), "Normal");
    }

    #[test]
    fn headerless_text_yields_all_empty() {
        let sections = parse_sections("Patient doing well overall.");
        assert_eq!(sections.filled_keys().count(), 0);
    }

    #[test]
    fn follow_up_label_with_hyphen() {
        let sections = parse_sections("PLAN:\nRecheck labs\n\nFOLLOW-UP:\n3 months");

        assert_eq!(sections.get(SectionKey::Plan), "Recheck labs");
        assert_eq!(sections.get(SectionKey::FollowUp), "3 months");
    }

    #[test]
    fn simplified_schema_ignores_sections_outside_it() {
        let text = "HISTORY OF PRESENT ILLNESS:\nCough\n\nVITAL SIGNS:\nT 38.1\n\nPLAN:\nRest";
        let sections = SectionSchema::simplified().parse(text);

        assert_eq!(sections.get(SectionKey::Hpi), "Cough\n\nVITAL SIGNS:\nT 38.1");
        assert_eq!(sections.get(SectionKey::Plan), "Rest");
        assert_eq!(sections.iter().count(), 5);
    }
}
