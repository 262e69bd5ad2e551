use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

use crate::domain::assessment::{
    entities::{AssessmentSections, ParseDegradedWarning, SectionKey},
    helpers::clean_markdown,
};

/// Distinctive phrases for each section heading. A line containing one of
/// them (case-insensitive, on word boundaries) opens that section.
const HEADING_PHRASES: [(SectionKey, &str); 7] = [
    (
        SectionKey::PatientProfileSummary,
        r"(?:patient|child)(?:'s)?\s+profile|profile\s+summary",
    ),
    (
        SectionKey::NutritionalPriorities,
        r"nutrition(?:al)?\s+priorities",
    ),
    (
        SectionKey::AgeAppropriateGuidelines,
        r"age[\s-]*appropriate\s+(?:feeding\s+|nutrition(?:al)?\s+|dietary\s+)?guidelines",
    ),
    (SectionKey::PracticalTips, r"practical\s+(?:tips|advice)"),
    (
        SectionKey::SevenDayMealPlan,
        r"(?:(?:7|seven)[\s-]*day|weekly|one[\s-]*week)\s+meal\s+plan",
    ),
    (SectionKey::AssessmentHistory, r"assessment\s+history"),
    (
        SectionKey::NextAssessment,
        r"next\s+(?:assessment|follow[\s-]*up\s+(?:assessment|visit))",
    ),
];

static HEADINGS: LazyLock<Vec<(SectionKey, Regex)>> = LazyLock::new(|| {
    HEADING_PHRASES
        .iter()
        .map(|(key, phrase)| {
            let pattern = format!(r"(?i)\b(?:{phrase})\b");
            (*key, Regex::new(&pattern).expect("section heading pattern"))
        })
        .collect()
});

/// Splits a generated assessment into its seven sections.
pub fn parse(raw_text: &str) -> AssessmentSections {
    parse_with_diagnostics(raw_text).0
}

/// Like [`parse`], also reporting when no heading was recognised and the
/// whole reply had to be placed into a single section.
pub fn parse_with_diagnostics(raw_text: &str) -> (AssessmentSections, Option<ParseDegradedWarning>) {
    let mut bodies: HashMap<SectionKey, Vec<String>> = HashMap::new();
    let mut current: Option<SectionKey> = None;

    for line in raw_text.lines() {
        if let Some((key, inline)) = detect_heading(line) {
            current = Some(key);
            if let Some(inline) = inline {
                bodies.entry(key).or_default().push(inline);
            }
            continue;
        }

        if let Some(key) = current {
            bodies.entry(key).or_default().push(line.to_string());
        }
    }

    let mut sections = AssessmentSections::default();
    for key in SectionKey::ALL {
        if let Some(lines) = bodies.get(&key) {
            sections.set(key, clean_markdown(&lines.join("\n")));
        }
    }

    if !sections.is_empty() {
        return (sections, None);
    }

    let placed_in = if raw_text.to_lowercase().contains("meal plan") {
        SectionKey::SevenDayMealPlan
    } else {
        SectionKey::PatientProfileSummary
    };
    sections.set(placed_in, clean_markdown(raw_text));

    let warning = ParseDegradedWarning {
        placed_in,
        raw_chars: raw_text.chars().count(),
    };
    (sections, Some(warning))
}

/// Returns the section a heading line opens, plus any text written after a
/// colon following the heading phrase on the same line.
fn detect_heading(line: &str) -> Option<(SectionKey, Option<String>)> {
    let candidate: String = line
        .chars()
        .filter(|c| !matches!(c, '*' | '`' | '_' | '#'))
        .collect();
    if candidate.trim().is_empty() {
        return None;
    }

    HEADINGS.iter().find_map(|(key, regex)| {
        regex.find(&candidate).map(|found| {
            let inline = candidate[found.end()..]
                .split_once(':')
                .map(|(_, rest)| rest.trim().to_string())
                .filter(|rest| !rest.is_empty());
            (*key, inline)
        })
    })
}
