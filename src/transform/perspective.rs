/*!
 * Perspective conversion.
 *
 * Course text written to Mentors and Protégés ("As a Mentor, you ...") is
 * rewritten from the Program Manager's point of view. Text that already
 * addresses the Program Manager learner (objectives, course navigation) is
 * left alone.
 */

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Patterns that mark text as addressed to the Program Manager learner
static LEARNER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bBy the end of this\b",
        r"\bBy the end of the\b",
        r"\bIn this (lesson|module|unit)\b",
        r"\bAs a (PM|Program Manager)\b",
        r"\byour oversight\b",
        r"\byour responsibility as (a )?(PM|Program Manager)\b",
        r"\byou will learn\b",
        r"\byou will be able to\b",
        r"\byou will understand\b",
        r"\byou will know\b",
        r"\byou will identify\b",
        r"\byou will explain\b",
        r"\byou will apply\b",
        r"\bwelcome to\b.*\bcourse\b",
        r"\bThis (lesson|module|unit) (will|is designed to)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){}", pattern)).unwrap())
    .collect()
});

/// Ordered, case-sensitive rewrites
static PERSPECTIVE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"As a Mentor,?\s+you\s+", "Program Managers oversee Mentors who "),
        (r"\bYour\s+Protégé", "The Protégé"),
        (r"\byour\s+Protégé", "the Protégé"),
        (r"As a Protégé,?\s+you\s+", "Protégés are expected to "),
        (r"\bYou should\s+", "Participants should "),
        (r"\byou should\s+", "participants should "),
        (r"\bYou will\s+", "Participants will "),
        (r"\byou will\s+", "participants will "),
        (r"\bYou must\s+", "Participants must "),
        (r"\byou must\s+", "participants must "),
        (r"\bYou can\s+", "Participants can "),
        (r"\byou can\s+", "participants can "),
        (r"\bYour organization", "The organization"),
        (r"\byour organization", "the organization"),
        (r"\bYour role", "The participant's role"),
        (r"\byour role", "the participant's role"),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
    .collect()
});

/// Leading verbs that turn a sentence into an instruction for participants
const INSTRUCTION_VERBS: [&str; 4] = ["Complete", "Submit", "Ensure", "Verify"];

const INSTRUCTION_PREFIX: &str = "Program Managers should verify that participants ";

/// Whether the text speaks directly to the Program Manager learner
pub fn is_learner_context(text: &str) -> bool {
    LEARNER_PATTERNS.iter().any(|pattern| pattern.is_match(text))
}

/// Rewrite Mentor/Protégé-addressed text from the Program Manager's view
pub fn convert_perspective(text: &str) -> String {
    if is_learner_context(text) {
        return text.to_string();
    }

    let mut result = text.to_string();
    for (pattern, replacement) in PERSPECTIVE_RULES.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, NoExpand(replacement)).into_owned();
        }
    }

    if INSTRUCTION_VERBS.iter().any(|verb| result.starts_with(verb)) {
        result = format!("{}{}", INSTRUCTION_PREFIX, lowercase_first(&result));
    }

    result
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
