/*!
 * Capitalization rules for program terminology.
 *
 * `Mentor` and `Protégé` are always capitalized (the unaccented spelling is
 * normalized to the accented one), `Federal Government` keeps its capitals,
 * and any other `Federal` is lowered unless it opens a sentence.
 */

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// Ordered case-insensitive replacements
static TERM_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)\bmentor\b").unwrap(), "Mentor"),
        (Regex::new(r"(?i)\bmentors\b").unwrap(), "Mentors"),
        (Regex::new(r"(?i)\bprotégé\b").unwrap(), "Protégé"),
        (Regex::new(r"(?i)\bprotégés\b").unwrap(), "Protégés"),
        (Regex::new(r"(?i)\bprotege\b").unwrap(), "Protégé"),
        (Regex::new(r"(?i)\bproteges\b").unwrap(), "Protégés"),
        (
            Regex::new(r"(?i)\bfederal\s+government\b").unwrap(),
            "Federal Government",
        ),
    ]
});

static FEDERAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFederal\b").unwrap());

static GOVERNMENT_AHEAD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+Government").unwrap());

/// Apply every capitalization rule, in order
///
/// Applying the function twice gives the same result as applying it once.
pub fn fix_capitalization(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in TERM_RULES.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, NoExpand(replacement)).into_owned();
        }
    }
    lower_standalone_federal(&result)
}

/// Lower `Federal` unless it starts the text, follows `". "`, or precedes `Government`
fn lower_standalone_federal(text: &str) -> String {
    FEDERAL_REGEX
        .replace_all(text, |caps: &Captures| {
            let Some(m) = caps.get(0) else {
                return String::new();
            };
            let keep = m.start() == 0
                || text[..m.start()].ends_with(". ")
                || GOVERNMENT_AHEAD_REGEX.is_match(&text[m.end()..]);
            if keep {
                m.as_str().to_string()
            } else {
                "federal".to_string()
            }
        })
        .into_owned()
}
