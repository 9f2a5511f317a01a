/*!
 * Offline dual-check verifier.
 *
 * Two independent checks run on every unit:
 * - terminology: role names capitalized, `Federal` only where it belongs,
 *   no Mentor/Protégé second-person address left over
 * - style: bullet items are complete sentences
 *
 * Verbatim notes are cut out first, and glossary expansions are trusted as
 * written, so text the pipeline left alone on purpose is never flagged.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::VerificationError;
use crate::transform::acronyms::AcronymGlossary;
use crate::transform::lists::is_bullet_line;
use crate::transform::notes::extract_notes;

use super::{CheckKind, CheckResult, VerificationOutcome, VerificationRequest, Verifier};

static LOWERCASE_ROLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(mentors?|protégés?|proteges?)\b").unwrap());

static FEDERAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFederal\b").unwrap());

static GOVERNMENT_AHEAD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+Government").unwrap());

static ROLE_ADDRESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"As a (Mentor|Protégé),?\s+you\b").unwrap());

static BULLET_CONTENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*•]\s+(.+)$").unwrap());

/// Rule-based verifier that needs no network access
#[derive(Debug, Clone)]
pub struct RuleVerifier {
    /// Long forms the acronym stage may insert, capitalized as defined
    long_forms: Vec<String>,
}

impl Default for RuleVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleVerifier {
    /// Verifier that trusts the built-in glossary
    pub fn new() -> Self {
        Self::with_glossary(&AcronymGlossary::default())
    }

    /// Verifier that trusts the long forms of `glossary`
    pub fn with_glossary(glossary: &AcronymGlossary) -> Self {
        Self {
            long_forms: glossary.definitions().into_iter().map(|d| d.long).collect(),
        }
    }

    /// Whether the byte range lies inside a glossary long form
    fn inside_long_form(&self, text: &str, start: usize, end: usize) -> bool {
        self.long_forms.iter().any(|long| {
            text.match_indices(long.as_str())
                .any(|(pos, matched)| pos <= start && end <= pos + matched.len())
        })
    }

    async fn terminology_check(&self, text: &str) -> CheckResult {
        let mut issues = Vec::new();

        for m in LOWERCASE_ROLE_REGEX.find_iter(text) {
            issues.push(format!("'{}' should be capitalized", m.as_str()));
        }

        for m in FEDERAL_REGEX.find_iter(text) {
            let sentence_start = m.start() == 0 || text[..m.start()].ends_with(". ");
            let compound = GOVERNMENT_AHEAD_REGEX.is_match(&text[m.end()..]);
            if !sentence_start && !compound && !self.inside_long_form(text, m.start(), m.end()) {
                issues.push("'Federal' should be lower-case outside 'Federal Government'".to_string());
            }
        }

        if let Some(m) = ROLE_ADDRESS_REGEX.find(text) {
            issues.push(format!("'{}' still addresses the participant directly", m.as_str()));
        }

        CheckResult::from_issues(CheckKind::Terminology, issues)
    }

    async fn style_check(&self, text: &str) -> CheckResult {
        let issues = text
            .lines()
            .enumerate()
            .filter(|(_, line)| is_bullet_line(line))
            .filter_map(|(line_no, line)| {
                let content = BULLET_CONTENT_REGEX
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim())?;

                let capitalized = content.chars().next().is_some_and(|c| !c.is_lowercase());
                let terminated = content.ends_with(['.', '!', '?']);

                match (capitalized, terminated) {
                    (true, true) => None,
                    (false, true) => Some(format!("Line {}: bullet should start with a capital", line_no + 1)),
                    (true, false) => Some(format!("Line {}: bullet should end with punctuation", line_no + 1)),
                    (false, false) => Some(format!("Line {}: bullet is not a complete sentence", line_no + 1)),
                }
            })
            .collect();

        CheckResult::from_issues(CheckKind::Style, issues)
    }
}

#[async_trait]
impl Verifier for RuleVerifier {
    fn name(&self) -> &str {
        "rules"
    }

    async fn verify(&self, request: VerificationRequest) -> Result<VerificationOutcome, VerificationError> {
        let (text, _) = extract_notes(&request.transformed_text);
        let (terminology, style) = futures::join!(self.terminology_check(&text), self.style_check(&text));
        Ok(VerificationOutcome::from_checks(&request, vec![terminology, style]))
    }
}
