/*!
 * The transformation pipeline.
 *
 * Each unit's text goes through the stages in a fixed order:
 * note extraction, capitalization, acronyms, perspective, list formatting,
 * note reinsertion and length accounting. No stage can fail; any input,
 * including the empty string, produces an output.
 */

use serde::Serialize;
use std::fmt;

use super::acronyms::AcronymGlossary;
use super::capitalization::fix_capitalization;
use super::context::TransformationContext;
use super::lists::{convert_bullets_to_sentences, number_procedure_steps};
use super::notes::{extract_notes, reinsert_notes};
use super::perspective::convert_perspective;

/// Default acceptable band for the target/source length ratio, in percent
pub const DEFAULT_COMPLETION_RANGE: (f64, f64) = (90.0, 105.0);

/// Rule pipeline bound to an acronym glossary
#[derive(Debug, Clone, Default)]
pub struct TransformationEngine {
    glossary: AcronymGlossary,
}

impl TransformationEngine {
    /// Engine using the built-in glossary
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine using a custom glossary
    pub fn with_glossary(glossary: AcronymGlossary) -> Self {
        Self { glossary }
    }

    pub fn glossary(&self) -> &AcronymGlossary {
        &self.glossary
    }

    /// Run every stage over one text
    pub fn apply(&self, text: &str, context: &mut TransformationContext, is_procedure: bool) -> String {
        let (stripped, notes) = extract_notes(text);

        let mut working = fix_capitalization(&stripped);
        working = self.glossary.apply(&working, context);
        working = convert_perspective(&working);
        working = convert_bullets_to_sentences(&working);
        if is_procedure {
            working = number_procedure_steps(&working);
        }

        let result = reinsert_notes(&working, &notes);
        context.track_length(text, &result);
        result
    }
}

/// Run the pipeline with the built-in glossary
pub fn apply_all_transformations(
    text: &str,
    context: &mut TransformationContext,
    is_procedure: bool,
) -> String {
    TransformationEngine::default().apply(text, context, is_procedure)
}

/// Transform a whole course unit
///
/// Starts a fresh context when none is given, resets the unit counter, and
/// returns the text together with the updated context.
pub fn transform_file(
    source_text: &str,
    unit_number: usize,
    is_procedure: bool,
    context: Option<TransformationContext>,
) -> (String, TransformationContext) {
    let mut context = context.unwrap_or_default();
    context.reset_for_new_unit(unit_number);
    let transformed = apply_all_transformations(source_text, &mut context, is_procedure);
    (transformed, context)
}

/// Outcome of the length check on a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompletionStatus {
    Complete,
    ReviewLength,
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "COMPLETE"),
            Self::ReviewLength => write!(f, "REVIEW LENGTH"),
        }
    }
}

/// Summary of a transformation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationReport {
    pub source_length: usize,
    pub target_length: usize,
    /// Target length as a percentage of source length
    pub length_ratio: f64,
    pub acceptable_range: (f64, f64),
    /// Introduced acronyms, sorted
    pub introduced_terms: Vec<String>,
    pub unit_number: usize,
    pub lesson_number: usize,
    pub status: CompletionStatus,
}

impl TransformationReport {
    /// Build a report from a finished context
    pub fn from_context(context: &TransformationContext, acceptable_range: (f64, f64)) -> Self {
        let length_ratio = context.length_ratio();
        let (min, max) = acceptable_range;
        let status = if length_ratio >= min && length_ratio <= max {
            CompletionStatus::Complete
        } else {
            CompletionStatus::ReviewLength
        };

        Self {
            source_length: context.total_source_length,
            target_length: context.total_target_length,
            length_ratio,
            acceptable_range,
            introduced_terms: context.introduced_terms.iter().cloned().collect(),
            unit_number: context.unit_number,
            lesson_number: context.lesson_number,
            status,
        }
    }
}

impl fmt::Display for TransformationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TRANSFORMATION REPORT")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Source Text Length:  {} characters", self.source_length)?;
        writeln!(f, "Target Text Length:  {} characters", self.target_length)?;
        writeln!(f, "Length Ratio:        {:.1}%", self.length_ratio)?;
        writeln!(
            f,
            "Acceptable Range:    {:.0}-{:.0}%",
            self.acceptable_range.0, self.acceptable_range.1
        )?;
        writeln!(f)?;
        writeln!(f, "Acronyms Introduced: {}", self.introduced_terms.len())?;
        writeln!(f, "Acronyms:            {}", self.introduced_terms.join(", "))?;
        writeln!(f)?;
        writeln!(f, "Units Processed:     {}", self.unit_number)?;
        writeln!(f, "Lessons Processed:   {}", self.lesson_number)?;
        writeln!(f)?;
        writeln!(f, "Status: {}", self.status)
    }
}
