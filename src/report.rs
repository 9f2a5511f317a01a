/*!
 * Production report for one processed document.
 */

use chrono::Local;
use serde::Serialize;
use std::fmt;

use crate::transform::TransformationReport;
use crate::validation::{FormattingStats, LengthWarning, StructureIssue};
use crate::verification::{CheckKind, VerificationOutcome, VerificationSummary};
use crate::xliff::ParseStatistics;

const RULE: &str = "--------------------------------------------------------------------------------";
const BANNER: &str = "================================================================================";

/// Unit counts of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitCounts {
    /// Units sent through the rule pipeline
    pub transformed: usize,
    /// Transformed units whose text changed
    pub modified: usize,
    /// Transformed units whose text did not change
    pub unchanged: usize,
    /// Units that received a target
    pub written: usize,
    /// Transformed units the writer could not update
    pub skipped: usize,
}

/// Everything known about one processed document
#[derive(Debug, Clone, Serialize)]
pub struct ProductionReport {
    pub generated_at: String,
    pub input_path: String,
    pub output_path: String,
    pub statistics: ParseStatistics,
    pub counts: UnitCounts,
    pub transformation: TransformationReport,
    pub length_warnings: Vec<LengthWarning>,
    /// Absent when verification was disabled
    pub verification: Option<VerificationSummary>,
    pub verification_outcomes: Vec<VerificationOutcome>,
    pub formatting: FormattingStats,
    pub structure_issues: Vec<StructureIssue>,
}

impl ProductionReport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        statistics: ParseStatistics,
        counts: UnitCounts,
        transformation: TransformationReport,
        length_warnings: Vec<LengthWarning>,
        verification_outcomes: Option<Vec<VerificationOutcome>>,
        formatting: FormattingStats,
        structure_issues: Vec<StructureIssue>,
    ) -> Self {
        let verification = verification_outcomes
            .as_deref()
            .map(VerificationSummary::from_outcomes);

        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            statistics,
            counts,
            transformation,
            length_warnings,
            verification,
            verification_outcomes: verification_outcomes.unwrap_or_default(),
            formatting,
            structure_issues,
        }
    }

    /// Ids of units that failed verification, in document order
    pub fn units_needing_review(&self) -> Vec<&str> {
        self.verification_outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| outcome.unit_id.as_str())
            .collect()
    }

    /// Whether nothing in the run calls for a human look
    pub fn is_clean(&self) -> bool {
        self.formatting.formatting_preserved
            && self.structure_issues.is_empty()
            && self.length_warnings.is_empty()
            && self.units_needing_review().is_empty()
    }

    fn check_passes(&self, kind: CheckKind) -> usize {
        self.verification_outcomes
            .iter()
            .filter(|outcome| {
                outcome
                    .checks
                    .iter()
                    .filter(|check| check.kind == kind)
                    .all(|check| check.passed)
            })
            .count()
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    part as f64 / total as f64 * 100.0
}

impl fmt::Display for ProductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "XLIFF REWORK - PRODUCTION REPORT")?;
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "Generated: {}", self.generated_at)?;
        writeln!(f)?;

        writeln!(f, "INPUT/OUTPUT FILES")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Input:  {}", self.input_path)?;
        writeln!(f, "Output: {}", self.output_path)?;
        writeln!(f)?;

        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Total units:              {}", self.statistics.total_units)?;
        writeln!(f, "Substantive units:        {}", self.statistics.substantive_units)?;
        writeln!(f, "Units with notes:         {}", self.statistics.units_with_notes)?;
        writeln!(f, "Average word count:       {:.1}", self.statistics.average_word_count)?;
        writeln!(f, "Units transformed:        {}", self.counts.transformed)?;
        writeln!(f, "Units modified:           {}", self.counts.modified)?;
        writeln!(f, "Units unchanged:          {}", self.counts.unchanged)?;
        writeln!(f, "Targets written:          {}", self.counts.written)?;
        writeln!(f, "Units skipped by writer:  {}", self.counts.skipped)?;
        writeln!(f)?;

        writeln!(f, "VERIFICATION")?;
        writeln!(f, "{}", RULE)?;
        match &self.verification {
            Some(summary) => {
                let total = summary.total;
                writeln!(
                    f,
                    "Overall approved:         {}/{} ({:.1}%)",
                    summary.passed,
                    total,
                    summary.pass_rate()
                )?;
                let terminology = self.check_passes(CheckKind::Terminology);
                let style = self.check_passes(CheckKind::Style);
                writeln!(
                    f,
                    "Terminology passed:       {}/{} ({:.1}%)",
                    terminology,
                    total,
                    percent(terminology, total)
                )?;
                writeln!(
                    f,
                    "Style passed:             {}/{} ({:.1}%)",
                    style,
                    total,
                    percent(style, total)
                )?;
            }
            None => writeln!(f, "Skipped")?,
        }
        writeln!(f)?;

        writeln!(f, "FORMATTING PRESERVATION")?;
        writeln!(f, "{}", RULE)?;
        let fmt_stats = &self.formatting;
        writeln!(f, "Original <g> tags:        {}", fmt_stats.original.g_tags)?;
        writeln!(f, "Output <g> tags:          {}", fmt_stats.output.g_tags)?;
        writeln!(f, "Original UL tags:         {}", fmt_stats.original.lists)?;
        writeln!(f, "Output UL tags:           {}", fmt_stats.output.lists)?;
        writeln!(f, "Original LI tags:         {}", fmt_stats.original.list_items)?;
        writeln!(f, "Output LI tags:           {}", fmt_stats.output.list_items)?;
        writeln!(
            f,
            "Targets with formatting:  {}/{}",
            fmt_stats.targets_with_formatting, fmt_stats.total_targets
        )?;
        writeln!(
            f,
            "Formatting preserved:     {}",
            if fmt_stats.formatting_preserved { "YES" } else { "NO" }
        )?;
        writeln!(f)?;

        writeln!(f, "STRUCTURE ISSUES ({})", self.structure_issues.len())?;
        writeln!(f, "{}", RULE)?;
        for issue in &self.structure_issues {
            writeln!(f, "{}", issue)?;
        }
        writeln!(f)?;

        writeln!(f, "LENGTH WARNINGS ({})", self.length_warnings.len())?;
        writeln!(f, "{}", RULE)?;
        for warning in &self.length_warnings {
            writeln!(f, "{}", warning)?;
        }
        writeln!(f)?;

        let review: Vec<&VerificationOutcome> =
            self.verification_outcomes.iter().filter(|o| !o.passed).collect();
        writeln!(f, "UNITS NEEDING REVIEW ({})", review.len())?;
        writeln!(f, "{}", RULE)?;
        if review.is_empty() {
            writeln!(f, "None")?;
        }
        for outcome in review {
            writeln!(f, "Unit ID: {}", outcome.unit_id)?;
            writeln!(f, "  Feedback: {}", outcome.feedback)?;
        }
        writeln!(f)?;

        write!(f, "{}", self.transformation)
    }
}
