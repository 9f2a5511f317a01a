/*!
 * Post-transformation verification.
 *
 * A verifier looks at one rewritten unit (with its original text and the
 * neighbouring rewritten text) and says whether it passes, with feedback
 * when it does not. Verification runs only after the whole document has
 * been transformed, so it can be concurrent.
 *
 * - `rules`: offline terminology and style dual check
 * - `mock`: scripted verifier for tests
 * - `batch`: bounded-concurrency runner
 */

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::errors::VerificationError;

pub mod batch;
pub mod mock;
pub mod rules;

pub use batch::{build_requests, verify_batch, TransformedUnit};
pub use mock::MockVerifier;
pub use rules::RuleVerifier;

/// What a verifier is asked to check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationRequest {
    pub unit_id: String,
    /// Position of the unit in the run, used to restore document order
    pub index: usize,
    pub original_text: String,
    pub transformed_text: String,
    /// Neighbouring rewritten text
    pub context: String,
}

/// Which aspect a check covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckKind {
    /// Program terminology and point of view
    Terminology,
    /// Course writing style (lists, sentences)
    Style,
}

/// Result of one check on one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub passed: bool,
    pub issues: Vec<String>,
}

impl CheckResult {
    pub fn from_issues(kind: CheckKind, issues: Vec<String>) -> Self {
        Self {
            kind,
            passed: issues.is_empty(),
            issues,
        }
    }
}

/// Verdict for one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationOutcome {
    pub unit_id: String,
    pub index: usize,
    pub passed: bool,
    pub feedback: String,
    pub checks: Vec<CheckResult>,
}

impl VerificationOutcome {
    /// A passing verdict with no feedback
    pub fn passed(request: &VerificationRequest) -> Self {
        Self {
            unit_id: request.unit_id.clone(),
            index: request.index,
            passed: true,
            feedback: String::new(),
            checks: Vec::new(),
        }
    }

    /// A failing verdict with feedback
    pub fn failed(request: &VerificationRequest, feedback: impl Into<String>) -> Self {
        Self {
            unit_id: request.unit_id.clone(),
            index: request.index,
            passed: false,
            feedback: feedback.into(),
            checks: Vec::new(),
        }
    }

    /// Verdict combining several checks; passes only when all of them pass
    pub fn from_checks(request: &VerificationRequest, checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().all(|check| check.passed);
        let feedback = checks
            .iter()
            .flat_map(|check| check.issues.iter().cloned())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            unit_id: request.unit_id.clone(),
            index: request.index,
            passed,
            feedback,
            checks,
        }
    }
}

/// Aggregate of a verification run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed units with their feedback, in document order
    pub failures: Vec<(String, String)>,
}

impl VerificationSummary {
    pub fn from_outcomes(outcomes: &[VerificationOutcome]) -> Self {
        let failures: Vec<(String, String)> = outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| (outcome.unit_id.clone(), outcome.feedback.clone()))
            .collect();

        Self {
            total: outcomes.len(),
            passed: outcomes.len() - failures.len(),
            failed: failures.len(),
            failures,
        }
    }

    /// Percentage of units that passed (100 when nothing was checked)
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

/// Common interface of all verifiers
#[async_trait]
pub trait Verifier: Send + Sync + Debug {
    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Check one rewritten unit
    async fn verify(&self, request: VerificationRequest) -> Result<VerificationOutcome, VerificationError>;
}
