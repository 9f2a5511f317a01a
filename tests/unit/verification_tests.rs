/*!
 * Tests for verifiers and batch verification
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;
use xlf_rework::verification::{
    verify_batch, MockVerifier, RuleVerifier, TransformedUnit, VerificationSummary, Verifier,
};

fn unit(id: &str, transformed: &str) -> TransformedUnit {
    TransformedUnit {
        unit_id: id.to_string(),
        original: String::new(),
        transformed: transformed.to_string(),
    }
}

/// Verifiers are usable behind a trait object
#[tokio::test]
async fn test_verifyBatch_ruleVerifierAsTraitObject_shouldFlagBadUnits() {
    let verifier: Box<dyn Verifier> = Box::new(RuleVerifier::new());
    let units = vec![
        unit("good", "Program Managers oversee Mentors who meet the Protégé."),
        unit("bad", "As a Mentor, you meet your protege."),
        unit("list", "Tasks:\n- review the plan"),
    ];

    let outcomes = verify_batch(verifier.as_ref(), &units, 2, |_, _| {}).await;
    let verdicts: Vec<(&str, bool)> = outcomes.iter().map(|o| (o.unit_id.as_str(), o.passed)).collect();
    assert_eq!(verdicts, vec![("good", true), ("bad", false), ("list", false)]);
    assert!(outcomes[2].feedback.contains("not a complete sentence"));
}

/// Out-of-order completion still yields document order
#[tokio::test]
async fn test_verifyBatch_delayedMock_shouldKeepDocumentOrder() {
    let verifier = MockVerifier::passing().with_delay(Duration::from_millis(2));
    let units: Vec<TransformedUnit> = (0..12).map(|i| unit(&format!("u{}", i), "text")).collect();

    let progress = Arc::new(Mutex::new(Vec::new()));
    let progress_log = progress.clone();

    let outcomes = verify_batch(&verifier, &units, 4, move |done, total| {
        if let Ok(mut log) = progress_log.lock() {
            log.push((done, total));
        }
    })
    .await;

    let indices: Vec<usize> = outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());
    assert_eq!(verifier.calls(), 12);

    let log = progress.lock().expect("progress log");
    assert_eq!(log.len(), 12);
    assert_eq!(log.last(), Some(&(12, 12)));
}

/// A verifier error becomes a failed outcome instead of aborting
#[tokio::test]
async fn test_verifyBatch_erroringMock_shouldReportFailures() {
    let units = vec![unit("a", "x"), unit("b", "y")];
    let outcomes = verify_batch(&MockVerifier::erroring(), &units, 10, |_, _| {}).await;

    assert!(outcomes.iter().all(|o| !o.passed));
    assert!(outcomes[0].feedback.starts_with("Verification error:"));

    let summary = VerificationSummary::from_outcomes(&outcomes);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.pass_rate(), 0.0);
}

#[tokio::test]
async fn test_summary_failEvery_shouldCountPassesAndFailures() {
    let units: Vec<TransformedUnit> = (0..6).map(|i| unit(&format!("u{}", i), "text")).collect();
    // sequential, so the failing calls are the 3rd and 6th units
    let outcomes = verify_batch(&MockVerifier::fail_every(3), &units, 1, |_, _| {}).await;

    let summary = VerificationSummary::from_outcomes(&outcomes);
    assert_eq!(summary.total, 6);
    assert_eq!(summary.passed, 4);
    assert_eq!(
        summary.failures.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
        vec!["u2", "u5"]
    );
    assert!((summary.pass_rate() - 66.666).abs() < 0.01);
}

/// Text the engine produced on purpose is not sent back for review
#[tokio::test]
async fn test_ruleVerifier_engineOutput_shouldPass() {
    use xlf_rework::transform::{apply_all_transformations, TransformationContext};

    let mut context = TransformationContext::new();
    let transformed = apply_all_transformations(
        "Contractors must follow the DFARS when they bid on agency contracts. ******* ask your mentor first *******",
        &mut context,
        false,
    );
    assert!(transformed.contains("Defense Federal Acquisition Regulation Supplement (DFARS)"));
    assert!(transformed.contains("******* ask your mentor first *******"));

    let outcomes = verify_batch(&RuleVerifier::new(), &[unit("rules", &transformed)], 1, |_, _| {}).await;
    assert!(outcomes[0].passed, "feedback: {}", outcomes[0].feedback);
}
