/*!
 * Integration tests for controller runs
 */

use anyhow::Result;
use xlf_rework::app_config::Config;
use xlf_rework::app_controller::Controller;
use xlf_rework::file_utils::FileManager;
use xlf_rework::transform::AcronymDefinition;
use xlf_rework::verification::MockVerifier;
use xlf_rework::xliff::XliffDocument;

use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().target_language, "en-US");
    Ok(())
}

/// Inspection follows the configured substantive threshold
#[test]
fn test_inspect_configuredThreshold_shouldClassifyUnits() -> Result<()> {
    let document = XliffDocument::parse(&common::sample_course())?;

    let default_parsed = Controller::new_for_test()?.inspect(&document);
    assert_eq!(default_parsed.statistics.substantive_units, 3);

    let mut config = Config::default();
    config.transform.substantive_word_threshold = 1;
    let low_parsed = Controller::with_config(config)?.inspect(&document);
    assert_eq!(low_parsed.statistics.substantive_units, 4);
    Ok(())
}

/// Standalone rewrites use the configured glossary, like file runs do
#[test]
fn test_rewriteText_customGlossary_shouldExpandConfiguredAcronym() -> Result<()> {
    let text = "Open the LMS to begin the course work.";

    let mut config = Config::default();
    config.transform.acronyms = vec![AcronymDefinition::new("LMS", "Learning Management System")];
    let (rewritten, report) = Controller::with_config(config)?.rewrite_text(text, false);
    assert_eq!(rewritten, "Open the Learning Management System (LMS) to begin the course work.");
    assert_eq!(report.introduced_terms, vec!["LMS".to_string()]);
    assert_eq!(report.unit_number, 1);

    let (unchanged, default_report) = Controller::new_for_test()?.rewrite_text(text, false);
    assert_eq!(unchanged, text);
    assert!(default_report.introduced_terms.is_empty());
    Ok(())
}

/// A single-file run writes the document and the report
#[tokio::test]
async fn test_run_sampleCourse_shouldWriteOutputAndReport() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_course(temp_dir.path(), "course.xlf")?;
    let output_dir = temp_dir.path().join("out");

    let controller = Controller::new_for_test()?;
    let report = controller
        .run(input, output_dir.clone(), false)
        .await?
        .expect("first run should process the file");

    let output_path = output_dir.join("course.transformed.xlf");
    let report_path = output_dir.join("course.report.txt");
    assert!(FileManager::file_exists(&output_path));
    assert!(FileManager::file_exists(&report_path));

    assert_eq!(report.counts.transformed, 3);
    assert_eq!(report.counts.modified, 3);
    assert_eq!(report.counts.written, 3);
    assert_eq!(report.counts.skipped, 0);
    assert!(report.formatting.formatting_preserved);
    assert!(report.structure_issues.is_empty());
    assert_eq!(report.verification.as_ref().map(|v| v.passed), Some(3));
    assert!(report.is_clean());

    let output = XliffDocument::load(&output_path)?;
    let intro_target = output
        .find_unit("intro")
        .and_then(|unit| unit.find_child("target"))
        .expect("intro target");
    assert_eq!(intro_target.text.as_deref(), Some(common::MENTOR_EXPECTED));
    assert_eq!(intro_target.attribute("xml:lang"), Some("en-US"));

    let report_text = FileManager::read_to_string(&report_path)?;
    assert!(report_text.contains("XLIFF REWORK - PRODUCTION REPORT"));
    assert!(report_text.contains("UNITS NEEDING REVIEW (0)"));
    assert!(report_text.contains("DoD"));
    Ok(())
}

/// Targets the run did not write are not structure-checked
#[tokio::test]
async fn test_run_prefilledTargets_shouldOnlyCheckRewrittenUnits() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let units = format!(
        r#"      <trans-unit id="title">
        <source><g id="1">Module One</g></source>
        <target xml:lang="fr-FR">Module Un</target>
      </trans-unit>
{}"#,
        common::trans_unit("intro", common::MENTOR_SOURCE)
    );
    let input = common::create_test_file(temp_dir.path(), "prefilled.xlf", &common::xliff_with_units(&units))?;

    let report = Controller::new_for_test()?
        .run(input, temp_dir.path().join("out"), false)
        .await?
        .expect("first run should process the file");

    assert_eq!(report.counts.written, 1);
    assert!(report.structure_issues.is_empty());
    Ok(())
}

/// Existing outputs are kept unless forced
#[tokio::test]
async fn test_run_existingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_course(temp_dir.path(), "course.xlf")?;
    let output_dir = temp_dir.path().to_path_buf();
    let output_path = output_dir.join("course.transformed.xlf");

    common::create_test_file(&output_dir, "course.transformed.xlf", "placeholder")?;

    let controller = Controller::new_for_test()?;
    let skipped = controller.run(input.clone(), output_dir.clone(), false).await?;
    assert!(skipped.is_none());
    assert_eq!(FileManager::read_to_string(&output_path)?, "placeholder");

    let forced = controller.run(input, output_dir, true).await?;
    assert!(forced.is_some());
    assert!(FileManager::read_to_string(&output_path)?.contains("<target"));
    Ok(())
}

/// Rejections from the verifier end up in the review list
#[tokio::test]
async fn test_runWithVerifier_failingMock_shouldListUnitsForReview() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_course(temp_dir.path(), "course.xlf")?;

    let verifier = MockVerifier::failing();
    let controller = Controller::new_for_test()?;
    let report = controller
        .run_with_verifier(input, temp_dir.path().to_path_buf(), false, &verifier)
        .await?
        .expect("report");

    assert_eq!(verifier.calls(), 3);
    assert_eq!(report.units_needing_review(), vec!["intro", "styled", "acronyms"]);
    assert!(!report.is_clean());

    let text = report.to_string();
    assert!(text.contains("UNITS NEEDING REVIEW (3)"));
    assert!(text.contains("Unit ID: styled"));
    Ok(())
}

/// Disabled verification never calls the verifier
#[tokio::test]
async fn test_run_verificationDisabled_shouldSkipVerifier() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_course(temp_dir.path(), "course.xlf")?;

    let mut config = Config::default();
    config.verification.enabled = false;

    let verifier = MockVerifier::passing();
    let report = Controller::with_config(config)?
        .run_with_verifier(input, temp_dir.path().to_path_buf(), false, &verifier)
        .await?
        .expect("report");

    assert_eq!(verifier.calls(), 0);
    assert!(report.verification.is_none());
    assert!(report.to_string().contains("Skipped"));
    Ok(())
}

#[test]
fn test_run_missingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = tokio_test::block_on(async {
        controller
            .run(temp_dir.path().join("nope.xlf"), temp_dir.path().to_path_buf(), false)
            .await
    });
    assert!(result.is_err());
    Ok(())
}

/// Folder mode processes every XLIFF file and keeps going past failures
#[tokio::test]
async fn test_runFolder_mixedFiles_shouldProcessSkipAndCountFailures() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();

    common::create_sample_course(root, "a.xlf")?;
    common::create_sample_course(root, "nested/b.xliff")?;
    common::create_test_file(root, "broken.xlf", "<xliff><file>")?;
    common::create_test_file(root, "readme.txt", "not a course")?;

    let controller = Controller::new_for_test()?;

    let first = controller.run_folder(root.to_path_buf(), false).await?;
    assert_eq!((first.processed, first.skipped, first.failed), (2, 0, 1));
    assert!(FileManager::file_exists(root.join("a.transformed.xlf")));
    assert!(FileManager::file_exists(root.join("nested/b.transformed.xlf")));
    assert!(FileManager::file_exists(root.join("xlf-rework.issues.log")));

    let second = controller.run_folder(root.to_path_buf(), false).await?;
    assert_eq!((second.processed, second.skipped, second.failed), (0, 2, 1));
    Ok(())
}

#[tokio::test]
async fn test_runFolder_noXliffFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "notes.txt", "nothing here")?;

    let result = Controller::new_for_test()?.run_folder(temp_dir.path().to_path_buf(), false).await;
    assert!(result.is_err());
    Ok(())
}
