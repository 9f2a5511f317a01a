/*!
 * End-to-end document tests: parse, rewrite, write, save
 */

use anyhow::Result;
use xlf_rework::app_config::Config;
use xlf_rework::app_controller::Controller;
use xlf_rework::validation::{FormattingStats, StructureValidator};
use xlf_rework::writer::TargetWriter;
use xlf_rework::xliff::{UnitParser, XliffDocument};

use crate::common;

fn sample_document() -> XliffDocument {
    XliffDocument::parse(&common::sample_course()).expect("sample course should parse")
}

#[test]
fn test_parse_sampleCourse_shouldClassifyUnits() {
    let parsed = UnitParser::new().parse(&sample_document());

    assert_eq!(parsed.statistics.total_units, 4);
    assert_eq!(parsed.statistics.substantive_units, 3);

    let ids: Vec<&str> = parsed.substantive().iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["intro", "styled", "acronyms"]);
}

#[test]
fn test_rewrite_sampleCourse_shouldTransformSubstantiveUnitsInOrder() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let rewrite = controller.rewrite(&sample_document());

    let texts = rewrite.text_by_unit();
    assert_eq!(texts.len(), 3);
    assert!(!texts.contains_key("title"));
    assert_eq!(texts["intro"], common::MENTOR_EXPECTED);
    assert_eq!(
        texts["styled"],
        "Program Managers oversee Mentors who will meet with the Protégé every week to review the program goals together."
    );
    assert_eq!(
        texts["acronyms"],
        "The Department of Defense (DoD) runs many programs and each DoD office tracks the progress of its partners."
    );
    assert_eq!(rewrite.modified_count(), 3);
    assert!(rewrite.context.is_introduced("DoD"));
    Ok(())
}

#[test]
fn test_rewrite_transformAllUnits_shouldIncludeShortUnits() -> Result<()> {
    let mut config = Config::default();
    config.transform.transform_all_units = true;
    let controller = Controller::with_config(config)?;

    let rewrite = controller.rewrite(&sample_document());
    assert_eq!(rewrite.transformed.len(), 4);
    assert_eq!(rewrite.transformed[0].unit_id, "title");
    assert_eq!(rewrite.modified_count(), 3);
    Ok(())
}

#[test]
fn test_rewrite_procedureUnit_shouldNumberSteps() -> Result<()> {
    let xml = common::xliff_with_units(&common::trans_unit(
        "steps",
        "Follow these steps with the team:\n- open the agreement form\n- sign the agreement today",
    ));
    let document = XliffDocument::parse(&xml)?;

    let mut config = Config::default();
    config.transform.procedure_units = vec!["steps".to_string()];
    let controller = Controller::with_config(config)?;

    let rewrite = controller.rewrite(&document);
    assert_eq!(
        rewrite.transformed[0].transformed,
        "Follow these steps with the team:\n1. Open the agreement form.\n2. Sign the agreement today."
    );
    Ok(())
}

/// Every formatted segment survives into the target, and its text is all there
#[test]
fn test_write_sampleCourse_shouldPreserveLeafCountAndText() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let original = sample_document();
    let rewrite = controller.rewrite(&original);

    let mut output = original.clone();
    let written = TargetWriter::default().write(&mut output, &rewrite.text_by_unit());
    assert_eq!(written, 3);

    let styled = output.find_unit("styled").expect("styled unit");
    let source = styled.find_child("source").expect("source");
    let target = styled.find_child("target").expect("target");

    assert_eq!(target.text_slots(), source.text_slots());
    assert_eq!(
        common::squash(&target.text_segments().join(" ")),
        common::squash(&rewrite.text_by_unit()["styled"])
    );
    assert_eq!(target.children[0].attribute("ctype"), Some("x-html-STRONG"));

    assert!(output.find_unit("title").and_then(|u| u.find_child("target")).is_none());
    assert!(StructureValidator::new().validate(&output).is_empty());
    assert!(FormattingStats::compare(&original, &output, 0.95).formatting_preserved);
    Ok(())
}

/// Saved output parses back to the same tree
#[test]
fn test_save_writtenCourse_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    let original = sample_document();

    let mut output = original.clone();
    TargetWriter::default().write(&mut output, &controller.rewrite(&original).text_by_unit());

    let path = temp_dir.path().join("course.transformed.xlf");
    output.save(&path)?;
    let reloaded = XliffDocument::load(&path)?;

    assert_eq!(reloaded.root, output.root);
    assert_eq!(reloaded.trans_units().len(), 4);
    Ok(())
}
