/*!
 * Tests for the rule pipeline as a whole
 */

use xlf_rework::transform::capitalization::fix_capitalization;
use xlf_rework::transform::{
    apply_all_transformations, transform_file, AcronymDefinition, AcronymGlossary, CompletionStatus,
    TransformationContext, TransformationEngine, TransformationReport,
};

use crate::common;

/// Capitalization must not change text it already fixed
#[test]
fn test_fixCapitalization_appliedTwice_shouldBeStable() {
    let inputs = [
        "the mentor and the proteges met the federal government team",
        "Federal rules apply. Federal Government staff and federal staff attend.",
        "MENTORS and PROTÉGÉS",
        "",
    ];

    for input in inputs {
        let once = fix_capitalization(input);
        assert_eq!(fix_capitalization(&once), once, "not idempotent for {:?}", input);
    }
}

/// The canonical mentor sentence
#[test]
fn test_applyAll_mentorScenario_shouldRewriteForProgramManagers() {
    let mut context = TransformationContext::new();
    let result = apply_all_transformations(common::MENTOR_SOURCE, &mut context, false);
    assert_eq!(result, common::MENTOR_EXPECTED);
}

/// An acronym expanded in one unit is shortened in the next
#[test]
fn test_applyAll_sharedContext_shouldIntroduceAcronymOnce() {
    let mut context = TransformationContext::new();

    let first = apply_all_transformations("Contact the PM today about the schedule.", &mut context, false);
    let second = apply_all_transformations("The Program Manager reviews the PM checklist.", &mut context, false);

    assert_eq!(first, "Contact the Program Manager (PM) today about the schedule.");
    assert_eq!(second, "The PM reviews the PM checklist.");
    assert!(context.is_introduced("PM"));
}

/// The first unit processed under a fresh context gets the long form
#[test]
fn test_applyAll_reversedProcessingOrder_shouldMoveExpansion() {
    let unit_one = "Unit one cites the SBA guidance.";
    let unit_two = "Unit two asks the SBA office.";
    let one_expanded = "Unit one cites the Small Business Administration (SBA) guidance.";
    let two_expanded = "Unit two asks the Small Business Administration (SBA) office.";

    let mut forward = TransformationContext::new();
    assert_eq!(apply_all_transformations(unit_one, &mut forward, false), one_expanded);
    assert_eq!(apply_all_transformations(unit_two, &mut forward, false), unit_two);

    let mut reversed = TransformationContext::new();
    assert_eq!(apply_all_transformations(unit_two, &mut reversed, false), two_expanded);
    assert_eq!(apply_all_transformations(unit_one, &mut reversed, false), unit_one);
}

/// A spelled-out form already in the text counts as the introduction
#[test]
fn test_applyAll_existingExpansion_shouldNotDuplicate() {
    let mut context = TransformationContext::new();
    let result = apply_all_transformations(
        "Ask the Program Manager (PM) first, then the PM again.",
        &mut context,
        false,
    );

    assert_eq!(result, "Ask the Program Manager (PM) first, then the PM again.");
    assert!(context.is_introduced("PM"));
}

/// Entries are applied in glossary order: CO shortens inside the COR long form
#[test]
fn test_applyAll_glossaryOrder_shouldShortenCoBeforeCor() {
    let mut context = TransformationContext::new();

    let first = apply_all_transformations("The COR supports the CO.", &mut context, false);
    assert_eq!(
        first,
        "The Contracting Officer Representative (COR) supports the Contracting Officer (CO)."
    );

    let second = apply_all_transformations("The Contracting Officer Representative signs.", &mut context, false);
    assert_eq!(second, "The CO Representative signs.");
}

/// Verbatim notes survive every rule
#[test]
fn test_applyAll_verbatimNote_shouldComeBackUnchanged() {
    let mut context = TransformationContext::new();
    let text = "Intro text. ******* KEEP as is: mentor, your protege ******* More about the mentor.";

    let result = apply_all_transformations(text, &mut context, false);
    assert_eq!(
        result,
        "Intro text. ******* KEEP as is: mentor, your protege ******* More about the Mentor."
    );
}

/// Procedures get sentences and numbered steps
#[test]
fn test_applyAll_procedure_shouldNumberSteps() {
    let mut context = TransformationContext::new();
    let result = apply_all_transformations("Steps:\n- complete the form\n- submit it", &mut context, true);
    assert_eq!(result, "Steps:\n1. Complete the form.\n2. Submit it.");

    let mut context = TransformationContext::new();
    let plain = apply_all_transformations("Steps:\n- complete the form\n- submit it", &mut context, false);
    assert_eq!(plain, "Steps:\n- Complete the form.\n- Submit it.");
}

/// Text already addressed to the learner keeps its second person
#[test]
fn test_applyAll_learnerObjective_shouldKeepPerspective() {
    let mut context = TransformationContext::new();
    let text = "By the end of this lesson, you will be able to explain your role.";
    assert_eq!(apply_all_transformations(text, &mut context, false), text);
}

#[test]
fn test_applyAll_emptyText_shouldReturnEmpty() {
    let mut context = TransformationContext::new();
    assert_eq!(apply_all_transformations("", &mut context, false), "");
    assert_eq!(context.length_ratio(), 0.0);
}

/// Custom glossaries replace the built-in one entirely
#[test]
fn test_engine_customGlossary_shouldIgnoreBuiltInEntries() {
    let engine = TransformationEngine::with_glossary(AcronymGlossary::new(vec![AcronymDefinition::new(
        "LMS",
        "Learning Management System",
    )]));
    let mut context = TransformationContext::new();

    let result = engine.apply("Open the LMS and find the DoD form.", &mut context, false);
    assert_eq!(result, "Open the Learning Management System (LMS) and find the DoD form.");
    assert!(!context.is_introduced("DoD"));
}

#[test]
fn test_transformFile_shouldTrackLengthAndReport() {
    let (result, context) = transform_file("Submit the plan on time.", 3, false, None);

    assert_eq!(
        result,
        "Program Managers should verify that participants submit the plan on time."
    );
    assert_eq!(context.unit_number, 3);
    assert_eq!(context.total_source_length, 24);
    assert_eq!(context.total_target_length, result.chars().count());

    let report = TransformationReport::from_context(&context, (90.0, 105.0));
    assert_eq!(report.status, CompletionStatus::ReviewLength);
    assert!(report.to_string().contains("REVIEW LENGTH"));
}
