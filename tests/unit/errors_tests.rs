/*!
 * Tests for error types and conversions
 */

use xlf_rework::errors::{AppError, DocumentError, VerificationError};
use xlf_rework::XliffDocument;

#[test]
fn test_documentError_malformed_shouldDisplayPositionAndMessage() {
    let error = DocumentError::Malformed {
        position: 42,
        message: "bad attribute".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("byte 42"));
    assert!(display.contains("bad attribute"));
}

#[test]
fn test_documentError_unclosedElement_shouldNameTag() {
    let error = DocumentError::UnclosedElement {
        tag: "file".to_string(),
    };
    assert!(error.to_string().contains("<file>"));
}

#[test]
fn test_documentError_emptyInput_shouldComeFromParser() {
    let error = XliffDocument::parse("").expect_err("empty input should fail");
    assert!(matches!(error, DocumentError::Empty));
}

#[test]
fn test_verificationError_unavailable_shouldDisplayCorrectly() {
    let error = VerificationError::Unavailable("no endpoint configured".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Verifier unavailable"));
    assert!(display.contains("no endpoint configured"));
}

#[test]
fn test_appError_fromDocumentError_shouldWrapCorrectly() {
    let app_error: AppError = DocumentError::Empty.into();
    assert!(matches!(app_error, AppError::Document(DocumentError::Empty)));
    assert_eq!(app_error.to_string(), "Document error: Document has no root element");
}

#[test]
fn test_appError_fromVerificationError_shouldWrapCorrectly() {
    let app_error = AppError::from(VerificationError::Rejected("too long".to_string()));
    assert!(matches!(app_error, AppError::Verification(VerificationError::Rejected(_))));
    assert!(app_error.to_string().contains("too long"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "course.xlf missing");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(ref message) if message.contains("course.xlf missing")));
}

#[test]
fn test_appError_fromAnyhow_shouldKeepMessage() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "something odd"));
    assert_eq!(app_error.to_string(), "Unknown error: something odd");
}
