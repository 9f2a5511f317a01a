/*!
 * Error types for the xlf-rework application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while reading or writing an XLIFF document
///
/// All of these are fatal: a document that fails to parse is never
/// partially processed.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The XML reader rejected the input
    #[error("Malformed document at byte {position}: {message}")]
    Malformed {
        /// Byte offset reported by the reader
        position: usize,
        /// Reader error message
        message: String,
    },

    /// A closing tag appeared with no element open
    #[error("Unexpected closing tag </{tag}> at byte {position}")]
    UnexpectedClosingTag {
        /// Tag name as written
        tag: String,
        /// Byte offset of the tag
        position: usize,
    },

    /// The input ended while an element was still open
    #[error("Element <{tag}> is never closed")]
    UnclosedElement {
        /// Innermost open tag
        tag: String,
    },

    /// A second top-level element was found
    #[error("Document has more than one root element (second one at byte {position})")]
    MultipleRoots {
        /// Byte offset of the second root
        position: usize,
    },

    /// Non-whitespace text outside the root element
    #[error("Text outside the root element at byte {position}")]
    TextOutsideRoot {
        /// Byte offset of the text
        position: usize,
    },

    /// No root element at all
    #[error("Document has no root element")]
    Empty,

    /// Writing the tree back to XML failed
    #[error("Failed to serialize document: {0}")]
    Serialization(String),
}

/// Errors that can occur when calling a verifier
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The verifier could not be reached or is not configured
    #[error("Verifier unavailable: {0}")]
    Unavailable(String),

    /// The verifier refused to check the text
    #[error("Verification rejected: {0}")]
    Rejected(String),

    /// The verifier answered with something that could not be interpreted
    #[error("Invalid verifier response: {0}")]
    InvalidResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document parsing or serialization
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from a verifier
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
