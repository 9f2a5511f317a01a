/*!
 * Output checks run before a document is saved.
 *
 * # Architecture
 *
 * - `formatting`: inline formatting markup kept across the run
 * - `structure`: each target mirrors its source element for element
 * - `length`: per-unit length-ratio anomalies
 */

pub mod formatting;
pub mod length;
pub mod structure;

pub use formatting::{FormattingStats, MarkupCounts};
pub use length::{LengthValidator, LengthValidatorConfig, LengthWarning};
pub use structure::{StructureIssue, StructureValidator};
