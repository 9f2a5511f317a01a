/*!
 * Rule-based rewriting of course text.
 *
 * # Architecture
 *
 * - `context`: document-wide state shared by every unit
 * - `notes`: verbatim note protection
 * - `capitalization`: program terminology casing
 * - `acronyms`: first-mention expansion across the document
 * - `perspective`: Mentor/Protégé to Program Manager point of view
 * - `lists`: bullet lines as sentences, numbered procedures
 * - `engine`: the ordered pipeline and its report
 */

pub mod acronyms;
pub mod capitalization;
pub mod context;
pub mod engine;
pub mod lists;
pub mod notes;
pub mod perspective;

pub use acronyms::{AcronymDefinition, AcronymGlossary};
pub use context::TransformationContext;
pub use engine::{
    apply_all_transformations, transform_file, CompletionStatus, TransformationEngine,
    TransformationReport,
};
