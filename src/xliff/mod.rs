/*!
 * XLIFF 1.2 document model.
 *
 * - `node`: the element tree with ElementTree-style text/tail storage
 * - `document`: reading and writing whole files
 * - `units`: flattening translation units into plain text
 */

pub mod document;
pub mod node;
pub mod units;

pub use document::XliffDocument;
pub use node::{Node, TextSlot};
pub use units::{ParseStatistics, ParsedDocument, TranslationUnit, UnitNote, UnitParser};

/// Local name of a translation unit element
pub const TRANS_UNIT: &str = "trans-unit";

/// Local name of the source element
pub const SOURCE: &str = "source";

/// Local name of the target element
pub const TARGET: &str = "target";

/// Local name of the note element
pub const NOTE: &str = "note";
