/*!
 * Writing rewritten text back into the document.
 *
 * - `segments`: proportional split of one text over several text runs
 * - `target`: cloning source markup into `<target>` elements
 */

pub mod segments;
pub mod target;

pub use segments::{split_proportionally, WriterConfig};
pub use target::TargetWriter;
