/*!
 * Formatting-preservation check.
 *
 * Compares inline formatting markup between the document as it was read and
 * the document as it is about to be written:
 * - `<g>` elements overall
 * - bulleted list containers (`ctype="x-html-UL"`)
 * - list items (`ctype="x-html-LI"`)
 * - targets that carry any `<g>` at all
 *
 * This is a health signal for the report, not a hard failure.
 */

use log::debug;
use serde::Serialize;

use crate::xliff::node::Node;
use crate::xliff::{XliffDocument, TARGET};

/// Default share of the original `<g>` count the output must keep
pub const DEFAULT_FORMATTING_THRESHOLD: f64 = 0.95;

const GROUP_TAG: &str = "g";
const LIST_CTYPE: &str = "x-html-UL";
const LIST_ITEM_CTYPE: &str = "x-html-LI";

/// Markup counts of one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkupCounts {
    pub g_tags: usize,
    pub lists: usize,
    pub list_items: usize,
}

impl MarkupCounts {
    /// Count formatting markup anywhere under `root`
    pub fn of(root: &Node) -> Self {
        let mut counts = Self::default();
        for node in root.descendants() {
            if node.local_name() != GROUP_TAG {
                continue;
            }
            counts.g_tags += 1;
            match node.attribute("ctype") {
                Some(LIST_CTYPE) => counts.lists += 1,
                Some(LIST_ITEM_CTYPE) => counts.list_items += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Result of comparing original and output formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattingStats {
    pub original: MarkupCounts,
    pub output: MarkupCounts,
    pub total_targets: usize,
    pub targets_with_formatting: usize,
    pub threshold: f64,
    pub formatting_preserved: bool,
}

impl FormattingStats {
    /// Compare the formatting of two versions of a document
    pub fn compare(original: &XliffDocument, output: &XliffDocument, threshold: f64) -> Self {
        let original_counts = MarkupCounts::of(&original.root);
        let output_counts = MarkupCounts::of(&output.root);

        let targets: Vec<&Node> = output
            .root
            .descendants()
            .into_iter()
            .filter(|node| node.local_name() == TARGET)
            .collect();
        let targets_with_formatting = targets
            .iter()
            .filter(|target| target.count_named(GROUP_TAG) > 0)
            .count();

        let formatting_preserved =
            output_counts.g_tags as f64 >= original_counts.g_tags as f64 * threshold;

        debug!(
            "Formatting check: {} -> {} <g> tags, {} targets ({} formatted)",
            original_counts.g_tags,
            output_counts.g_tags,
            targets.len(),
            targets_with_formatting
        );

        Self {
            original: original_counts,
            output: output_counts,
            total_targets: targets.len(),
            targets_with_formatting,
            threshold,
            formatting_preserved,
        }
    }
}
