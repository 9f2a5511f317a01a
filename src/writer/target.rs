/*!
 * Structure-preserving target writer.
 *
 * The target of a unit is built by cloning its source markup, so every
 * inline element (`<g>`, `<x>`, list containers) survives. Rewritten text is
 * then distributed over the clone's text runs in the order they were read:
 * element text and the tails around inline tags alike.
 */

use log::{debug, info};
use std::collections::HashMap;

use crate::xliff::node::Node;
use crate::xliff::{XliffDocument, SOURCE, TARGET};

use super::segments::{split_proportionally, WriterConfig};

/// Attribute carrying the target language
pub const LANG_ATTRIBUTE: &str = "xml:lang";

/// Writes rewritten text into `<target>` elements
#[derive(Debug, Clone)]
pub struct TargetWriter {
    config: WriterConfig,
    target_language: String,
}

impl Default for TargetWriter {
    fn default() -> Self {
        Self::new(WriterConfig::default(), "en-US")
    }
}

impl TargetWriter {
    pub fn new(config: WriterConfig, target_language: impl Into<String>) -> Self {
        Self {
            config,
            target_language: target_language.into(),
        }
    }

    /// Write every unit whose id is in `transformed`
    ///
    /// Units are keyed the same way the unit parser names them, so units
    /// without an `id` attribute are addressed as `unknown_<index>`.
    /// Returns the number of units updated; units with no source or no
    /// source text are skipped.
    pub fn write(&self, document: &mut XliffDocument, transformed: &HashMap<String, String>) -> usize {
        let mut updated = 0;
        let mut index = 0;

        document.for_each_unit_mut(|unit| {
            let key = unit
                .attribute("id")
                .map(str::to_string)
                .unwrap_or_else(|| format!("unknown_{}", index));
            index += 1;

            let Some(text) = transformed.get(&key) else {
                return;
            };

            if self.write_unit(unit, text) {
                updated += 1;
            } else {
                debug!("Skipped unit {}: no source text to mirror", key);
            }
        });

        info!("Wrote targets for {} of {} units", updated, transformed.len());
        updated
    }

    /// Build and attach the target for a single unit
    pub fn write_unit(&self, unit: &mut Node, text: &str) -> bool {
        let Some(source_idx) = unit.child_position(SOURCE) else {
            return false;
        };

        let source = &unit.children[source_idx];
        let segments = source.text_segments();
        if segments.is_empty() {
            return false;
        }

        let pieces = split_proportionally(text, &segments, &self.config);
        let mut target = self.clone_as_target(source);

        // slots first, then assign by index
        let slots = target.text_slots();
        for (slot, piece) in slots.iter().zip(&pieces) {
            target.replace_run(slot, piece);
        }

        match unit.child_position(TARGET) {
            Some(target_idx) => {
                target.tail = unit.children[target_idx].tail.clone();
                unit.children[target_idx] = target;
            }
            None => {
                target.tail = unit.children[source_idx].tail.clone();
                unit.children.insert(source_idx + 1, target);
            }
        }

        true
    }

    fn clone_as_target(&self, source: &Node) -> Node {
        let mut target = source.clone();
        target.tag = match source.prefix() {
            Some(prefix) => format!("{}:{}", prefix, TARGET),
            None => TARGET.to_string(),
        };
        target.set_attribute(LANG_ATTRIBUTE, self.target_language.as_str());
        target
    }
}
