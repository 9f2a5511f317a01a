/*!
 * Per-unit structure check between `<source>` and `<target>`.
 *
 * A written target must mirror its source: same tags in the same order and
 * the same attributes on every element. The target root's `xml:lang` is the
 * one allowed difference.
 */

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::xliff::node::Node;
use crate::xliff::{XliffDocument, SOURCE, TARGET};

const IGNORED_ATTRIBUTE: &str = "xml:lang";

/// A mismatch between a unit's source and target markup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StructureIssue {
    /// Element counts differ
    NodeCountMismatch {
        unit_id: String,
        source_nodes: usize,
        target_nodes: usize,
    },
    /// Tag order differs at a pre-order position
    TagMismatch {
        unit_id: String,
        position: usize,
        source_tag: String,
        target_tag: String,
    },
    /// Attribute sets differ at a pre-order position
    AttributeMismatch { unit_id: String, position: usize },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::NodeCountMismatch {
                unit_id,
                source_nodes,
                target_nodes,
            } => write!(
                f,
                "Unit {}: source has {} elements, target has {}",
                unit_id, source_nodes, target_nodes
            ),
            StructureIssue::TagMismatch {
                unit_id,
                position,
                source_tag,
                target_tag,
            } => write!(
                f,
                "Unit {}: element {} is <{}> in source but <{}> in target",
                unit_id, position, source_tag, target_tag
            ),
            StructureIssue::AttributeMismatch { unit_id, position } => {
                write!(f, "Unit {}: attributes of element {} differ", unit_id, position)
            }
        }
    }
}

/// Checks every unit that has both a source and a target
#[derive(Debug, Clone, Default)]
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    /// Issues across the whole document, in unit order
    pub fn validate(&self, document: &XliffDocument) -> Vec<StructureIssue> {
        self.validate_matching(document, |_| true)
    }

    /// Issues for the listed units only, in unit order
    ///
    /// Targets that arrived with the document and were not rewritten are
    /// left out.
    pub fn validate_units(&self, document: &XliffDocument, unit_ids: &HashSet<&str>) -> Vec<StructureIssue> {
        self.validate_matching(document, |unit_id| unit_ids.contains(unit_id))
    }

    fn validate_matching<F: Fn(&str) -> bool>(&self, document: &XliffDocument, selected: F) -> Vec<StructureIssue> {
        document
            .trans_units()
            .into_iter()
            .enumerate()
            .flat_map(|(index, unit)| {
                let unit_id = unit
                    .attribute("id")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("unknown_{}", index));
                if !selected(&unit_id) {
                    return Vec::new();
                }
                match (unit.find_child(SOURCE), unit.find_child(TARGET)) {
                    (Some(source), Some(target)) => self.compare(&unit_id, source, target),
                    _ => Vec::new(),
                }
            })
            .collect()
    }

    /// Issues between one source and its target
    pub fn compare(&self, unit_id: &str, source: &Node, target: &Node) -> Vec<StructureIssue> {
        let source_nodes = source.descendants();
        let target_nodes = target.descendants();

        if source_nodes.len() != target_nodes.len() {
            return vec![StructureIssue::NodeCountMismatch {
                unit_id: unit_id.to_string(),
                source_nodes: source_nodes.len(),
                target_nodes: target_nodes.len(),
            }];
        }

        let mut issues = Vec::new();
        for (position, (s, t)) in source_nodes.iter().zip(&target_nodes).enumerate() {
            // the roots are <source> and <target> by definition
            if position > 0 && s.tag != t.tag {
                issues.push(StructureIssue::TagMismatch {
                    unit_id: unit_id.to_string(),
                    position,
                    source_tag: s.tag.clone(),
                    target_tag: t.tag.clone(),
                });
            }
            if comparable_attributes(s) != comparable_attributes(t) {
                issues.push(StructureIssue::AttributeMismatch {
                    unit_id: unit_id.to_string(),
                    position,
                });
            }
        }
        issues
    }
}

fn comparable_attributes(node: &Node) -> BTreeMap<&str, &str> {
    let mut attributes = node.attribute_set();
    attributes.remove(IGNORED_ATTRIBUTE);
    attributes
}
