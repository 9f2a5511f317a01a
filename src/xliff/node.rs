/*!
 * Markup tree model.
 *
 * A `Node` is one XML element. Character data is stored the way
 * ElementTree stores it: `text` is the run before the first child and
 * `tail` is the run after the element's end tag. This keeps mixed content
 * and indentation intact when a tree is cloned and written back.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Location of a run of character data inside a subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSlot {
    /// Leading text of the element at this child-index path
    Text(Vec<usize>),
    /// Tail of the element at this child-index path
    Tail(Vec<usize>),
}

/// A single element of a markup tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Qualified tag name as written in the document (e.g. `g`, `xliff:source`)
    pub tag: String,

    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order
    #[serde(default)]
    pub children: Vec<Node>,

    /// Text before the first child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Text after this element's end tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
}

impl Node {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set the leading text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: set the trailing text
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Builder: append a child element
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> &str {
        match self.tag.rfind(':') {
            Some(idx) => &self.tag[idx + 1..],
            None => &self.tag,
        }
    }

    /// Namespace prefix of the tag, if any
    pub fn prefix(&self) -> Option<&str> {
        self.tag.rfind(':').map(|idx| &self.tag[..idx])
    }

    /// Look up an attribute value by its qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attributes as an order-independent map
    pub fn attribute_set(&self) -> BTreeMap<&str, &str> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    /// Trimmed text of every non-blank character run, in document order
    ///
    /// Runs are an element's leading text and the tails of its children, so
    /// text sitting next to inline tags in a mixed element is a segment of
    /// its own. The subtree root's tail is outside the subtree and is not a run.
    pub fn text_segments(&self) -> Vec<String> {
        self.text_runs().into_iter().map(|(_, text)| text).collect()
    }

    /// Locations of the runs returned by `text_segments`, in the same order
    pub fn text_slots(&self) -> Vec<TextSlot> {
        self.text_runs().into_iter().map(|(slot, _)| slot).collect()
    }

    fn text_runs(&self) -> Vec<(TextSlot, String)> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        self.collect_runs(&mut current, &mut runs);
        runs
    }

    fn collect_runs(&self, current: &mut Vec<usize>, runs: &mut Vec<(TextSlot, String)>) {
        if let Some(text) = non_blank(&self.text) {
            runs.push((TextSlot::Text(current.clone()), text));
        }
        for (idx, child) in self.children.iter().enumerate() {
            current.push(idx);
            child.collect_runs(current, runs);
            if let Some(tail) = non_blank(&child.tail) {
                runs.push((TextSlot::Tail(current.clone()), tail));
            }
            current.pop();
        }
    }

    /// Replace the run at `slot`, keeping the whitespace that surrounded it
    ///
    /// Returns false when the slot does not exist in this subtree.
    pub fn replace_run(&mut self, slot: &TextSlot, replacement: &str) -> bool {
        let run = match slot {
            TextSlot::Text(path) => self.node_at_mut(path).map(|node| &mut node.text),
            TextSlot::Tail(path) if !path.is_empty() => self.node_at_mut(path).map(|node| &mut node.tail),
            TextSlot::Tail(_) => None,
        };
        let Some(run) = run else {
            return false;
        };

        let original = run.as_deref().unwrap_or_default();
        let trimmed_start = original.trim_start();
        let leading = &original[..original.len() - trimmed_start.len()];
        let trailing = &trimmed_start[trimmed_start.trim_end().len()..];

        *run = Some(format!("{}{}{}", leading, replacement, trailing));
        true
    }

    /// Follow a child-index path from this node
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let mut node = self;
        for &idx in path {
            node = node.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// All character data inside the element (texts and child tails), excluding its own tail
    pub fn itertext(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
    }

    /// This node and all of its descendants in pre-order
    pub fn descendants(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        self.collect_descendants(&mut nodes);
        nodes
    }

    fn collect_descendants<'a>(&'a self, nodes: &mut Vec<&'a Node>) {
        nodes.push(self);
        for child in &self.children {
            child.collect_descendants(nodes);
        }
    }

    /// Number of elements in the subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Qualified tag names of the subtree in pre-order
    pub fn tag_sequence(&self) -> Vec<&str> {
        self.descendants().into_iter().map(|node| node.tag.as_str()).collect()
    }

    /// First direct child with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.local_name() == local_name)
    }

    /// Index of the first direct child with the given local name
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.local_name() == local_name)
    }

    /// Direct children with the given local name
    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |child| child.local_name() == local_name)
    }

    /// Count descendants (this node included) with the given local name
    pub fn count_named(&self, local_name: &str) -> usize {
        self.descendants()
            .into_iter()
            .filter(|node| node.local_name() == local_name)
            .count()
    }
}

fn non_blank(run: &Option<String>) -> Option<String> {
    run.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
