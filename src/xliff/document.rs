/*!
 * XLIFF document reading and writing.
 *
 * The document is kept as a full markup tree so that everything outside
 * the translation units (headers, skeletons, namespaces, indentation)
 * survives a read/write cycle untouched.
 */

use anyhow::{Context, Result};
use log::debug;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::path::Path;

use crate::errors::DocumentError;
use crate::file_utils::FileManager;

use super::node::Node;
use super::TRANS_UNIT;

/// A parsed XLIFF file
#[derive(Debug, Clone, PartialEq)]
pub struct XliffDocument {
    /// Root element (`<xliff>`)
    pub root: Node,

    /// Whether the input started with an XML declaration
    pub has_declaration: bool,
}

impl XliffDocument {
    /// Wrap an existing tree
    pub fn new(root: Node) -> Self {
        Self {
            root,
            has_declaration: true,
        }
    }

    /// Parse a document from a string
    ///
    /// Any structural problem is fatal; no partial tree is returned.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;
        let mut has_declaration = false;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(DocumentError::MultipleRoots { position });
                    }
                    stack.push(Self::element_from(&start, position)?);
                }
                Ok(Event::Empty(start)) => {
                    let node = Self::element_from(&start, position)?;
                    Self::close_element(node, &mut stack, &mut root, position)?;
                }
                Ok(Event::End(end)) => {
                    let node = stack.pop().ok_or_else(|| DocumentError::UnexpectedClosingTag {
                        tag: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                        position,
                    })?;
                    Self::close_element(node, &mut stack, &mut root, position)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text.unescape().map_err(|e| malformed(position, e))?;
                    Self::push_text(&mut stack, &text, position)?;
                }
                Ok(Event::CData(data)) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    Self::push_text(&mut stack, &text, position)?;
                }
                Ok(Event::Decl(_)) => has_declaration = true,
                Ok(Event::Comment(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => return Err(malformed(reader.buffer_position(), e)),
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::UnclosedElement {
                tag: open.tag.clone(),
            });
        }

        let root = root.ok_or(DocumentError::Empty)?;
        debug!("Parsed document with {} elements", root.node_count());

        Ok(Self {
            root,
            has_declaration,
        })
    }

    /// Read and parse a document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let document = Self::parse(&content)
            .with_context(|| format!("Failed to parse XLIFF document: {}", path.display()))?;
        Ok(document)
    }

    /// Serialize the document and write it to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let xml = self.to_xml_string()?;
        FileManager::write_to_file(path, &xml)
    }

    /// Serialize the tree back to XML
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        let mut writer = Writer::new(Vec::new());

        if self.has_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(serialization)?;
            writer
                .write_event(Event::Text(BytesText::new("\n")))
                .map_err(serialization)?;
        }

        Self::write_node(&mut writer, &self.root)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| DocumentError::Serialization(e.to_string()))
    }

    /// All translation units in document order
    pub fn trans_units(&self) -> Vec<&Node> {
        self.root
            .descendants()
            .into_iter()
            .filter(|node| node.local_name() == TRANS_UNIT)
            .collect()
    }

    /// Find a translation unit by its `id` attribute
    pub fn find_unit(&self, id: &str) -> Option<&Node> {
        self.trans_units()
            .into_iter()
            .find(|unit| unit.attribute("id") == Some(id))
    }

    /// Visit every translation unit mutably, in document order
    pub fn for_each_unit_mut<F: FnMut(&mut Node)>(&mut self, mut visit: F) {
        visit_units_mut(&mut self.root, &mut visit);
    }

    fn element_from(start: &BytesStart, position: usize) -> Result<Node, DocumentError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut node = Node::new(tag);

        for attr in start.attributes() {
            let attr = attr.map_err(|e| malformed(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| malformed(position, e))?
                .into_owned();
            node.attributes.push((key, value));
        }

        Ok(node)
    }

    fn close_element(
        node: Node,
        stack: &mut [Node],
        root: &mut Option<Node>,
        position: usize,
    ) -> Result<(), DocumentError> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        } else if root.is_some() {
            return Err(DocumentError::MultipleRoots { position });
        } else {
            *root = Some(node);
        }
        Ok(())
    }

    fn push_text(stack: &mut [Node], text: &str, position: usize) -> Result<(), DocumentError> {
        match stack.last_mut() {
            Some(current) => {
                let slot = match current.children.last_mut() {
                    Some(previous) => &mut previous.tail,
                    None => &mut current.text,
                };
                slot.get_or_insert_with(String::new).push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(DocumentError::TextOutsideRoot { position }),
        }
    }

    fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(node.tag.as_str());
        for (key, value) in &node.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if node.children.is_empty() && node.text.is_none() {
            return writer.write_event(Event::Empty(start)).map_err(serialization);
        }

        writer.write_event(Event::Start(start)).map_err(serialization)?;
        if let Some(text) = &node.text {
            Self::write_text(writer, text)?;
        }
        for child in &node.children {
            Self::write_node(writer, child)?;
            if let Some(tail) = &child.tail {
                Self::write_text(writer, tail)?;
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
            .map_err(serialization)
    }

    fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), DocumentError> {
        if text.is_empty() {
            return Ok(());
        }
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(serialization)
    }
}

fn visit_units_mut<F: FnMut(&mut Node)>(node: &mut Node, visit: &mut F) {
    if node.local_name() == TRANS_UNIT {
        visit(node);
        return;
    }
    for child in node.children.iter_mut() {
        visit_units_mut(child, visit);
    }
}

fn malformed(position: usize, error: impl std::fmt::Display) -> DocumentError {
    DocumentError::Malformed {
        position,
        message: error.to_string(),
    }
}

fn serialization(error: impl std::fmt::Display) -> DocumentError {
    DocumentError::Serialization(error.to_string())
}
