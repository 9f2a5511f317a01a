/*!
 * Translation unit extraction.
 *
 * Flattens every `<trans-unit>` of a document into plain text plus the
 * metadata the rest of the pipeline needs. This is a read-only pass: the
 * document is never modified here.
 */

use log::debug;
use serde::Serialize;

use super::document::XliffDocument;
use super::node::Node;
use super::{NOTE, SOURCE, TARGET};

/// Default word count above which a unit is worth transforming
pub const DEFAULT_SUBSTANTIVE_THRESHOLD: usize = 10;

/// Number of characters of neighbouring text kept as context
const CONTEXT_SNIPPET_CHARS: usize = 100;

/// Number of substantive units kept in the review sample
const SAMPLE_SIZE: usize = 20;

/// Marker run that flags a note as "preserve verbatim"
const VERBATIM_MARKER: &str = "*******";

/// A note attached to a unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitNote {
    /// Position among the unit's notes
    pub position: usize,
    /// Trimmed note text
    pub content: String,
    /// Whether the note is delimited by a long run of `*`
    pub preserve_verbatim: bool,
}

/// Snippets of the surrounding units
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitContext {
    /// Start of the previous unit's source text
    pub previous: Option<String>,
    /// Start of the next unit's source text
    pub next: Option<String>,
}

/// One flattened translation unit
#[derive(Debug, Clone, Serialize)]
pub struct TranslationUnit {
    /// Unit identifier (`unknown_<index>` when the attribute is missing)
    pub id: String,
    /// Position in the document
    pub index: usize,
    /// Copy of the `<source>` subtree
    #[serde(skip)]
    pub source: Option<Node>,
    /// Copy of an existing `<target>` subtree
    #[serde(skip)]
    pub target: Option<Node>,
    /// All source character data, trimmed
    pub source_text: String,
    /// All existing target character data, trimmed
    pub target_text: String,
    /// Attached notes
    pub notes: Vec<UnitNote>,
    /// Whitespace-separated token count of the source text
    pub word_count: usize,
    /// Whether the unit is long enough to transform
    pub is_substantive: bool,
    /// Neighbouring text, for reviewers and verifiers
    pub context: UnitContext,
}

impl TranslationUnit {
    /// Whether the unit has any notes
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    /// Whether any note must be preserved verbatim
    pub fn has_verbatim_notes(&self) -> bool {
        self.notes.iter().any(|note| note.preserve_verbatim)
    }

    /// Text runs of the source markup, in document order
    pub fn source_segments(&self) -> Vec<String> {
        self.source
            .as_ref()
            .map(Node::text_segments)
            .unwrap_or_default()
    }
}

/// Summary numbers for a parsed document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseStatistics {
    pub total_units: usize,
    pub substantive_units: usize,
    pub units_with_notes: usize,
    pub units_with_verbatim_notes: usize,
    pub average_word_count: f64,
    pub sample_size: usize,
}

/// Result of parsing a document into units
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub statistics: ParseStatistics,
    pub units: Vec<TranslationUnit>,
}

impl ParsedDocument {
    /// Units above the substantive threshold, in document order
    pub fn substantive(&self) -> Vec<&TranslationUnit> {
        self.units.iter().filter(|unit| unit.is_substantive).collect()
    }

    /// First `size` substantive units
    pub fn sample(&self, size: usize) -> Vec<&TranslationUnit> {
        self.units
            .iter()
            .filter(|unit| unit.is_substantive)
            .take(size)
            .collect()
    }

    /// Look up a unit by id
    pub fn find(&self, id: &str) -> Option<&TranslationUnit> {
        self.units.iter().find(|unit| unit.id == id)
    }
}

/// Flattens translation units out of a document
#[derive(Debug, Clone)]
pub struct UnitParser {
    substantive_threshold: usize,
}

impl Default for UnitParser {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitParser {
    /// Parser with the default substantive threshold
    pub fn new() -> Self {
        Self {
            substantive_threshold: DEFAULT_SUBSTANTIVE_THRESHOLD,
        }
    }

    /// Parser with a custom substantive threshold
    pub fn with_threshold(substantive_threshold: usize) -> Self {
        Self {
            substantive_threshold,
        }
    }

    /// Extract every unit of the document, in document order
    pub fn parse(&self, document: &XliffDocument) -> ParsedDocument {
        let mut units: Vec<TranslationUnit> = document
            .trans_units()
            .into_iter()
            .enumerate()
            .map(|(index, node)| self.extract_unit(index, node))
            .collect();

        let snippets: Vec<String> = units
            .iter()
            .map(|unit| unit.source_text.chars().take(CONTEXT_SNIPPET_CHARS).collect())
            .collect();

        for (idx, unit) in units.iter_mut().enumerate() {
            unit.context = UnitContext {
                previous: idx.checked_sub(1).map(|prev| snippets[prev].clone()),
                next: snippets.get(idx + 1).cloned(),
            };
        }

        let statistics = Self::statistics(&units);
        debug!(
            "Parsed {} units ({} substantive, {} with notes)",
            statistics.total_units, statistics.substantive_units, statistics.units_with_notes
        );

        ParsedDocument { statistics, units }
    }

    fn extract_unit(&self, index: usize, node: &Node) -> TranslationUnit {
        let id = node
            .attribute("id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("unknown_{}", index));

        let source = node.find_child(SOURCE).cloned();
        let target = node.find_child(TARGET).cloned();

        let source_text = source
            .as_ref()
            .map(|s| s.itertext().trim().to_string())
            .unwrap_or_default();
        let target_text = target
            .as_ref()
            .map(|t| t.itertext().trim().to_string())
            .unwrap_or_default();

        let notes = node
            .children_named(NOTE)
            .enumerate()
            .map(|(position, note)| {
                let content = note.text.as_deref().unwrap_or_default().trim().to_string();
                UnitNote {
                    position,
                    preserve_verbatim: content.contains(VERBATIM_MARKER),
                    content,
                }
            })
            .collect();

        let word_count = source_text.split_whitespace().count();

        TranslationUnit {
            id,
            index,
            source,
            target,
            source_text,
            target_text,
            notes,
            word_count,
            is_substantive: word_count > self.substantive_threshold,
            context: UnitContext::default(),
        }
    }

    fn statistics(units: &[TranslationUnit]) -> ParseStatistics {
        let total_units = units.len();
        let substantive_units = units.iter().filter(|u| u.is_substantive).count();
        let total_words: usize = units.iter().map(|u| u.word_count).sum();

        ParseStatistics {
            total_units,
            substantive_units,
            units_with_notes: units.iter().filter(|u| u.has_notes()).count(),
            units_with_verbatim_notes: units.iter().filter(|u| u.has_verbatim_notes()).count(),
            average_word_count: if total_units == 0 {
                0.0
            } else {
                total_words as f64 / total_units as f64
            },
            sample_size: substantive_units.min(SAMPLE_SIZE),
        }
    }
}
