/*!
 * Document-wide acronym first-mention handling.
 *
 * The first time a short form shows up in a document it is expanded to
 * `Long Form (SHORT)`. From then on, any bare long form is shortened back to
 * the acronym. Which acronyms have been introduced lives in the
 * `TransformationContext`, so the rule spans every unit of the document.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use super::context::TransformationContext;

/// Built-in glossary, in the order the entries are applied
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("PMs", "Program Managers"),
    ("PM", "Program Manager"),
    ("DoD", "Department of Defense"),
    ("OSBP", "Office of Small Business Programs"),
    ("DFARS", "Defense Federal Acquisition Regulation Supplement"),
    ("MPP", "Mentor-Protégé Program"),
    ("SAM", "System for Award Management"),
    ("CPARS", "Contractor Performance Assessment Reporting System"),
    ("SBA", "Small Business Administration"),
    ("FAR", "Federal Acquisition Regulation"),
    ("NAICS", "North American Industry Classification System"),
    ("CO", "Contracting Officer"),
    ("COR", "Contracting Officer Representative"),
    ("SBIR", "Small Business Innovation Research"),
    ("STTR", "Small Business Technology Transfer"),
    ("HUBZone", "Historically Underutilized Business Zone"),
    ("WOSB", "Women-Owned Small Business"),
    ("EDWOSB", "Economically Disadvantaged Women-Owned Small Business"),
    ("VOSB", "Veteran-Owned Small Business"),
    ("SDVOSB", "Service-Disabled Veteran-Owned Small Business"),
    ("8(a)", "8(a) Business Development Program"),
];

static DEFAULT_GLOSSARY: Lazy<AcronymGlossary> = Lazy::new(|| {
    AcronymGlossary::new(
        DEFAULT_ENTRIES
            .iter()
            .map(|(short, long)| AcronymDefinition::new(*short, *long))
            .collect(),
    )
});

/// One glossary entry as it appears in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymDefinition {
    /// Acronym, e.g. `DoD`
    pub short: String,
    /// Expansion, e.g. `Department of Defense`
    pub long: String,
}

impl AcronymDefinition {
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
        }
    }
}

/// Compiled glossary entry
#[derive(Debug, Clone)]
struct CompiledAcronym {
    definition: AcronymDefinition,
    /// `Long (SHORT)`
    expanded: String,
    /// Standalone short form
    short_pattern: Regex,
    /// Standalone long form
    long_pattern: Regex,
    /// `(SHORT)` right after a long form, optional whitespace first
    followed_by_short: Regex,
}

impl CompiledAcronym {
    fn compile(definition: AcronymDefinition) -> Self {
        let expanded = format!("{} ({})", definition.long, definition.short);
        let short_pattern = standalone_pattern(&definition.short);
        let long_pattern = standalone_pattern(&definition.long);
        let followed_by_short =
            Regex::new(&format!(r"^\s*\({}\)", regex::escape(&definition.short))).unwrap();

        Self {
            definition,
            expanded,
            short_pattern,
            long_pattern,
            followed_by_short,
        }
    }
}

/// Build a "standalone" pattern for a literal term
///
/// A word boundary is required only on an edge whose character is a word
/// character; a term such as `8(a)` ends in `)` and is matched without one.
fn standalone_pattern(term: &str) -> Regex {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if term.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trailing = if term.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    Regex::new(&format!("{}{}{}", leading, regex::escape(term), trailing)).unwrap()
}

/// Ordered set of acronyms to manage
#[derive(Debug, Clone)]
pub struct AcronymGlossary {
    entries: Vec<CompiledAcronym>,
}

impl Default for AcronymGlossary {
    fn default() -> Self {
        DEFAULT_GLOSSARY.clone()
    }
}

impl AcronymGlossary {
    /// Compile a glossary; entries are applied in the order given
    pub fn new(definitions: Vec<AcronymDefinition>) -> Self {
        Self {
            entries: definitions.into_iter().map(CompiledAcronym::compile).collect(),
        }
    }

    /// Built-in glossary definitions
    pub fn default_definitions() -> Vec<AcronymDefinition> {
        DEFAULT_GLOSSARY.definitions()
    }

    /// Definitions in application order
    pub fn definitions(&self) -> Vec<AcronymDefinition> {
        self.entries.iter().map(|e| e.definition.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand first mentions and shorten later long forms
    ///
    /// Entries are visited in glossary order, not in order of appearance in
    /// the text.
    pub fn apply(&self, text: &str, context: &mut TransformationContext) -> String {
        let mut result = text.to_string();

        for entry in &self.entries {
            let short = entry.definition.short.as_str();

            if result.contains(&entry.expanded) {
                context.introduce(short);
                continue;
            }

            if !context.is_introduced(short) && entry.short_pattern.is_match(&result) {
                result = entry
                    .short_pattern
                    .replacen(&result, 1, NoExpand(&entry.expanded))
                    .into_owned();
                context.introduce(short);
                debug!("Introduced acronym {}", short);
            }

            if context.is_introduced(short) {
                result = shorten_long_forms(&result, entry);
            }
        }

        result
    }
}

/// Replace long forms that are not already followed by `(SHORT)`
fn shorten_long_forms(text: &str, entry: &CompiledAcronym) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in entry.long_pattern.find_iter(text) {
        if entry.followed_by_short.is_match(&text[m.end()..]) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&entry.definition.short);
        last = m.end();
    }

    if last == 0 {
        return text.to_string();
    }
    out.push_str(&text[last..]);
    out
}

/// Apply the built-in glossary
pub fn handle_acronyms(text: &str, context: &mut TransformationContext) -> String {
    DEFAULT_GLOSSARY.apply(text, context)
}
