/*!
 * Protection of verbatim notes.
 *
 * Notes are delimited by runs of seven or more `*`. They are cut out before
 * any rewriting rule runs and put back unchanged at the end, so no rule can
 * touch their content.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Stand-in left in the text while notes are removed
pub const NOTE_PLACEHOLDER: &str = "<<<NOTE_PLACEHOLDER>>>";

static NOTE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\*{7,}.*?\*{7,}").unwrap());

/// A note cut out of a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedNote {
    /// Character offset of the note in the original text
    pub position: usize,
    /// The note, delimiters included
    pub content: String,
}

/// Replace every note with the placeholder
///
/// Returns the stripped text and the notes in order of appearance.
pub fn extract_notes(text: &str) -> (String, Vec<ExtractedNote>) {
    let notes: Vec<ExtractedNote> = NOTE_REGEX
        .find_iter(text)
        .map(|m| ExtractedNote {
            position: text[..m.start()].chars().count(),
            content: m.as_str().to_string(),
        })
        .collect();

    if notes.is_empty() {
        return (text.to_string(), notes);
    }

    let stripped = NOTE_REGEX.replace_all(text, NOTE_PLACEHOLDER).into_owned();
    (stripped, notes)
}

/// Put notes back, one per placeholder, in order
pub fn reinsert_notes(text: &str, notes: &[ExtractedNote]) -> String {
    let mut result = text.to_string();
    for note in notes {
        if !result.contains(NOTE_PLACEHOLDER) {
            warn!(
                "Note placeholder missing, dropping note found at offset {}",
                note.position
            );
            continue;
        }
        result = result.replacen(NOTE_PLACEHOLDER, &note.content, 1);
    }
    result
}
