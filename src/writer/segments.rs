/*!
 * Proportional split of rewritten text over the original text runs.
 */

use serde::{Deserialize, Serialize};

/// Tuning for the proportional split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// How many characters past a split point to look for `.`, `!` or `?`
    #[serde(default = "default_sentence_search_window")]
    pub sentence_search_window: usize,

    /// Above this transformed/original length ratio the split is abandoned
    #[serde(default = "default_max_length_ratio")]
    pub max_length_ratio: f64,

    /// Below this transformed/original length ratio the split is abandoned
    #[serde(default = "default_min_length_ratio")]
    pub min_length_ratio: f64,
}

fn default_sentence_search_window() -> usize {
    20
}

fn default_max_length_ratio() -> f64 {
    2.0
}

fn default_min_length_ratio() -> f64 {
    0.5
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            sentence_search_window: default_sentence_search_window(),
            max_length_ratio: default_max_length_ratio(),
            min_length_ratio: default_min_length_ratio(),
        }
    }
}

/// Split `transformed` into as many pieces as there are `segments`
///
/// Each piece but the last takes a share of the text proportional to its
/// original segment's share of the total original length, nudged forward to
/// just past the nearest sentence end within the search window. When the
/// rewrite changed the overall length too much, the whole text goes to the
/// first piece and the others are left empty.
///
/// Lengths are counted in characters.
pub fn split_proportionally(
    transformed: &str,
    segments: &[String],
    config: &WriterConfig,
) -> Vec<String> {
    match segments.len() {
        0 => return Vec::new(),
        1 => return vec![transformed.to_string()],
        _ => {}
    }

    let original_chars: Vec<usize> = segments.iter().map(|segment| segment.chars().count()).collect();
    let total_original_chars: usize = original_chars.iter().sum();
    let chars_in_transformed = transformed.chars().count();

    let ratio = chars_in_transformed as f64 / total_original_chars.max(1) as f64;
    if ratio > config.max_length_ratio || ratio < config.min_length_ratio {
        let mut pieces = vec![String::new(); segments.len()];
        pieces[0] = transformed.to_string();
        return pieces;
    }

    let mut pieces = Vec::with_capacity(segments.len());
    let mut remaining: Vec<char> = transformed.chars().collect();

    // Split points follow each original segment's share of the total
    for &char_count in original_chars.iter().take(segments.len() - 1) {
        let proportion = char_count as f64 / total_original_chars.max(1) as f64;
        let mut split_point = (proportion * chars_in_transformed as f64).floor() as usize;

        if split_point < remaining.len() {
            if let Some(end) = (split_point..remaining.len())
                .take(config.sentence_search_window)
                .find(|&pos| matches!(remaining[pos], '.' | '!' | '?'))
            {
                split_point = end + 1;
            }
        }

        let split_point = split_point.min(remaining.len());
        pieces.push(collect_trimmed(&remaining[..split_point]));
        remaining = collect_trimmed(&remaining[split_point..]).chars().collect();
    }

    // The last segment absorbs the remaining text
    pieces.push(collect_trimmed(&remaining));
    pieces
}

fn collect_trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}
