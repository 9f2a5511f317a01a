/*!
 * Bullet list formatting.
 *
 * Bullet lines become complete sentences: capitalized first letter and
 * terminal punctuation. Procedures additionally get numbered steps.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)([-*•])\s+(.+)$").unwrap());

/// Turn every bullet line into a sentence
pub fn convert_bullets_to_sentences(text: &str) -> String {
    map_lines(text, |line| {
        let caps = BULLET_REGEX.captures(line)?;
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let bullet = caps.get(2).map_or("", |m| m.as_str());
        let content = caps.get(3).map_or("", |m| m.as_str()).trim();

        Some(format!("{}{} {}", indent, bullet, as_sentence(content)))
    })
}

/// Replace bullet markers with `1.`, `2.`, ... in order
pub fn number_procedure_steps(text: &str) -> String {
    let mut counter = 0;
    map_lines(text, |line| {
        let caps = BULLET_REGEX.captures(line)?;
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let content = caps.get(3).map_or("", |m| m.as_str()).trim();

        counter += 1;
        Some(format!("{}{}. {}", indent, counter, content))
    })
}

/// Whether a line is a bullet item
pub fn is_bullet_line(line: &str) -> bool {
    BULLET_REGEX.is_match(line)
}

fn as_sentence(content: &str) -> String {
    let mut chars = content.chars();
    let mut sentence: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return String::new(),
    };
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentence
}

/// Rewrite lines the mapper accepts, keep the others; `\n` separators are kept
fn map_lines<F>(text: &str, mut mapper: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    text.split('\n')
        .map(|line| mapper(line).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}
