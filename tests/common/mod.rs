/*!
 * Common test utilities for the xlf-rework test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Route library logs through env_logger once per test binary
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Wrap trans-unit markup in a minimal XLIFF 1.2 document
pub fn xliff_with_units(units: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file original="course" source-language="en-US" datatype="plaintext">
    <header>
      <tool tool-id="authoring" tool-name="Course Builder"/>
    </header>
    <body>
{}
    </body>
  </file>
</xliff>
"#,
        units
    )
}

/// Build a `<trans-unit>` with the given inner source markup
pub fn trans_unit(id: &str, source_markup: &str) -> String {
    format!(
        r#"      <trans-unit id="{}">
        <source>{}</source>
      </trans-unit>"#,
        id, source_markup
    )
}

/// Source text of the mentor scenario
pub const MENTOR_SOURCE: &str =
    "As a Mentor, you should ensure your protege understands the mentor-protege program.";

/// Expected rewrite of the mentor scenario
pub const MENTOR_EXPECTED: &str =
    "Program Managers oversee Mentors who should ensure the Protégé understands the Mentor-Protégé program.";

/// A small course document:
/// - `title`: short heading, never transformed
/// - `intro`: the mentor scenario as plain text
/// - `styled`: two formatted segments
/// - `acronyms`: an acronym first mention
pub fn sample_course() -> String {
    let units = [
        trans_unit("title", "Module One"),
        trans_unit("intro", MENTOR_SOURCE),
        trans_unit(
            "styled",
            r#"<g id="1" ctype="x-html-STRONG">As a mentor, you will meet with your protege</g> <g id="2">every week to review the program goals together.</g>"#,
        ),
        trans_unit(
            "acronyms",
            "The DoD runs many programs and each DoD office tracks the progress of its partners.",
        ),
    ];
    xliff_with_units(&units.join("\n"))
}

/// Write the sample course to `<dir>/<filename>`
pub fn create_sample_course(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_course())
}

/// Strip all whitespace, for comparing split text with its origin
pub fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
