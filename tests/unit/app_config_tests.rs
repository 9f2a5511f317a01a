/*!
 * Tests for application configuration and file helpers
 */

use anyhow::Result;
use xlf_rework::app_config::{Config, LogLevel};
use xlf_rework::file_utils::FileManager;
use xlf_rework::transform::AcronymDefinition;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "en-US");
    assert_eq!(config.transform.substantive_word_threshold, 10);
    assert!(!config.transform.transform_all_units);
    assert!(config.transform.acronyms.is_empty());
    assert_eq!(config.writer.sentence_search_window, 20);
    assert_eq!(config.validation.length_ratio_min, 0.5);
    assert_eq!(config.validation.length_ratio_max, 2.0);
    assert_eq!(config.validation.formatting_threshold, 0.95);
    assert_eq!(config.validation.completion_range(), (90.0, 105.0));
    assert!(config.verification.enabled);
    assert_eq!(config.verification.concurrent_requests, 10);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// A saved config loads back with the same values
#[test]
fn test_config_saveThenLoad_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "en-GB".to_string();
    config.transform.procedure_units = vec!["steps".to_string()];
    config.transform.acronyms = vec![AcronymDefinition::new("LMS", "Learning Management System")];
    config.verification.enabled = false;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.target_language, "en-GB");
    assert_eq!(loaded.transform.procedure_units, vec!["steps"]);
    assert_eq!(loaded.glossary().len(), 1);
    assert!(!loaded.verification.enabled);
    assert!(loaded.validate().is_ok());
    Ok(())
}

#[test]
fn test_config_malformedJson_shouldFailToLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_fileManager_outputPath_shouldKeepStem() {
    let path = FileManager::generate_output_path("/courses/module.one.xliff", "/out", "report", "txt");
    assert_eq!(path, std::path::PathBuf::from("/out/module.one.report.txt"));
}

#[test]
fn test_fileManager_writeToFile_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a/b/c.xlf");

    FileManager::write_to_file(&path, "<xliff/>")?;
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("a/b")));
    assert_eq!(FileManager::read_to_string(&path)?, "<xliff/>");
    Ok(())
}
