use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::transform::{AcronymDefinition, AcronymGlossary};
use crate::validation::length::LengthValidatorConfig;
use crate::writer::WriterConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code written on every generated target
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Rule pipeline settings
    #[serde(default)]
    pub transform: TransformConfig,

    /// Structure-preserving writer settings
    #[serde(default)]
    pub writer: WriterConfig,

    /// Post-run checks
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Verification pass
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which units go through the rule pipeline, and how
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransformConfig {
    /// Units with more source words than this are transformed
    #[serde(default = "default_substantive_word_threshold")]
    pub substantive_word_threshold: usize,

    /// Transform every unit regardless of word count
    #[serde(default)]
    pub transform_all_units: bool,

    /// Unit ids whose text is a numbered procedure
    #[serde(default)]
    pub procedure_units: Vec<String>,

    /// Glossary override; empty means the built-in glossary
    #[serde(default)]
    pub acronyms: Vec<AcronymDefinition>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            substantive_word_threshold: default_substantive_word_threshold(),
            transform_all_units: false,
            procedure_units: Vec::new(),
            acronyms: Vec::new(),
        }
    }
}

/// Thresholds used by the post-run checks
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Lowest acceptable transformed/source length ratio per unit
    #[serde(default = "default_length_ratio_min")]
    pub length_ratio_min: f64,

    /// Highest acceptable transformed/source length ratio per unit
    #[serde(default = "default_length_ratio_max")]
    pub length_ratio_max: f64,

    /// Minimum output/original ratio of `<g>` elements for formatting to count as preserved
    #[serde(default = "default_formatting_threshold")]
    pub formatting_threshold: f64,

    /// Lower bound of the document-level length percentage
    #[serde(default = "default_completion_range_min")]
    pub completion_range_min: f64,

    /// Upper bound of the document-level length percentage
    #[serde(default = "default_completion_range_max")]
    pub completion_range_max: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            length_ratio_min: default_length_ratio_min(),
            length_ratio_max: default_length_ratio_max(),
            formatting_threshold: default_formatting_threshold(),
            completion_range_min: default_completion_range_min(),
            completion_range_max: default_completion_range_max(),
        }
    }
}

impl ValidationConfig {
    /// Bounds for the per-unit length check
    pub fn length_config(&self) -> LengthValidatorConfig {
        LengthValidatorConfig {
            min_ratio: self.length_ratio_min,
            max_ratio: self.length_ratio_max,
        }
    }

    /// Completion range as `(min, max)` percentages
    pub fn completion_range(&self) -> (f64, f64) {
        (self.completion_range_min, self.completion_range_max)
    }
}

/// Verification pass settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerificationConfig {
    /// Run verification after the rewrite
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of verifications in flight
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en-US".to_string()
}

fn default_substantive_word_threshold() -> usize {
    crate::xliff::units::DEFAULT_SUBSTANTIVE_THRESHOLD
}

fn default_length_ratio_min() -> f64 {
    0.5
}

fn default_length_ratio_max() -> f64 {
    2.0
}

fn default_formatting_threshold() -> f64 {
    0.95
}

fn default_completion_range_min() -> f64 {
    90.0
}

fn default_completion_range_max() -> f64 {
    105.0
}

fn default_concurrent_requests() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, writing the defaults there first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            let config = Self::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }

        Self::load(path)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        let writer = &self.writer;
        if writer.sentence_search_window == 0 {
            return Err(anyhow!("Writer sentence_search_window must be greater than 0"));
        }
        if !(writer.min_length_ratio > 0.0 && writer.min_length_ratio < writer.max_length_ratio) {
            return Err(anyhow!(
                "Writer length ratios are inverted or not positive: min {} max {}",
                writer.min_length_ratio,
                writer.max_length_ratio
            ));
        }

        let validation = &self.validation;
        if !(validation.length_ratio_min > 0.0 && validation.length_ratio_min < validation.length_ratio_max) {
            return Err(anyhow!(
                "Validation length ratios are inverted or not positive: min {} max {}",
                validation.length_ratio_min,
                validation.length_ratio_max
            ));
        }
        if !(validation.formatting_threshold > 0.0 && validation.formatting_threshold <= 1.0) {
            return Err(anyhow!(
                "Formatting threshold must be in (0, 1], got {}",
                validation.formatting_threshold
            ));
        }
        if validation.completion_range_min > validation.completion_range_max {
            return Err(anyhow!(
                "Completion range is inverted: {} > {}",
                validation.completion_range_min,
                validation.completion_range_max
            ));
        }

        if self.verification.concurrent_requests == 0 {
            return Err(anyhow!("Verification concurrent_requests must be greater than 0"));
        }

        let mut seen = HashSet::new();
        for entry in &self.transform.acronyms {
            if entry.short.trim().is_empty() || entry.long.trim().is_empty() {
                return Err(anyhow!("Acronym entries need both a short and a long form"));
            }
            if !seen.insert(entry.short.as_str()) {
                return Err(anyhow!("Duplicate acronym in glossary: {}", entry.short));
            }
        }

        Ok(())
    }

    /// Glossary in effect: the configured entries, or the built-in one
    pub fn glossary(&self) -> AcronymGlossary {
        if self.transform.acronyms.is_empty() {
            AcronymGlossary::default()
        } else {
            AcronymGlossary::new(self.transform.acronyms.clone())
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            transform: TransformConfig::default(),
            writer: WriterConfig::default(),
            validation: ValidationConfig::default(),
            verification: VerificationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
