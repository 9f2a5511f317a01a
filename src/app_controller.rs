use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::report::{ProductionReport, UnitCounts};
use crate::transform::{TransformationContext, TransformationEngine, TransformationReport};
use crate::validation::{FormattingStats, LengthValidator, StructureValidator};
use crate::verification::{verify_batch, RuleVerifier, TransformedUnit, VerificationOutcome, Verifier};
use crate::writer::TargetWriter;
use crate::xliff::{ParsedDocument, UnitParser, XliffDocument};

// @module: Application controller for XLIFF rework runs

/// Suffix of the rewritten document, before its extension
pub const OUTPUT_SUFFIX: &str = "transformed";

/// Suffix of the text report, before its extension
pub const REPORT_SUFFIX: &str = "report";

/// Name of the folder-mode log written next to the inputs
const FOLDER_LOG_FILE: &str = "xlf-rework.issues.log";

/// Result of the rule pass over one document
#[derive(Debug, Clone)]
pub struct DocumentRewrite {
    /// Units as extracted before rewriting
    pub parsed: ParsedDocument,
    /// Units that went through the pipeline, in document order
    pub transformed: Vec<TransformedUnit>,
    /// Context after the last unit
    pub context: TransformationContext,
}

impl DocumentRewrite {
    /// Rewritten text keyed by unit id
    pub fn text_by_unit(&self) -> HashMap<String, String> {
        self.transformed
            .iter()
            .map(|unit| (unit.unit_id.clone(), unit.transformed.clone()))
            .collect()
    }

    /// Number of units whose text actually changed
    pub fn modified_count(&self) -> usize {
        self.transformed
            .iter()
            .filter(|unit| unit.original != unit.transformed)
            .count()
    }
}

/// Counts of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for XLIFF rework
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Rule pipeline with the configured glossary
    engine: TransformationEngine,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let engine = TransformationEngine::with_glossary(config.glossary());

        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Paths of the rewritten document and of the report for an input file
    pub fn output_paths(input_file: &Path, output_dir: &Path) -> (PathBuf, PathBuf) {
        (
            FileManager::generate_output_path(input_file, output_dir, OUTPUT_SUFFIX, "xlf"),
            FileManager::generate_output_path(input_file, output_dir, REPORT_SUFFIX, "txt"),
        )
    }

    /// Run the rule pipeline over every eligible unit of a document
    ///
    /// Units are visited in document order and share one context, so an
    /// acronym spelled out in an early unit is shortened in later ones.
    pub fn rewrite(&self, document: &XliffDocument) -> DocumentRewrite {
        let transform = &self.config.transform;
        let parsed = self.inspect(document);
        let procedures: HashSet<&str> = transform.procedure_units.iter().map(String::as_str).collect();

        let mut context = TransformationContext::new();
        let mut transformed = Vec::new();

        for unit in &parsed.units {
            let eligible = if transform.transform_all_units {
                !unit.source_text.is_empty()
            } else {
                unit.is_substantive
            };
            if !eligible {
                continue;
            }

            let is_procedure = procedures.contains(unit.id.as_str());
            let text = self.engine.apply(&unit.source_text, &mut context, is_procedure);
            debug!("Unit {}: {} -> {} chars", unit.id, unit.source_text.chars().count(), text.chars().count());

            transformed.push(TransformedUnit {
                unit_id: unit.id.clone(),
                original: unit.source_text.clone(),
                transformed: text,
            });
        }

        DocumentRewrite {
            parsed,
            transformed,
            context,
        }
    }

    /// Extract units with the configured substantive threshold
    pub fn inspect(&self, document: &XliffDocument) -> ParsedDocument {
        UnitParser::with_threshold(self.config.transform.substantive_word_threshold).parse(document)
    }

    /// Rewrite a standalone text with the configured glossary
    ///
    /// The text is treated as unit 1 of a fresh run.
    pub fn rewrite_text(&self, text: &str, is_procedure: bool) -> (String, TransformationReport) {
        let mut context = TransformationContext::new();
        context.reset_for_new_unit(1);
        let rewritten = self.engine.apply(text, &mut context, is_procedure);
        let report = TransformationReport::from_context(&context, self.config.validation.completion_range());
        (rewritten, report)
    }

    /// Process one file with the offline rule verifier
    ///
    /// Returns `None` when the output already exists and `force_overwrite` is off.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<ProductionReport>> {
        let verifier = RuleVerifier::with_glossary(&self.config.glossary());
        self.run_with_verifier(input_file, output_dir, force_overwrite, &verifier).await
    }

    /// Process one file, verifying with the given verifier
    pub async fn run_with_verifier<V>(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
        verifier: &V,
    ) -> Result<Option<ProductionReport>>
    where
        V: Verifier + ?Sized,
    {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let (output_path, report_path) = Self::output_paths(&input_file, &output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, output already exists (use -f to force overwrite)", input_file.display());
            return Ok(None);
        }

        info!("Processing {}", input_file.display());
        let document = XliffDocument::load(&input_file)?;

        let rewrite = self.rewrite(&document);
        info!(
            "Transformed {} of {} units ({} substantive)",
            rewrite.transformed.len(),
            rewrite.parsed.statistics.total_units,
            rewrite.parsed.statistics.substantive_units
        );

        let length_warnings = LengthValidator::with_config(self.config.validation.length_config()).check_units(
            rewrite
                .transformed
                .iter()
                .map(|unit| (unit.unit_id.as_str(), unit.original.as_str(), unit.transformed.as_str())),
        );
        for warning in &length_warnings {
            warn!("{}", warning);
        }

        let outcomes = if self.config.verification.enabled {
            Some(self.verify_with_progress(verifier, &rewrite.transformed).await)
        } else {
            info!("Verification disabled");
            None
        };

        let mut output = document.clone();
        let writer = TargetWriter::new(self.config.writer.clone(), self.config.target_language.clone());
        let written = writer.write(&mut output, &rewrite.text_by_unit());

        let formatting = FormattingStats::compare(&document, &output, self.config.validation.formatting_threshold);
        if !formatting.formatting_preserved {
            warn!(
                "Formatting markup kept on {} of {} targets",
                formatting.targets_with_formatting, formatting.total_targets
            );
        }

        let rewritten_ids: HashSet<&str> = rewrite.transformed.iter().map(|unit| unit.unit_id.as_str()).collect();
        let structure_issues = StructureValidator::new().validate_units(&output, &rewritten_ids);
        for issue in &structure_issues {
            warn!("{}", issue);
        }

        let modified = rewrite.modified_count();
        let counts = UnitCounts {
            transformed: rewrite.transformed.len(),
            modified,
            unchanged: rewrite.transformed.len() - modified,
            written,
            skipped: rewrite.transformed.len().saturating_sub(written),
        };

        output
            .save(&output_path)
            .with_context(|| format!("Failed to save output document: {}", output_path.display()))?;

        let report = ProductionReport::new(
            input_file.display().to_string(),
            output_path.display().to_string(),
            rewrite.parsed.statistics.clone(),
            counts,
            TransformationReport::from_context(&rewrite.context, self.config.validation.completion_range()),
            length_warnings,
            outcomes,
            formatting,
            structure_issues,
        );
        FileManager::write_to_file(&report_path, &report.to_string())?;

        info!(
            "Success: {} ({} units modified, {} needing review) in {}",
            output_path.display(),
            report.counts.modified,
            report.units_needing_review().len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(report))
    }

    async fn verify_with_progress<V>(&self, verifier: &V, units: &[TransformedUnit]) -> Vec<VerificationOutcome>
    where
        V: Verifier + ?Sized,
    {
        let progress_bar = ProgressBar::new(units.len() as u64);
        progress_bar.set_style(Self::progress_style("units"));
        progress_bar.set_message(format!("Verifying ({})", verifier.name()));

        let pb = progress_bar.clone();
        let outcomes = verify_batch(
            verifier,
            units,
            self.config.verification.concurrent_requests,
            move |completed, _total| {
                pb.set_position(completed as u64);
            },
        )
        .await;

        progress_bar.finish_and_clear();
        outcomes
    }

    fn progress_style(unit_label: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit_label
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Process every XLIFF file under a directory
    ///
    /// Outputs are written next to each input. A file that fails is logged
    /// and counted; the run continues with the next one.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_xliff_files(&input_dir)?;
        if files.is_empty() {
            return Err(anyhow!("No XLIFF files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = file.parent().map(Path::to_path_buf).unwrap_or_else(|| input_dir.clone());

            match self.run(file.clone(), output_dir, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );
        info!("{}", summary_message);

        let log_path = input_dir.join(FOLDER_LOG_FILE);
        let entry = format!(
            "{} - {} - Duration: {}",
            input_dir.display(),
            summary_message,
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_path, &entry) {
            warn!("Failed to write folder log: {}", e);
        }

        Ok(summary)
    }
}
