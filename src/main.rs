// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use xlf_rework::app_config::{self, Config};
use xlf_rework::file_utils::FileManager;
use xlf_rework::{Controller, XliffDocument};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite an XLIFF file or every XLIFF file in a directory (default command)
    Process(ProcessArgs),

    /// Show unit statistics and a sample of substantive units
    Inspect {
        /// XLIFF file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Number of substantive units to show
        #[arg(long, default_value_t = 5)]
        sample: usize,

        /// Configuration file path (defaults are used when it is missing)
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Run the rewrite rules over a piece of text
    RewriteText {
        /// Text to rewrite; read from stdin when omitted
        text: Option<String>,

        /// Number bullet lines as procedure steps
        #[arg(long)]
        procedure: bool,

        /// Configuration file path (defaults are used when it is missing)
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for xlf-rework
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input XLIFF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    options: ProcessOptions,
}

#[derive(Args, Debug, Clone)]
struct ProcessOptions {
    /// Output directory (defaults to the input file's directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Skip the verification pass
    #[arg(long)]
    no_verify: bool,

    /// Id of a unit whose bullets are numbered steps (repeatable)
    #[arg(long = "procedure-unit", value_name = "ID")]
    procedure_units: Vec<String>,
}

/// xlf-rework - rule-based rewriting of XLIFF course content
#[derive(Parser, Debug)]
#[command(name = "xlf-rework")]
#[command(version)]
#[command(about = "Rewrite XLIFF course content while preserving its markup")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "xlf-rework rewrites the substantive translation units of an XLIFF 1.2 file
with a fixed set of editorial rules and writes the result as <target> elements that
keep the inline markup of each <source>.

EXAMPLES:
    xlf-rework course.xlf                         # Rewrite using default config
    xlf-rework -f course.xlf                      # Force overwrite existing outputs
    xlf-rework process course.xlf -o out/         # Write outputs to another directory
    xlf-rework --log-level debug /courses/        # Process an entire directory
    xlf-rework inspect course.xlf --json          # Show unit statistics as JSON
    echo 'As a Mentor, you meet' | xlf-rework rewrite-text
    xlf-rework completions bash > xlf-rework.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input XLIFF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: ProcessOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; log::set_max_level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xlf-rework", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        Some(Commands::Inspect {
            file,
            json,
            sample,
            config_path,
        }) => run_inspect(&file, json, sample, &config_path),
        Some(Commands::RewriteText {
            text,
            procedure,
            config_path,
        }) => run_rewrite_text(text, procedure, &config_path),
        None => {
            // Default behavior: a bare path means `process`
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            run_process(ProcessArgs {
                input_path,
                options: cli.options,
            })
            .await
        }
    }
}

async fn run_process(args: ProcessArgs) -> Result<()> {
    let options = args.options;

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if !Path::new(&options.config_path).exists() {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
    }
    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.no_verify {
        config.verification.enabled = false;
    }
    for unit_id in &options.procedure_units {
        if !config.transform.procedure_units.contains(unit_id) {
            config.transform.procedure_units.push(unit_id.clone());
        }
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    let input_path = args.input_path;

    if FileManager::file_exists(&input_path) {
        let output_dir = match options.output_dir {
            Some(dir) => dir,
            None => input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };

        if let Some(report) = controller.run(input_path, output_dir, options.force_overwrite).await? {
            if !report.is_clean() {
                warn!("{} units need review, see {}", report.units_needing_review().len(), report.output_path);
            }
        }
    } else if FileManager::dir_exists(&input_path) {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored in folder mode; outputs are written next to each input");
        }
        let summary = controller.run_folder(input_path, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to process", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

/// Controller for the read-only commands; a missing config file is not created
fn read_only_controller(config_path: &str) -> Result<Controller> {
    let config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        Config::default()
    };
    log::set_max_level(config.log_level.to_level_filter());
    Controller::with_config(config)
}

fn run_inspect(file: &Path, json: bool, sample_size: usize, config_path: &str) -> Result<()> {
    let controller = read_only_controller(config_path)?;
    let document = XliffDocument::load(file)?;
    let parsed = controller.inspect(&document);
    let sample = parsed.sample(sample_size);

    if json {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "statistics": parsed.statistics,
            "sample": sample,
        });
        println!("{}", serde_json::to_string_pretty(&output).context("Failed to serialize inspection")?);
        return Ok(());
    }

    let stats = &parsed.statistics;
    println!("File:                      {}", file.display());
    println!("Total units:               {}", stats.total_units);
    println!("Substantive units:         {}", stats.substantive_units);
    println!("Units with notes:          {}", stats.units_with_notes);
    println!("Units with verbatim notes: {}", stats.units_with_verbatim_notes);
    println!("Average word count:        {:.1}", stats.average_word_count);

    for unit in sample {
        println!();
        println!("[{}] {} words", unit.id, unit.word_count);
        println!("  {}", unit.source_text);
    }

    Ok(())
}

fn run_rewrite_text(text: Option<String>, procedure: bool, config_path: &str) -> Result<()> {
    let controller = read_only_controller(config_path)?;
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    let (rewritten, report) = controller.rewrite_text(text.trim_end_matches('\n'), procedure);
    info!("Introduced {} acronym(s)", report.introduced_terms.len());

    println!("{}", rewritten);
    println!();
    println!("{}", report);

    Ok(())
}
