// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use annotrack::app_config::{self, Config};
use annotrack::Controller;

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
    /// Convert annotation exports into per-tick tables (default command)
    Process(ProcessArgs),

    /// Split a per-tick table into train, validation and test frame files
    Split(SplitArgs),

    /// Generate shell completions for annotrack
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Annotation export (tab-delimited) or directory of exports
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output CSV file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files in directory mode
    #[arg(short, long)]
    force_overwrite: bool,

    /// Tick length in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Per-tick CSV produced by the process command
    #[arg(value_name = "PER_T_CSV")]
    input_path: PathBuf,

    /// Directory receiving train.csv, validation.csv and test.csv
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Replace raw gaze, facial and utterance values by their categories
    #[arg(long)]
    categorize: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// annotrack - annotation timeline toolkit
///
/// Converts time-coded behaviour annotation exports into per-tick tables
/// and prepares them for model training.
#[derive(Parser, Debug)]
#[command(name = "annotrack")]
#[command(version)]
#[command(about = "Annotation export to per-tick timeline converter")]
#[command(long_about = "annotrack converts tab-delimited annotation exports into per-tick CSV tables.

EXAMPLES:
    annotrack session.txt                         # Write annotations_per_t.csv
    annotrack session.txt -o out/session.csv      # Choose the output file
    annotrack -f exports/                         # Process every export in a directory
    annotrack split annotations_per_t.csv -o data # Write train/validation/test frames
    annotrack completions bash > annotrack.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Annotation export (tab-delimited) or directory of exports
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output CSV file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files in directory mode
    #[arg(short, long)]
    force_overwrite: bool,

    /// Tick length in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger);
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info by default; updated once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "annotrack", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args),
        Some(Commands::Split(args)) => run_split(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_process(ProcessArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                tick_ms: cli.tick_ms,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
        }
    }
}

// Load config, then let the command line override the log level
fn load_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    if let Some(level) = log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(config_path)?;

    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn run_process(options: ProcessArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level.as_ref())?;
    if let Some(tick_ms) = options.tick_ms {
        config.pipeline.tick_ms = tick_ms;
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let summary = controller.run(&options.input_path, options.output.as_deref())?;
        info!("Wrote {} records to {}", summary.records_written, summary.output_path.display());
    } else if options.input_path.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output only applies to a single input file"));
        }
        let summary = controller.run_folder(&options.input_path, options.force_overwrite)?;
        if summary.failed > 0 {
            return Err(anyhow!("{} export(s) failed to process", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_split(options: SplitArgs) -> Result<()> {
    let config = load_config(&options.config_path, options.log_level.as_ref())?;
    let controller = Controller::with_config(config)?;

    let input: &Path = &options.input_path;
    let summary = controller
        .split(input, &options.output_dir, options.categorize)
        .context("Split failed")?;

    info!(
        "Split complete: {} train, {} validation, {} test frames",
        summary.train, summary.validation, summary.test
    );
    Ok(())
}
