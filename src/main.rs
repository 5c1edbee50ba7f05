#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use narrasub::app_config::{self, Config, GenerationMode};
use narrasub::app_controller::{Controller, GenerationOutcome};

/// CLI wrapper for GenerationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationMode {
    Block,
    Simple,
}

impl From<CliGenerationMode> for GenerationMode {
    fn from(cli_mode: CliGenerationMode) -> Self {
        match cli_mode {
            CliGenerationMode::Block => GenerationMode::Block,
            CliGenerationMode::Simple => GenerationMode::Simple,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
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
    /// Generate SRT subtitles from a scene list, a text file or a folder of them
    Generate(GenerateArgs),

    /// Check an SRT file against the block length limit and for timecode problems
    Validate {
        /// SRT file to check
        #[arg(value_name = "SRT_FILE")]
        srt_file: PathBuf,

        /// Maximum characters per block (overrides config)
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Count the blocks of an SRT file
    Count {
        /// SRT file to count
        #[arg(value_name = "SRT_FILE")]
        srt_file: PathBuf,
    },

    /// Generate shell completions for narrasub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Scene list (.json), narration text file, or directory of them
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output SRT file (single file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Generation mode
    #[arg(short, long, value_enum)]
    mode: Option<CliGenerationMode>,

    /// Maximum characters per block
    #[arg(long)]
    max_chars: Option<usize>,

    /// Narration pace in words per minute
    #[arg(long)]
    wpm: Option<f64>,

    /// Seconds of silence between blocks
    #[arg(long)]
    gap: Option<f64>,
}

/// narrasub - narration to subtitle blocks
#[derive(Parser, Debug)]
#[command(name = "narrasub")]
#[command(version)]
#[command(about = "Turn narration text into SRT subtitle blocks")]
#[command(long_about = "narrasub splits narration into subtitle blocks under a character limit, \
times them from a reading pace and writes SRT.

EXAMPLES:
    narrasub generate scenes.json                  # Block mode, writes scenes.srt
    narrasub generate -m simple scenes.json        # Keep each scene's own timing
    narrasub generate --max-chars 200 story.txt    # Smaller blocks
    narrasub generate -f narrations/               # Every .json/.txt in a folder
    narrasub validate scenes.srt --max-chars 499   # Check block lengths and timing
    narrasub count scenes.srt                      # Count blocks
    narrasub completions bash > narrasub.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in narrasub.json by default. If the file doesn't
    exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "narrasub.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "narrasub", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level.into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Generate(args) => run_generate(config, args),
        Commands::Validate { srt_file, max_chars } => {
            if let Some(max_chars) = max_chars {
                config.segmentation.max_chars = max_chars;
            }
            run_validate(config, srt_file)
        }
        Commands::Count { srt_file } => {
            let controller = Controller::with_config(config)?;
            println!("{}", controller.count_file(&srt_file)?);
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    // Override config with CLI options if provided
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(max_chars) = args.max_chars {
        config.segmentation.max_chars = max_chars;
    }
    if let Some(wpm) = args.wpm {
        config.timing.words_per_minute = wpm;
    }
    if let Some(gap) = args.gap {
        config.timing.gap_between_blocks_secs = gap;
    }

    let controller = Controller::with_config(config)?;

    if args.input_path.is_file() {
        match controller.generate_file(&args.input_path, args.output.as_deref(), args.force_overwrite)? {
            GenerationOutcome::Written { output_path, .. } => info!("Success: {:?}", output_path),
            GenerationOutcome::Skipped { .. } => {}
        }
    } else if args.input_path.is_dir() {
        if args.output.is_some() {
            warn!("--output is ignored for directory input");
        }
        controller.run_folder(&args.input_path, args.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_validate(config: Config, srt_file: PathBuf) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let report = controller.validate_file(&srt_file)?;

    println!("Blocks: {}", report.block_count);
    for issue in &report.lengths.issues {
        println!("  {}", issue);
    }
    for result in report.timecodes.failed_entries() {
        for issue in &result.issues {
            println!("  Entry {}: {}", result.seq_num, issue);
        }
    }

    if report.passed() {
        info!("{:?} is valid", srt_file);
        Ok(())
    } else {
        error!(
            "{:?} failed validation: {} length issue(s), {} timecode issue(s)",
            srt_file,
            report.lengths.issues.len(),
            report.timecodes.total_issues
        );
        std::process::exit(1);
    }
}
