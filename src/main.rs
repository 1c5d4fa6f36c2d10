// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::sync::Arc;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use ytfrag::app_config::{self, Config};
use ytfrag::errors::ResolutionError;
use ytfrag::fetcher::YtDlpFetcher;
use ytfrag::fragment::Fragment;
use ytfrag::registry::{register_fragment_loaders, LoaderRegistry};

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
    /// Load one or more fragments and print their text
    Load(LoadArgs),

    /// List the registered fragment schemes
    Schemes,

    /// Generate shell completions for ytfrag
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// Fragment identifiers, e.g. youtube:dQw4w9WgXcQ or yt:es:https://youtu.be/dQw4w9WgXcQ
    #[arg(value_name = "IDENTIFIER", required = true)]
    identifiers: Vec<String>,

    /// Print a '# source: <url>' line before each fragment
    #[arg(long)]
    source: bool,

    /// Print fragments as JSON lines with content and source
    #[arg(long, conflicts_with = "source")]
    json: bool,

    /// Drop the per-minute [HH:MM:SS] markers
    #[arg(long)]
    no_timestamps: bool,

    /// Language used when an identifier has no prefix
    #[arg(short = 'L', long, env = "YTFRAG_LANGUAGE")]
    language: Option<String>,
}

/// ytfrag - YouTube subtitles as prompt fragments
#[derive(Parser, Debug)]
#[command(name = "ytfrag")]
#[command(version)]
#[command(about = "Load YouTube subtitles as prompt fragments")]
#[command(long_about = "ytfrag downloads the subtitles of a YouTube video with yt-dlp and prints them as plain text.

EXAMPLES:
    ytfrag load youtube:dQw4w9WgXcQ                              # English subtitles
    ytfrag load yt:es:dQw4w9WgXcQ                                # Spanish subtitles
    ytfrag load youtube:https://www.youtube.com/watch?v=dQw4w9WgXcQ
    ytfrag load --source youtube:es:https://youtu.be/dQw4w9WgXcQ
    ytfrag completions bash > ytfrag.bash                        # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    config file with --config-path. Without a config file the defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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
        // The boxed logger accepts everything, max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, colour) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Warn) {
        eprintln!("ytfrag: failed to initialize logging: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Err(err) = run(cli).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level((&level).into());
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "ytfrag", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level((&config.log_level).into());
    }

    match cli.command {
        Commands::Load(args) => {
            if let Some(language) = &args.language {
                config.default_language = language.clone();
            }
            if args.no_timestamps {
                config.output.include_timestamps = false;
            }

            config.validate().context("Configuration validation failed")?;
            run_load(&config, &args).await
        }
        Commands::Schemes => {
            let registry = build_registry(&config);
            for scheme in registry.schemes() {
                println!("{}", scheme);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn build_registry(config: &Config) -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();
    register_fragment_loaders(&mut registry, Arc::new(config.build_resolver()));
    registry
}

async fn run_load(config: &Config, args: &LoadArgs) -> Result<()> {
    let fetcher = YtDlpFetcher::from_config(&config.fetcher);
    if !fetcher.is_available().await {
        return Err(anyhow!(
            "'{}' could not be run, install yt-dlp or set fetcher.binary in the config",
            config.fetcher.binary
        ));
    }

    let registry = build_registry(config);
    debug!("Resolving {} fragment(s)", args.identifiers.len());

    // Each resolution is independent, results are printed in input order
    let results = futures::future::join_all(
        args.identifiers.iter().map(|identifier| registry.resolve(identifier)),
    )
    .await;

    let mut stdout = std::io::stdout().lock();
    let failures = write_fragments(&mut stdout, results, args)?;

    if failures > 0 {
        return Err(anyhow!(
            "{} of {} fragment(s) could not be loaded",
            failures,
            args.identifiers.len()
        ));
    }

    Ok(())
}

// @returns: Number of identifiers that failed
fn write_fragments<W: Write>(
    out: &mut W,
    results: Vec<Result<Fragment, ResolutionError>>,
    args: &LoadArgs,
) -> Result<usize> {
    let mut failures = 0;
    let mut printed_any = false;

    for (identifier, result) in args.identifiers.iter().zip(results) {
        match result {
            Ok(fragment) => {
                if args.json {
                    writeln!(out, "{}", serde_json::to_string(&fragment)?)?;
                    continue;
                }
                if printed_any {
                    writeln!(out)?;
                }
                printed_any = true;
                if args.source {
                    writeln!(out, "# source: {}", fragment.source)?;
                }
                writeln!(out, "{}", fragment)?;
            }
            Err(e) => {
                error!("{}: {}", identifier, e);
                failures += 1;
            }
        }
    }

    Ok(failures)
}
