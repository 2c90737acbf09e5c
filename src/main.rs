// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use lingojson::app_config::{self, Config, TargetLanguage};
use lingojson::app_controller::Controller;

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
    /// Translate the source document into every target language (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for lingojson
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Source JSON document
    #[arg(short = 'i', long, value_name = "FILE")]
    source_file: Option<PathBuf>,

    /// Source language code (e.g., 'EN')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language codes, repeatable or comma separated (e.g., -t DE -t PT-BR)
    #[arg(short, long = "target", value_delimiter = ',')]
    targets: Vec<String>,

    /// Directory for the translated documents
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// DeepL API key
    #[arg(short = 'k', long, env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// lingojson - translate JSON locale files with DeepL
#[derive(Parser, Debug)]
#[command(name = "lingojson")]
#[command(version)]
#[command(about = "Translate nested JSON locale files with DeepL")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "lingojson reads a nested JSON document, translates every non-empty string value \
with DeepL and writes one document per target language (de.json, ja.json, ...).

EXAMPLES:
    lingojson                                   # Translate using conf.json
    lingojson -i locales/en.json -o locales     # Pick source file and output directory
    lingojson -t DE -t PT-BR                    # Override the target languages
    DEEPL_AUTH_KEY=... lingojson                # Pass the API key through the environment
    lingojson completions bash > lingojson.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is written and used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: TranslateArgs,
}

// @struct: Custom logger implementation
//
// Filtering follows log::max_level(), which is raised or lowered once the
// config is loaded.
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "⚠️ ",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lingojson", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.args).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&options.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", options.config_path.display());
    }

    apply_overrides(&mut config, &options);

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    let summary = controller.run().await?;

    if !summary.failed.is_empty() {
        warn!("Could not write translations for: {}", summary.failed.join(", "));
    }
    if summary.fallbacks > 0 {
        info!("{} strings kept their original text", summary.fallbacks);
    }

    Ok(())
}

/// Override config values with the ones given on the command line
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(source_file) = &options.source_file {
        config.source_file = source_file.clone();
    }

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if !options.targets.is_empty() {
        // Keep names and formality of targets already in the config
        config.target_languages = options.targets.iter()
            .filter(|code| !code.trim().is_empty())
            .map(|code| {
                config.target_languages.iter()
                    .find(|t| t.code.eq_ignore_ascii_case(code.trim()))
                    .cloned()
                    .unwrap_or_else(|| TargetLanguage::new(code.trim(), ""))
            })
            .collect();
    }
}
