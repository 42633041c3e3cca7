// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use lingomem::app_config::{self, Config};
use lingomem::language_utils::{SUPPORTED_LANGUAGES, format_language_pair};
use lingomem::session::{PreferenceUpdate, PreferencesStore, UserPreferences};
use lingomem::translation::{BatchQueue, BatchStatus, Domain, DocumentTranslator, FormalityLevel, TranslationService};
use lingomem::providers::simulated::SimulatedProvider;

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

/// Options shared by every translating command
#[derive(Args, Debug, Clone)]
struct TranslationArgs {
    /// Source language code (detected when omitted)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (defaults to the configured one)
    #[arg(short, long)]
    target_language: Option<String>,

    /// Terminology domain (general, technical, medical, legal, financial, academic)
    #[arg(short, long)]
    domain: Option<Domain>,

    /// Formality level (formal, neutral, informal)
    #[arg(long)]
    formality: Option<FormalityLevel>,

    /// Do not consult or feed the translation memory
    #[arg(long)]
    no_memory: bool,
}

impl TranslationArgs {
    // @returns: Overrides given on the command line; an explicit source disables detection
    fn preference_update(&self) -> PreferenceUpdate {
        PreferenceUpdate {
            default_source_language: self.source_language.clone(),
            default_target_language: self.target_language.clone(),
            auto_detect: self.source_language.as_ref().map(|_| false),
            domain: self.domain,
            formality_level: self.formality,
            use_translation_memory: self.no_memory.then_some(false),
        }
    }

    // @returns: Session preferences from config with command line overrides
    fn preferences(&self, config: &Config) -> UserPreferences {
        let store = PreferencesStore::new(UserPreferences::from_config(config));
        store.update(self.preference_update())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single text
    Translate {
        /// Text to translate
        text: String,

        #[command(flatten)]
        args: TranslationArgs,
    },

    /// Translate several texts as one background batch and poll until done
    Batch {
        /// Texts to translate
        #[arg(required = true)]
        texts: Vec<String>,

        #[command(flatten)]
        args: TranslationArgs,
    },

    /// Translate a text document (txt, md, html, csv)
    Document {
        /// Document to translate
        input_path: PathBuf,

        /// Directory for the translated file (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        args: TranslationArgs,
    },

    /// List supported languages
    Languages,

    /// Generate shell completions for lingomem
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lingomem - simulated translation with translation memory
///
/// Translates texts, batches and documents with a simulated provider,
/// reusing earlier results from an in-memory translation memory.
#[derive(Parser, Debug)]
#[command(name = "lingomem")]
#[command(version)]
#[command(about = "Simulated translation with translation memory and batch jobs")]
#[command(long_about = "lingomem translates texts with a simulated provider, reusing earlier results from a translation memory.

EXAMPLES:
    lingomem translate \"Hello, world!\" -t es
    lingomem translate \"The diagnosis\" -s en -t es --domain medical
    lingomem batch \"one\" \"two\" \"three\" -s en -t fr
    lingomem document notes.txt -t de
    lingomem languages
    lingomem completions bash > lingomem.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't
    exist, a default one is created automatically.")]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lingomem", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)
        .with_context(|| format!("Failed to load configuration from {}", cli.config_path))?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let service = TranslationService::with_provider(
        Arc::new(SimulatedProvider::from_config(&config.simulation)),
        &config,
    );

    match cli.command {
        Commands::Translate { text, args } => run_translate(&service, &config, &text, &args).await,
        Commands::Batch { texts, args } => run_batch(service, &config, texts, &args).await,
        Commands::Document { input_path, output_dir, args } => {
            run_document(service, &config, &input_path, output_dir, &args).await
        }
        Commands::Languages => {
            for language in SUPPORTED_LANGUAGES {
                println!("{}\t{}", language.code, language.name);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_translate(service: &TranslationService, config: &Config, text: &str, args: &TranslationArgs) -> Result<()> {
    let preferences = args.preferences(config);
    let request = preferences.request_for(text);
    let target = request.target_language.clone();

    let response = service.translate(&request).await?;
    let source = response.detected_language.clone().unwrap_or_else(|| "?".to_string());
    info!(
        "{} (confidence {:.2}{})",
        format_language_pair(&source, &target),
        response.confidence,
        if response.from_memory { ", from memory" } else { "" }
    );
    println!("{}", response.translated_text);
    Ok(())
}

async fn run_batch(service: TranslationService, config: &Config, texts: Vec<String>, args: &TranslationArgs) -> Result<()> {
    let preferences = args.preferences(config);
    let queue = BatchQueue::new(service, &config.batch);
    let submission = queue.submit(
        texts,
        &preferences.default_target_language,
        preferences.source_language().as_deref(),
        preferences.translation_options(),
    )?;
    info!("Submitted batch {} ({})", submission.id, submission.status);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .map_err(|e| anyhow!("Invalid progress template: {}", e))?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut attempts = 0;
    let report = queue
        .poll_until_settled_with(
            &submission.id,
            config.batch.poll_interval(),
            config.batch.max_poll_attempts,
            |report| {
                attempts += 1;
                spinner.set_message(format!("batch {}", report.status));
            },
        )
        .await;
    spinner.finish_and_clear();

    match report.status {
        BatchStatus::Completed => {
            for response in report.results.unwrap_or_default() {
                println!("{}", response.translated_text);
            }
            Ok(())
        }
        BatchStatus::Failed => Err(anyhow!(
            "Batch {} failed: {}",
            report.id,
            report.error.unwrap_or_else(|| "unknown error".to_string())
        )),
        status => Err(anyhow!("Batch {} still {} after {} polls", report.id, status, attempts)),
    }
}

async fn run_document(
    service: TranslationService,
    config: &Config,
    input_path: &Path,
    output_dir: Option<PathBuf>,
    args: &TranslationArgs,
) -> Result<()> {
    let preferences = args.preferences(config);
    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let file_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", input_path.display()))?;

    let translator = DocumentTranslator::from_config(service, config);
    let document = translator
        .translate_document(
            file_name,
            &bytes,
            preferences.source_language().as_deref(),
            &preferences.default_target_language,
            preferences.translation_options(),
        )
        .await?;

    let output_dir = output_dir
        .or_else(|| input_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)?;
    let output_path = output_dir.join(&document.file_name);
    std::fs::write(&output_path, &document.content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Translated ~{} words into {}",
        document.word_count,
        output_path.display()
    );
    Ok(())
}
