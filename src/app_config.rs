use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Default source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation memory settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Batch queue settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Simulated latency settings
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Translation history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation memory configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MemoryConfig {
    // @field: Whether lookups and write-backs happen at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: Maximum number of stored entries
    #[serde(default = "default_memory_capacity")]
    pub capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_memory_capacity(),
        }
    }
}

/// Batch queue configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    // @field: Jobs kept after pruning
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,

    // @field: Delay between submission and the start of processing
    #[serde(default = "default_schedule_delay_ms")]
    pub schedule_delay_ms: u64,

    // @field: Items of one batch translated at the same time
    #[serde(default = "default_max_concurrent_items")]
    pub max_concurrent_items: usize,

    // @field: Fixed backoff between status polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    // @field: Polls before a caller gives up waiting
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_jobs: default_max_jobs(),
            schedule_delay_ms: default_schedule_delay_ms(),
            max_concurrent_items: default_max_concurrent_items(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

impl BatchConfig {
    /// Delay before processing starts
    pub fn schedule_delay(&self) -> Duration {
        Duration::from_millis(self.schedule_delay_ms)
    }

    /// Delay between polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Simulated provider and document latency
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    // @field: Lower bound of the per-request delay
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    // @field: Upper bound of the per-request delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    // @field: Fixed part of the document processing delay
    #[serde(default = "default_document_base_delay_ms")]
    pub document_base_delay_ms: u64,

    // @field: Additional document delay per KiB
    #[serde(default = "default_document_delay_per_kb_ms")]
    pub document_delay_per_kb_ms: u64,

    // @field: Hard cap on the document processing delay
    #[serde(default = "default_max_document_delay_ms")]
    pub max_document_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            document_base_delay_ms: default_document_base_delay_ms(),
            document_delay_per_kb_ms: default_document_delay_per_kb_ms(),
            max_document_delay_ms: default_max_document_delay_ms(),
        }
    }
}

impl SimulationConfig {
    /// Configuration with every delay set to zero
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            document_base_delay_ms: 0,
            document_delay_per_kb_ms: 0,
            max_document_delay_ms: 0,
        }
    }

    /// Simulated processing delay for a document of the given size
    pub fn document_delay(&self, size_bytes: usize) -> Duration {
        let kib = (size_bytes as u64).div_ceil(1024);
        let delay = self
            .document_base_delay_ms
            .saturating_add(self.document_delay_per_kb_ms.saturating_mul(kib));
        Duration::from_millis(delay.min(self.max_document_delay_ms))
    }
}

/// Translation history configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryConfig {
    // @field: Entries kept, newest first
    #[serde(default = "default_history_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_history_entries(),
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
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_true() -> bool {
    true
}

fn default_memory_capacity() -> usize {
    1000
}

fn default_max_jobs() -> usize {
    20
}

fn default_schedule_delay_ms() -> u64 {
    10
}

fn default_max_concurrent_items() -> usize {
    16
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_max_poll_attempts() -> usize {
    240
}

fn default_min_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    1300
}

fn default_document_base_delay_ms() -> u64 {
    1500
}

fn default_document_delay_per_kb_ms() -> u64 {
    20
}

fn default_max_document_delay_ms() -> u64 {
    5000
}

fn default_history_entries() -> usize {
    50
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if self.memory.capacity == 0 {
            return Err(anyhow!("Translation memory capacity must be greater than zero"));
        }
        if self.batch.max_jobs == 0 {
            return Err(anyhow!("Batch queue must keep at least one job"));
        }
        if self.batch.max_concurrent_items == 0 {
            return Err(anyhow!("Batch concurrency must be at least one item"));
        }
        if self.simulation.min_delay_ms > self.simulation.max_delay_ms {
            return Err(anyhow!(
                "Simulated delay range is inverted: {}ms > {}ms",
                self.simulation.min_delay_ms,
                self.simulation.max_delay_ms
            ));
        }

        Ok(())
    }

    /// Load a configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }
        Self::from_file(path)
    }

    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            memory: MemoryConfig::default(),
            batch: BatchConfig::default(),
            simulation: SimulationConfig::default(),
            history: HistoryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
