use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code of the source document
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Path to the source JSON document
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,

    /// Directory the translated documents are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Languages to translate into, in processing order
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<TargetLanguage>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// A single output language
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TargetLanguage {
    // @field: Service language code, e.g. "DE" or "PT-BR"
    pub code: String,

    // @field: Human readable name used in progress output
    #[serde(default)]
    pub name: String,

    // @field: Formality hint forwarded to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<Formality>,
}

impl TargetLanguage {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            formality: None,
        }
    }

    // @returns: Configured name, or the ISO name of the code
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        language_utils::get_language_name(&self.code).unwrap_or_else(|_| self.code.clone())
    }
}

/// Formality levels accepted by the translation service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Default,
    More,
    Less,
    PreferMore,
    PreferLess,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::More => "more",
            Self::Less => "less",
            Self::PreferMore => "prefer_more",
            Self::PreferLess => "prefer_less",
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepL REST API
    #[default]
    DeepL,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepL => "DeepL",
        }
    }
}

/// How markup inside strings is treated by the service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TagHandling {
    #[default]
    Xml,
    Html,
    None,
}

impl TagHandling {
    // @returns: Wire value, or None when tags should not be parsed
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::Xml => Some("xml"),
            Self::Html => Some("html"),
            Self::None => None,
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Service credential
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL; derived from the key when empty
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Markup handling mode sent with every request
    #[serde(default)]
    pub tag_handling: TagHandling,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
            tag_handling: TagHandling::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Get the endpoint, falling back to the one matching the key's plan
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.provider {
            TranslationProvider::DeepL => {
                if is_free_api_key(&self.api_key) {
                    default_deepl_free_endpoint()
                } else {
                    default_deepl_pro_endpoint()
                }
            }
        }
    }
}

/// Free-plan keys carry a ":fx" suffix
pub fn is_free_api_key(api_key: &str) -> bool {
    api_key.trim().ends_with(":fx")
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
    "EN".to_string()
}

fn default_source_file() -> PathBuf {
    PathBuf::from("en.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_target_languages() -> Vec<TargetLanguage> {
    vec![
        TargetLanguage::new("DE", "German"),
        TargetLanguage::new("JA", "Japanese"),
        TargetLanguage::new("FR", "French"),
        TargetLanguage {
            formality: Some(Formality::PreferMore),
            ..TargetLanguage::new("AR", "Arabic")
        },
    ]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_deepl_free_endpoint() -> String {
    "https://api-free.deepl.com".to_string()
}

fn default_deepl_pro_endpoint() -> String {
    "https://api.deepl.com".to_string()
}

impl Config {
    /// Load a configuration file, or write and return the defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .context("Invalid source language")?;

        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        // Two codes differing only in case would write the same file
        let mut stems = HashSet::new();
        for target in &self.target_languages {
            language_utils::validate_language_code(&target.code)
                .with_context(|| format!("Invalid target language '{}'", target.code))?;

            let stem = language_utils::output_file_stem(&target.code);
            if !stems.insert(stem.clone()) {
                return Err(anyhow!("Duplicate target language: {}", stem));
            }
        }

        if self.translation.api_key.trim().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if !self.translation.endpoint.is_empty() {
            url::Url::parse(&self.translation.endpoint)
                .with_context(|| format!("Invalid endpoint URL: {}", self.translation.endpoint))?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            source_file: default_source_file(),
            output_dir: default_output_dir(),
            target_languages: default_target_languages(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
