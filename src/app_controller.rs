use anyhow::{Result, Context, anyhow};
use log::{error, warn, info};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, TargetLanguage};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::deepl::DeepL;
use crate::translation::{Document, DocumentTranslator, LogEntry, TranslationService};

// @module: Application controller for document translation

/// Name of the issues log written next to the translated files
pub const ISSUES_LOG_FILE: &str = "lingojson.issues.log";

/// What a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Translated documents written to disk
    pub written: Vec<PathBuf>,
    /// Target codes whose document could not be written
    pub failed: Vec<String>,
    /// Leaves that kept their original text, over all languages
    pub fallbacks: usize,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the workflow against the provider selected in the config
    pub async fn run(&self) -> Result<RunSummary> {
        let provider = DeepL::from_config(&self.config.translation)
            .context("Failed to create the DeepL client")?;
        self.run_with_provider(provider).await
    }

    /// Run the workflow with an explicit provider
    ///
    /// Checks the quota, loads the source document, then writes one
    /// translated document per target language. Nothing is written when the
    /// quota check or the source document fails.
    pub async fn run_with_provider<P: Provider>(&self, provider: P) -> Result<RunSummary> {
        let start_time = Instant::now();

        let service = TranslationService::new(provider, &self.config.source_language)
            .with_tag_handling(self.config.translation.tag_handling.as_param());
        let provider_name = service.provider().name().to_string();

        match service.check_usage().await {
            Ok(usage) => {
                info!(
                    "{} API key is valid. Characters remaining this period: {}",
                    provider_name,
                    usage.remaining()
                );
            }
            Err(AppError::UsageLimitReached { used, limit }) => {
                warn!("{} usage limit reached ({} of {} characters). Cannot proceed.", provider_name, used, limit);
                return Err(AppError::UsageLimitReached { used, limit }.into());
            }
            Err(e) => {
                error!("Error initializing {} translator: {}", provider_name, e);
                return Err(anyhow!(e).context("Please check your API key"));
            }
        }

        let source_file = &self.config.source_file;
        let document = FileManager::load_document(source_file)?;
        info!("Successfully loaded source file: {}", source_file.display());

        let mut summary = RunSummary::default();
        let mut issues: Vec<LogEntry> = Vec::new();

        for target in &self.config.target_languages {
            if language_utils::language_codes_match(&target.code, &self.config.source_language) {
                warn!("Target {} is the same language as the source {}", target.code, self.config.source_language);
            }

            info!("--- Translating to {} ({}) ---", target.display_name(), target.code.to_uppercase());

            let translated = self.translate_with_progress(&service, &document, target).await;
            summary.fallbacks += translated.stats.fallbacks;
            issues.extend(translated.issues);
            info!("{}: {}", target.code.to_uppercase(), translated.stats.summary());

            let output_path = FileManager::generate_output_path(&self.config.output_dir, &target.code);
            match FileManager::write_document(&output_path, &translated.document) {
                Ok(()) => {
                    info!("Successfully saved translation to {}", output_path.display());
                    summary.written.push(output_path);
                }
                Err(e) => {
                    error!("Error saving file {}: {}", output_path.display(), e);
                    issues.push(LogEntry::error(e.to_string()));
                    summary.failed.push(target.code.clone());
                }
            }
        }

        if !issues.is_empty() {
            let log_file_path = self.config.output_dir.join(ISSUES_LOG_FILE);
            let context = format!(
                "{} {} -> {} ({})",
                provider_name,
                self.config.source_language,
                self.config.target_languages.iter().map(|t| t.code.as_str()).collect::<Vec<_>>().join(", "),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );

            if let Err(e) = self.write_logs_to_file(&issues, &log_file_path, &context) {
                warn!("Failed to write logs to file: {}", e);
            } else {
                info!("Translation completed with {} issues, see {}", issues.len(), log_file_path.display());
            }
        }

        info!(
            "Finished: {} of {} files written in {}",
            summary.written.len(),
            self.config.target_languages.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Translate one target language with a progress bar
    async fn translate_with_progress<P: Provider>(
        &self,
        service: &TranslationService<P>,
        document: &Document,
        target: &TargetLanguage,
    ) -> crate::translation::TranslatedDocument {
        let total = crate::translation::count_translatable_leaves(document) as u64;
        let progress_bar = ProgressBar::new(total);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} strings ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message(target.code.to_uppercase());

        let pb = progress_bar.clone();
        let translated = DocumentTranslator::new(service)
            .translate_with_progress(document, target, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();
        translated
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

    /// Append translation issues to a log file
    fn write_logs_to_file(&self, logs: &[LogEntry], file_path: &Path, translation_context: &str) -> Result<()> {
        let mut log_content = String::new();
        log_content.push_str(&format!("Context: {}\n", translation_context));

        for entry in logs {
            log_content.push_str(&format!("[{}] {}\n", entry.level, entry.message));
        }

        FileManager::append_to_log_file(file_path, log_content.trim_end())?;

        Ok(())
    }
}
