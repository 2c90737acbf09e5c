/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which turns single
 * strings into translation requests for a provider and folds the provider's
 * answer into a `TranslationOutcome`.
 */

use log::debug;
use std::time::{Duration, Instant};

use crate::errors::{AppError, TranslationError};
use crate::providers::{Provider, TranslationRequest, Usage};

/// Result of translating one leaf
#[derive(Debug)]
pub enum TranslationOutcome {
    /// The provider returned a translation
    Translated(String),
    /// The provider failed; the original text is kept
    Fallback {
        original: String,
        reason: TranslationError,
    },
}

impl TranslationOutcome {
    /// The text to put in the output document
    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) => text,
            Self::Fallback { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Log entry for capturing translation issues
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
}

impl LogEntry {
    pub fn warn(message: impl Into<String>) -> Self {
        Self { level: "WARN".to_string(), message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: "ERROR".to_string(), message: message.into() }
    }
}

/// Per-language statistics of a document translation
#[derive(Debug, Clone)]
pub struct TranslationStats {
    /// Leaves replaced by a translation
    pub translated: usize,
    /// Leaves kept because the provider failed
    pub fallbacks: usize,
    /// Blank strings left as they were
    pub skipped: usize,
    /// Characters submitted to the provider
    pub characters: usize,
    /// Start time of the translation
    pub start_time: Instant,
    /// Time spent waiting on the provider
    pub api_duration: Duration,
}

impl Default for TranslationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationStats {
    pub fn new() -> Self {
        Self {
            translated: 0,
            fallbacks: 0,
            skipped: 0,
            characters: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
        }
    }

    /// Leaves that were submitted to the provider
    pub fn submitted(&self) -> usize {
        self.translated + self.fallbacks
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} translated, {} kept after errors, {} blank skipped, {} characters sent in {:.2}s ({:.2}s waiting on the provider)",
            self.translated,
            self.fallbacks,
            self.skipped,
            self.characters,
            self.start_time.elapsed().as_secs_f64(),
            self.api_duration.as_secs_f64()
        )
    }
}

/// Translation service bound to one provider and one source language
#[derive(Debug)]
pub struct TranslationService<P: Provider> {
    /// Provider implementation
    provider: P,

    /// Source language code of every request
    source_language: String,

    /// Markup handling mode sent with every request
    tag_handling: Option<String>,
}

impl<P: Provider> TranslationService<P> {
    /// Create a new translation service
    pub fn new(provider: P, source_language: impl Into<String>) -> Self {
        Self {
            provider,
            source_language: source_language.into(),
            tag_handling: None,
        }
    }

    /// Set the markup handling mode
    pub fn with_tag_handling(mut self, tag_handling: Option<&str>) -> Self {
        self.tag_handling = tag_handling.map(str::to_string);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Check the provider's quota before any translation starts
    ///
    /// Fails when the credential is rejected or the limit is reached.
    pub async fn check_usage(&self) -> Result<Usage, AppError> {
        let usage = self.provider.usage().await?;

        if usage.limit_reached() {
            return Err(AppError::UsageLimitReached {
                used: usage.character_count,
                limit: usage.character_limit,
            });
        }

        Ok(usage)
    }

    /// Translate a single string, never failing
    ///
    /// Provider errors and empty answers become a `Fallback` carrying the
    /// original text.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        formality: Option<&str>,
    ) -> TranslationOutcome {
        let request = TranslationRequest::new(text, &self.source_language, target_language)
            .tag_handling(self.tag_handling.as_deref())
            .formality(formality);

        match self.provider.translate(&request).await {
            Ok(translated) if translated.trim().is_empty() => TranslationOutcome::Fallback {
                original: text.to_string(),
                reason: TranslationError::EmptyResponse,
            },
            Ok(translated) => {
                debug!("{} -> {}: {} chars translated", self.source_language, target_language, text.len());
                TranslationOutcome::Translated(translated)
            }
            Err(e) => TranslationOutcome::Fallback {
                original: text.to_string(),
                reason: TranslationError::Provider(e),
            },
        }
    }
}
