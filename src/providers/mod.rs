/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for translation backends:
 * - DeepL: DeepL REST API (free and pro plans)
 * - Mock: In-process provider with scripted behavior, used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single string to translate
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Markup handling mode ("xml", "html"), None for plain text
    pub tag_handling: Option<String>,
    /// Formality hint ("more", "prefer_less", ...)
    pub formality: Option<String>,
}

impl TranslationRequest {
    /// Create a plain-text request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            tag_handling: None,
            formality: None,
        }
    }

    /// Set the markup handling mode
    pub fn tag_handling(mut self, tag_handling: Option<&str>) -> Self {
        self.tag_handling = tag_handling.map(str::to_string);
        self
    }

    /// Set the formality hint
    pub fn formality(mut self, formality: Option<&str>) -> Self {
        self.formality = formality.map(str::to_string);
        self
    }
}

/// Character usage for the current billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// Characters translated so far
    pub character_count: u64,
    /// Characters allowed in the period
    pub character_limit: u64,
}

impl Usage {
    /// Characters left before the limit is hit
    pub fn remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }

    /// Whether the limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.character_count >= self.character_limit
    }
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the document translator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a single string
    ///
    /// # Arguments
    /// * `request` - The text and language pair to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;

    /// Query the usage for the current billing period
    ///
    /// Also serves as the credential check: an invalid key fails here.
    async fn usage(&self) -> Result<Usage, ProviderError>;

    /// Display name of the provider
    fn name(&self) -> &str;
}

pub mod deepl;
pub mod mock;
