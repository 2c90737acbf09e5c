/*!
 * Nested JSON document translation.
 *
 * Walks a JSON object in key order and replaces every non-blank string
 * leaf with its translation. Objects are descended into at any depth;
 * numbers, booleans, nulls, arrays and blank strings are copied as they are.
 * The output always has the same keys, nesting and order as the input.
 */

use futures::future::{BoxFuture, FutureExt};
use log::warn;
use serde_json::{Map, Value};
use std::time::Instant;

use crate::app_config::TargetLanguage;
use crate::providers::Provider;
use super::core::{LogEntry, TranslationOutcome, TranslationService, TranslationStats};

/// A JSON document: an ordered map of keys to values
pub type Document = Map<String, Value>;

/// The translated copy of a document plus what happened on the way
#[derive(Debug)]
pub struct TranslatedDocument {
    /// Document with the same shape as the source
    pub document: Document,
    /// Counters for this target language
    pub stats: TranslationStats,
    /// One entry per leaf that kept its original text
    pub issues: Vec<LogEntry>,
}

/// Whether a string leaf is sent to the provider
pub fn is_translatable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Count the string leaves that would be sent to the provider
pub fn count_translatable_leaves(document: &Document) -> usize {
    document.values().map(|value| match value {
        Value::Object(child) => count_translatable_leaves(child),
        Value::String(text) if is_translatable(text) => 1,
        _ => 0,
    }).sum()
}

/// Mutable state threaded through one traversal
struct Walk<'f> {
    target_language: String,
    formality: Option<String>,
    completed: usize,
    total: usize,
    stats: TranslationStats,
    issues: Vec<LogEntry>,
    on_progress: &'f mut (dyn FnMut(usize, usize) + Send),
}

/// Translates whole documents through a `TranslationService`
pub struct DocumentTranslator<'a, P: Provider> {
    service: &'a TranslationService<P>,
}

impl<'a, P: Provider> DocumentTranslator<'a, P> {
    pub fn new(service: &'a TranslationService<P>) -> Self {
        Self { service }
    }

    /// Translate a document into the given language code
    pub async fn translate(&self, document: &Document, target_language: &str) -> TranslatedDocument {
        let target = TargetLanguage::new(target_language, "");
        self.translate_with_progress(document, &target, |_, _| {}).await
    }

    /// Translate a document, reporting `(completed, total)` after every submitted leaf
    pub async fn translate_with_progress<F>(
        &self,
        document: &Document,
        target: &TargetLanguage,
        mut on_progress: F,
    ) -> TranslatedDocument
    where
        F: FnMut(usize, usize) + Send,
    {
        let mut walk = Walk {
            target_language: target.code.trim().to_string(),
            formality: target.formality.map(|f| f.as_str().to_string()),
            completed: 0,
            total: count_translatable_leaves(document),
            stats: TranslationStats::new(),
            issues: Vec::new(),
            on_progress: &mut on_progress,
        };

        let translated = self.translate_map(document, String::new(), &mut walk).await;

        TranslatedDocument {
            document: translated,
            stats: walk.stats,
            issues: walk.issues,
        }
    }

    fn translate_map<'b>(
        &'b self,
        map: &'b Document,
        prefix: String,
        walk: &'b mut Walk<'_>,
    ) -> BoxFuture<'b, Document> {
        async move {
            let mut output = Map::with_capacity(map.len());

            for (key, value) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };

                let translated = match value {
                    Value::Object(child) => Value::Object(self.translate_map(child, path, walk).await),
                    Value::String(text) if is_translatable(text) => {
                        Value::String(self.translate_leaf(text, &path, walk).await)
                    }
                    Value::String(text) => {
                        walk.stats.skipped += 1;
                        Value::String(text.clone())
                    }
                    other => other.clone(),
                };

                output.insert(key.clone(), translated);
            }

            output
        }
        .boxed()
    }

    async fn translate_leaf(&self, text: &str, path: &str, walk: &mut Walk<'_>) -> String {
        let started = Instant::now();
        let outcome = self.service
            .translate_text(text, &walk.target_language, walk.formality.as_deref())
            .await;
        walk.stats.api_duration += started.elapsed();
        walk.stats.characters += text.chars().count();

        let result = match outcome {
            TranslationOutcome::Translated(translated) => {
                walk.stats.translated += 1;
                translated
            }
            TranslationOutcome::Fallback { original, reason } => {
                let message = format!(
                    "{} error for key '{}' ({}): {}. Keeping original text.",
                    self.service.provider().name(), path, walk.target_language, reason
                );
                warn!("{}", message);
                walk.issues.push(LogEntry::warn(message));
                walk.stats.fallbacks += 1;
                original
            }
        };

        walk.completed += 1;
        (walk.on_progress)(walk.completed, walk.total);

        result
    }
}
