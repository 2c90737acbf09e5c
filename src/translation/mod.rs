/*!
 * Translation of JSON locale documents.
 *
 * - `core`: Per-string translation service and outcome types
 * - `document`: Recursive traversal producing a translated document
 */

// Re-export main types for easier usage
pub use self::core::{LogEntry, TranslationOutcome, TranslationService, TranslationStats};
pub use self::document::{
    count_translatable_leaves, is_translatable, Document, DocumentTranslator, TranslatedDocument,
};

// Submodules
pub mod core;
pub mod document;
