/*!
 * Common test utilities for the lingojson test suite
 */

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use lingojson::app_config::{Config, TargetLanguage};
use lingojson::translation::Document;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample locale file with three levels of nesting
pub const SAMPLE_LOCALE: &str = r#"{
    "title": "Welcome",
    "count": 3,
    "enabled": true,
    "missing": null,
    "blank": "   ",
    "menu": {
        "open": "Open",
        "recent": {
            "empty": "No recent files",
            "max": 10
        }
    },
    "tags": ["a", "b"]
}"#;

/// Creates the sample locale file
pub fn create_sample_locale(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "en.json", SAMPLE_LOCALE)
}

/// Parse a JSON object literal into a document
pub fn document(json: &str) -> Document {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => map,
        other => panic!("test document is not an object: {:?}", other),
    }
}

/// Read a written document back
pub fn read_document(path: &Path) -> Result<Document> {
    Ok(document(&fs::read_to_string(path)?))
}

/// Config pointing at a temp directory, with a valid-looking key
pub fn test_config(source_file: &Path, output_dir: &Path, targets: &[&str]) -> Config {
    let mut config = Config::default();
    config.source_file = source_file.to_path_buf();
    config.output_dir = output_dir.to_path_buf();
    config.target_languages = targets.iter().map(|code| TargetLanguage::new(*code, "")).collect();
    config.translation.api_key = "00000000-0000-0000-0000-000000000000:fx".to_string();
    config
}
