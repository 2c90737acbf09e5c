use anyhow::{Result, Context};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::errors::DocumentError;
use crate::language_utils;
use crate::translation::Document;

// @module: File and directory utilities

/// Indentation of written documents
const DOCUMENT_INDENT: &[u8] = b"    ";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a translated document, e.g. "out/pt-br.json"
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, target_language: &str) -> PathBuf {
        let filename = format!("{}.json", language_utils::output_file_stem(target_language));
        output_dir.as_ref().join(filename)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Append content to a log file with timestamp
    pub fn append_to_log_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path.as_ref()))?;

        writeln!(file, "[{}] {}", timestamp, content)
            .with_context(|| format!("Failed to write to log file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a JSON document whose root is an object
    pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, DocumentError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DocumentError::NotFound(path.to_path_buf())
            } else {
                DocumentError::Read { path: path.to_path_buf(), source: e }
            }
        })?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| DocumentError::Parse { path: path.to_path_buf(), source: e })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DocumentError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Render a document with 4-space indentation, non-ASCII left as is
    pub fn render_document(document: &Document) -> serde_json::Result<String> {
        let mut buffer = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(DOCUMENT_INDENT));
        document.serialize(&mut serializer)?;

        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write a document to disk, creating the parent directory if needed
    pub fn write_document<P: AsRef<Path>>(path: P, document: &Document) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let rendered = Self::render_document(document)
            .map_err(|e| DocumentError::Write { path: path.to_path_buf(), message: e.to_string() })?;

        Self::write_to_file(path, &rendered)
            .map_err(|e| DocumentError::Write { path: path.to_path_buf(), message: format!("{:#}", e) })
    }
}
