//! File ingestion: the storage collaborator of the analytics core.
//!
//! Walks a path, extracts text per file type, and produces [`Document`]
//! values. Unreadable files never abort a run; they are collected into the
//! report and logged.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::warn;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{InsightsError, Result};
use crate::models::Document;
use crate::office;

/// File extensions the ingestion pipeline understands.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "pdf", "docx", "odt"];

/// Outcome of loading a path: the documents plus any per-file failures.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub documents: Vec<Document>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Collects all supported files under `path`, sorted for determinism.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Reads every supported file under `path` into documents.
///
/// Files are read in parallel; the resulting document order follows the
/// sorted file list, so repeated runs over an unchanged tree are stable.
pub fn load_documents(path: &Path) -> IngestReport {
    let files = collect_files(path);
    let results: Vec<(PathBuf, Result<Document>)> = files
        .into_par_iter()
        .map(|file| {
            let doc = read_document(&file);
            (file, doc)
        })
        .collect();

    let mut report = IngestReport::default();
    for (file, result) in results {
        match result {
            Ok(doc) => report.documents.push(doc),
            Err(e) => {
                warn!("skipping {}: {e}", file.display());
                report.failed.push((file, e.to_string()));
            }
        }
    }
    report
}

/// Reads a single file into a document, extracting text by extension.
pub fn read_document(path: &Path) -> Result<Document> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let text = match ext.as_str() {
        "txt" | "md" => fs::read_to_string(path)?,
        "pdf" => pdf_extract::extract_text(path).map_err(|e| InsightsError::Pdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?,
        "docx" => office::extract_docx(path)?,
        "odt" => office::extract_odt(path)?,
        _ => return Err(InsightsError::Unsupported(path.to_path_buf())),
    };
    Ok(Document {
        id: path.display().to_string(),
        content: text,
        processing_result: None,
        timestamp: file_timestamp(path),
    })
}

fn file_timestamp(path: &Path) -> String {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc3339())
        .unwrap_or_default()
}

/// Prints skipped files to stderr, mirroring the log output for
/// non-logging consumers.
pub fn report_failed_files(failed: &[(PathBuf, String)]) {
    if failed.is_empty() {
        return;
    }
    eprintln!("Warnings ({} file(s) skipped):", failed.len());
    for (path, reason) in failed {
        eprintln!("  {}: {}", path.display(), reason);
    }
}
