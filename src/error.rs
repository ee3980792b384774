//! Error types for corpus_insights.
//!
//! The analytic components themselves are pure and infallible; errors only
//! arise in the plumbing around them (file ingestion, office/PDF extraction,
//! export).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for ingestion and export operations.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF text extraction failed.
    #[error("pdf extraction failed for {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    /// DOCX/ODT text extraction failed.
    #[error("office extraction failed for {path}: {reason}")]
    Office { path: PathBuf, reason: String },

    /// File extension not handled by the ingestion pipeline.
    #[error("unsupported file type: {0}")]
    Unsupported(PathBuf),

    /// Serde JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for corpus_insights operations.
pub type Result<T> = std::result::Result<T, InsightsError>;
