//! Error types for the analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while analyzing a source file.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("span {start}..{end} out of range for {len} byte source")]
    Span { start: usize, end: usize, len: usize },
    #[error("failed to encode output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
