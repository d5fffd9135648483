//! AST-backed declaration and call-site analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ Source file │────▶│ GoAnalyzer   │────▶│ ParsedFile       │
//! └─────────────┘     │ (tree-sitter)│     │ (tree + bytes)   │
//!                     └──────────────┘     └──────────────────┘
//!                                                   │
//!                          ┌────────────────────────┤
//!                          ▼                        ▼
//!                  ┌───────────────┐       ┌─────────────────┐
//!                  │ Collector     │──────▶│ Associator      │
//!                  │ (declarations)│ table │ (call sites)    │
//!                  └───────────────┘       └─────────────────┘
//!                                                   │
//!                                                   ▼
//!                                          DeclarationTable
//! ```
//!
//! Declarations are fully collected before any call is attributed, so a
//! call may name a function declared further down the file.

mod facts;
mod languages;
pub mod span;
mod traits;

use std::fs;
use std::path::Path;

pub use facts::{Declaration, DeclarationKind, DeclarationTable, Span};
pub use languages::{callee_name, go_analyzer, receiver_type_name, GoAnalyzer};
pub use traits::{LanguageAnalyzer, ParsedFile};

use crate::error::{AnalyzeError, Result};

/// Analyze Go source bytes. `path` is only used in position strings and
/// error messages.
pub fn analyze_source(path: &Path, source: &[u8]) -> Result<DeclarationTable> {
    let analyzer = go_analyzer();
    let parsed = analyzer.parse(path, source)?;
    analyzer.analyze(&parsed)
}

/// Read and analyze a Go source file.
pub fn analyze_file(path: &Path) -> Result<DeclarationTable> {
    let source = fs::read(path).map_err(|source| AnalyzeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    analyze_source(path, &source)
}
