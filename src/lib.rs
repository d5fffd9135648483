//! gocodegraph - declaration and call-site inventory for Go source files.
//!
//! Given one Go file, gocodegraph records every top-level function, method,
//! type and import together with the names called from inside each function
//! and method body. Call targets are recorded as written at the call site;
//! nothing is resolved across files.
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter parsing, declaration collection, call attribution
//! - `report`: output formatting (JSON table, node/link graph)
//! - `cli`: argument parsing and exit codes
//! - `error`: the crate error type

pub mod analysis;
pub mod cli;
pub mod error;
pub mod report;

pub use analysis::{
    analyze_file, analyze_source, Declaration, DeclarationKind, DeclarationTable, GoAnalyzer,
    LanguageAnalyzer, ParsedFile, Span,
};
pub use error::{AnalyzeError, Result};
