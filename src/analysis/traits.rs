//! Core traits for language analysis.

use std::path::Path;

use super::{DeclarationTable, Span};
use crate::error::Result;

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// Both analysis passes walk the same tree, so it is parsed once and
/// shared read-only.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path as given by the caller, used in position strings.
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// `file:line:column` locator for the start of a node.
    pub fn position(&self, node: tree_sitter::Node) -> String {
        Span::from_node(node).position(&self.path)
    }
}

/// Language-specific analyzer trait.
///
/// # Thread Safety
///
/// Note: tree_sitter::Parser is not Sync, so implementations should
/// create parsers as needed.
pub trait LanguageAnalyzer: Send + Sync {
    /// Parse a source file into a tree-sitter tree.
    ///
    /// Source that does not form a valid tree for the grammar is rejected
    /// with a parse error naming the first offending location.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile>;

    /// Build the full declaration table: declarations first, then call sites.
    fn analyze(&self, parsed: &ParsedFile) -> Result<DeclarationTable>;
}
