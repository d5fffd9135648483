//! Fact structures extracted from AST analysis.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Serialize, Serializer};

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column in bytes (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column in bytes (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }

    /// Whether `offset` lies strictly inside this span.
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start_byte < offset && offset < self.end_byte
    }

    /// Human-readable `file:line:column` locator of the span start.
    pub fn position(&self, path: &str) -> String {
        format!("{}:{}:{}", path, self.start_line, self.start_col)
    }
}

/// Kind of top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Method,
    Type,
    Import,
}

impl DeclarationKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
            DeclarationKind::Type => "type",
            DeclarationKind::Import => "import",
        }
    }

    /// Check if this is a callable (function or method).
    pub fn is_callable(&self) -> bool {
        matches!(self, DeclarationKind::Function | DeclarationKind::Method)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DeclarationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A declaration extracted from source code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Declaration {
    /// Table key: bare identifier, `Receiver.Method`, or the quoted import path.
    pub name: String,
    pub kind: DeclarationKind,
    /// Callee names in order of appearance. Never populated for imports.
    pub calls: Vec<String>,
    /// Verbatim source text of the declaration node.
    pub code: String,
    /// `file:line:column` of the declaration start.
    pub position: String,
    /// Source span of the declaration node.
    #[serde(skip)]
    pub span: Span,
}

impl Declaration {
    /// For methods, split the key into receiver type and method name.
    pub fn receiver_and_method(&self) -> Option<(&str, &str)> {
        if self.kind != DeclarationKind::Method {
            return None;
        }
        self.name.split_once('.')
    }
}

/// The declaration table for a single file, keyed by declaration name.
///
/// Serializes as a plain JSON object of `name -> declaration`; keys are
/// emitted in sorted order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    /// Package name from the file's package clause.
    pub package: Option<String>,
    entries: BTreeMap<String, Declaration>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration under its name.
    ///
    /// A later declaration with the same name replaces the earlier one
    /// entirely; the replaced entry is returned.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        self.entries.insert(declaration.name.clone(), declaration)
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Append `callee` to the call list of the entry named `caller`.
    ///
    /// Returns false (and records nothing) when `caller` is not in the table
    /// or names an import.
    pub fn record_call(&mut self, caller: &str, callee: &str) -> bool {
        match self.entries.get_mut(caller) {
            Some(decl) if decl.kind != DeclarationKind::Import => {
                decl.calls.push(callee.to_string());
                true
            }
            _ => false,
        }
    }

    /// Iterate declarations in key order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Declaration> {
        self.entries.values()
    }

    /// Get all functions and methods.
    pub fn callables(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.values().filter(|d| d.kind.is_callable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DeclarationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
