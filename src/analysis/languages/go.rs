//! Go language analyzer using tree-sitter.
//!
//! Builds the declaration table for one Go file in two read-only passes
//! over the same tree:
//! - the collector registers functions, methods, types and imports
//! - the associator attributes every named call site to the function or
//!   method whose span encloses it

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, TreeCursor};

use crate::analysis::{
    span, Declaration, DeclarationKind, DeclarationTable, LanguageAnalyzer, ParsedFile, Span,
};
use crate::error::{AnalyzeError, Result};

/// Tree-sitter query for package declaration.
const PACKAGE_QUERY: &str = r#"
(package_clause
  (package_identifier) @package_name
)
"#;

/// Longest snippet of offending source quoted in a syntax error.
const ERROR_SNIPPET_LEN: usize = 32;

/// Go language analyzer.
pub struct GoAnalyzer {
    language: Language,
}

impl GoAnalyzer {
    /// Create a new Go analyzer.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new parser for this thread.
    fn create_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Extract the package name from a parsed file.
    fn extract_package(&self, parsed: &ParsedFile) -> Option<String> {
        let query = Query::new(&self.language, PACKAGE_QUERY).ok()?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        if let Some(m) = matches.next() {
            for capture in m.captures {
                let name = query.capture_names()[capture.index as usize];
                if name == "package_name" {
                    return Some(parsed.node_text(capture.node).to_string());
                }
            }
        }
        None
    }

    /// Phase 1: register every function, method, type and import.
    ///
    /// Nodes are visited in document pre-order; a later declaration that
    /// maps to an existing name replaces the earlier entry.
    pub fn collect_declarations(&self, parsed: &ParsedFile) -> Result<DeclarationTable> {
        let mut table = DeclarationTable::new();
        table.package = self.extract_package(parsed);

        for node in preorder(parsed.tree.root_node()) {
            let declaration = match node.kind() {
                "function_declaration" | "method_declaration" => {
                    self.callable_declaration(parsed, node)?
                }
                "type_spec" | "type_alias" => self.type_declaration(parsed, node)?,
                "import_spec" => self.import_declaration(parsed, node),
                _ => None,
            };

            if let Some(declaration) = declaration {
                log::trace!(
                    "{} {} at {}",
                    declaration.kind,
                    declaration.name,
                    declaration.position
                );
                if let Some(previous) = table.insert(declaration) {
                    log::debug!(
                        "{} at {} replaced by a later declaration of the same name",
                        previous.name,
                        previous.position
                    );
                }
            }
        }

        log::debug!(
            "collected {} declarations from {} (package {})",
            table.len(),
            parsed.path,
            table.package.as_deref().unwrap_or("?")
        );
        Ok(table)
    }

    /// Phase 2: append each call site's callee name to its enclosing
    /// function or method.
    ///
    /// Calls at file scope, calls with no derivable name, and calls inside a
    /// declaration whose table entry was replaced by a later one are dropped.
    pub fn associate_calls(&self, parsed: &ParsedFile, table: &mut DeclarationTable) {
        let root = parsed.tree.root_node();

        // Function declarations only occur at the top level in Go.
        let enclosures: Vec<(Span, Option<String>)> = root
            .named_children(&mut root.walk())
            .filter(|n| matches!(n.kind(), "function_declaration" | "method_declaration"))
            .map(|n| {
                let name = callable_identity(parsed, n).map(|(name, _)| name);
                (Span::from_node(n), name)
            })
            .collect();

        let mut attributed = 0usize;
        for node in preorder(root).filter(|n| n.kind() == "call_expression") {
            let Some(callee) = callee_name(node, &parsed.source) else {
                continue;
            };

            let offset = node.start_byte();
            let enclosing = enclosures
                .iter()
                .find(|(span, _)| span.strictly_contains(offset));

            let Some((span, Some(caller))) = enclosing else {
                log::trace!("dropping call {} at byte {}: no enclosing declaration", callee, offset);
                continue;
            };

            // Calls belong to the declaration starting at this offset, not to
            // whatever later declaration took over the name.
            let owns_entry = table
                .get(caller)
                .is_some_and(|d| d.span.start_byte == span.start_byte);
            if owns_entry && table.record_call(caller, &callee) {
                attributed += 1;
            } else {
                log::trace!("dropping call {} inside shadowed {}", callee, caller);
            }
        }

        log::debug!("attributed {} call sites in {}", attributed, parsed.path);
    }

    /// Build a function or method entry.
    fn callable_declaration(
        &self,
        parsed: &ParsedFile,
        node: Node,
    ) -> Result<Option<Declaration>> {
        let Some((name, kind)) = callable_identity(parsed, node) else {
            log::warn!(
                "skipping {} with unexpected shape at {}",
                node.kind(),
                parsed.position(node)
            );
            return Ok(None);
        };

        Ok(Some(Declaration {
            name,
            kind,
            calls: Vec::new(),
            code: span::slice(&parsed.source, node.start_byte(), node.end_byte())?,
            position: parsed.position(node),
            span: Span::from_node(node),
        }))
    }

    /// Build a type entry from a `type_spec` or `type_alias` node.
    fn type_declaration(&self, parsed: &ParsedFile, node: Node) -> Result<Option<Declaration>> {
        let Some(name_node) = node.child_by_field_name("name") else {
            log::warn!("skipping type spec without a name at {}", parsed.position(node));
            return Ok(None);
        };

        Ok(Some(Declaration {
            name: parsed.node_text(name_node).to_string(),
            kind: DeclarationKind::Type,
            calls: Vec::new(),
            code: span::slice(&parsed.source, node.start_byte(), node.end_byte())?,
            position: parsed.position(node),
            span: Span::from_node(node),
        }))
    }

    /// Build an import entry. Name and code are the quoted path literal.
    fn import_declaration(&self, parsed: &ParsedFile, node: Node) -> Option<Declaration> {
        let Some(path_node) = node.child_by_field_name("path") else {
            log::warn!("skipping import spec without a path at {}", parsed.position(node));
            return None;
        };

        let literal = parsed.node_text(path_node).to_string();
        Some(Declaration {
            name: literal.clone(),
            kind: DeclarationKind::Import,
            calls: Vec::new(),
            code: literal,
            position: parsed.position(node),
            span: Span::from_node(node),
        })
    }
}

impl Default for GoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for GoAnalyzer {
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile> {
        let display = path.to_string_lossy().to_string();
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or_else(|| AnalyzeError::Parse {
            path: display.clone(),
            line: 1,
            column: 1,
            message: "parser produced no syntax tree".to_string(),
        })?;

        let parsed = ParsedFile {
            tree,
            source: source.to_vec(),
            path: display,
        };

        if let Some(bad) = first_syntax_error(parsed.tree.root_node()) {
            let start = bad.start_position();
            let message = if bad.is_missing() {
                format!("expected {}", bad.kind())
            } else {
                format!("syntax error near {:?}", error_snippet(parsed.node_text(bad)))
            };
            return Err(AnalyzeError::Parse {
                path: parsed.path.clone(),
                line: start.row + 1,
                column: start.column + 1,
                message,
            });
        }

        if self.extract_package(&parsed).is_none() {
            return Err(AnalyzeError::Parse {
                path: parsed.path.clone(),
                line: 1,
                column: 1,
                message: "expected 'package' clause".to_string(),
            });
        }

        Ok(parsed)
    }

    fn analyze(&self, parsed: &ParsedFile) -> Result<DeclarationTable> {
        let mut table = self.collect_declarations(parsed)?;
        self.associate_calls(parsed, &mut table);
        Ok(table)
    }
}

/// Table key and kind for a function or method declaration node.
///
/// Returns None for a method whose receiver has no declared type.
fn callable_identity(parsed: &ParsedFile, node: Node) -> Option<(String, DeclarationKind)> {
    let name = parsed.node_text(node.child_by_field_name("name")?);

    if node.kind() != "method_declaration" {
        return Some((name.to_string(), DeclarationKind::Function));
    }

    let receivers = node.child_by_field_name("receiver")?;
    let receiver_type = receivers
        .named_children(&mut receivers.walk())
        .find(|n| n.kind() == "parameter_declaration")?
        .child_by_field_name("type")?;

    let receiver = receiver_type_name(parsed.node_text(receiver_type));
    Some((format!("{}.{}", receiver, name), DeclarationKind::Method))
}

/// Bare receiver type name from its declared type text.
///
/// Strips one leading pointer marker, then any generic parameter suffix.
/// `*Stack[T]` becomes `Stack`.
pub fn receiver_type_name(type_text: &str) -> String {
    let text = type_text.strip_prefix('*').unwrap_or(type_text);
    text.split('[').next().unwrap_or(text).trim().to_string()
}

/// Textual callee of a call expression.
///
/// `f(..)` yields `f` and `x.M(..)` yields `x.M` when `x` is a bare
/// identifier. Any other call target yields None, including explicit
/// generic instantiations such as `Map[int](xs)`.
pub fn callee_name(call: Node, source: &[u8]) -> Option<String> {
    if call.child_by_field_name("type_arguments").is_some() {
        return None;
    }

    let function = call.child_by_field_name("function")?;
    match function.kind() {
        "identifier" => Some(function.utf8_text(source).ok()?.to_string()),
        "selector_expression" => {
            let operand = function.child_by_field_name("operand")?;
            if operand.kind() != "identifier" {
                return None;
            }
            let field = function.child_by_field_name("field")?;
            Some(format!(
                "{}.{}",
                operand.utf8_text(source).ok()?,
                field.utf8_text(source).ok()?
            ))
        }
        _ => None,
    }
}

/// First ERROR or MISSING node below `root`, following the leftmost
/// erroneous path.
fn first_syntax_error(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        match node
            .children(&mut cursor)
            .find(|c| c.is_error() || c.is_missing() || c.has_error())
        {
            Some(child) => node = child,
            None => return Some(node),
        }
    }
}

fn error_snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    line.chars().take(ERROR_SNIPPET_LEN).collect()
}

/// Pre-order traversal over `root` and all of its descendants.
fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder {
        cursor: root.walk(),
        done: false,
    }
}

struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
