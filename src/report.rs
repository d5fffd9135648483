//! Output formatting for the declaration table.
//!
//! Supports two output formats:
//! - JSON: the declaration table as one object keyed by declaration name
//! - Graph: a node/link document for diagram front-ends

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{DeclarationKind, DeclarationTable};
use crate::error::Result;

// =============================================================================
// JSON Format
// =============================================================================

/// Encode the declaration table as JSON.
pub fn to_json(table: &DeclarationTable, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(table)?
    } else {
        serde_json::to_string(table)?
    };
    Ok(json)
}

/// Write the declaration table to stdout as JSON.
pub fn write_json(table: &DeclarationTable, pretty: bool) -> Result<()> {
    let json = to_json(table, pretty)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Graph Format
// =============================================================================

const LINK_CATEGORY: &str = "dashed";
const RECEIVER_LINK_COLOR: &str = "gray";
const CALL_LINK_COLOR: &str = "green";

/// Node/link document built from a declaration table.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    pub node_data_array: Vec<GraphNode>,
    pub link_data_array: Vec<GraphLink>,
}

/// One declaration in the graph.
#[derive(Debug, Serialize, PartialEq)]
pub struct GraphNode {
    pub key: String,
    pub name: String,
    pub class: String,
    pub source: String,
}

/// A directed edge between two graph nodes.
#[derive(Debug, Serialize, PartialEq)]
pub struct GraphLink {
    pub from: String,
    pub to: String,
    pub category: String,
    pub color: String,
}

impl GraphLink {
    fn new(from: &str, to: &str, color: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            category: LINK_CATEGORY.to_string(),
            color: color.to_string(),
        }
    }
}

/// Build the graph view of a declaration table.
///
/// Methods are linked from their receiver type when that type is declared
/// in the same file. Calls become links only when the callee name is itself
/// a key in the table.
pub fn build_graph(table: &DeclarationTable) -> GraphDocument {
    let mut nodes = Vec::with_capacity(table.len());
    let mut methods: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for decl in table.iter() {
        let (name, class, source) = match decl.kind {
            DeclarationKind::Import => (
                decl.name.as_str(),
                "import",
                format!("import {}", decl.code),
            ),
            DeclarationKind::Type => (decl.name.as_str(), "struct", format!("type {}", decl.code)),
            DeclarationKind::Method => {
                let (receiver, method) = decl
                    .receiver_and_method()
                    .unwrap_or(("", decl.name.as_str()));
                methods.entry(receiver).or_default().push(decl.name.as_str());
                (method, "method", decl.code.clone())
            }
            DeclarationKind::Function => (decl.name.as_str(), "function", decl.code.clone()),
        };

        nodes.push(GraphNode {
            key: decl.name.clone(),
            name: name.to_string(),
            class: class.to_string(),
            source,
        });
    }

    let mut links = Vec::new();
    for (receiver, keys) in &methods {
        let declared_type = table
            .get(receiver)
            .is_some_and(|d| d.kind == DeclarationKind::Type);
        if declared_type {
            links.extend(keys.iter().map(|k| GraphLink::new(receiver, k, RECEIVER_LINK_COLOR)));
        }
    }

    for decl in table.iter() {
        for call in &decl.calls {
            if table.contains(call) {
                links.push(GraphLink::new(&decl.name, call, CALL_LINK_COLOR));
            } else {
                log::debug!("call {} from {} not declared in this file", call, decl.name);
            }
        }
    }

    GraphDocument {
        node_data_array: nodes,
        link_data_array: links,
    }
}

/// Write the graph view of the declaration table to stdout.
pub fn write_graph(table: &DeclarationTable, pretty: bool) -> Result<()> {
    let graph = build_graph(table);
    let json = if pretty {
        serde_json::to_string_pretty(&graph)?
    } else {
        serde_json::to_string(&graph)?
    };
    println!("{}", json);
    Ok(())
}
