//! Language-specific analyzer implementations.

mod go;

pub use go::{callee_name, receiver_type_name, GoAnalyzer};

use once_cell::sync::OnceCell;

/// Static storage for Go analyzer.
static GO_ANALYZER: OnceCell<GoAnalyzer> = OnceCell::new();

/// Shared Go analyzer, created on first use.
pub fn go_analyzer() -> &'static GoAnalyzer {
    GO_ANALYZER.get_or_init(GoAnalyzer::new)
}
