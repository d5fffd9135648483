//! Recovers the verbatim source text covered by a byte span.
//!
//! Offsets follow tree-sitter's model: `start` inclusive, `end` exclusive,
//! both counted in bytes from the beginning of the file.

use std::fs;
use std::path::Path;

use crate::error::{AnalyzeError, Result};

/// Slice `source[start..end]` into an owned string.
///
/// Invalid UTF-8 inside the span is replaced with U+FFFD.
pub fn slice(source: &[u8], start: usize, end: usize) -> Result<String> {
    let bytes = source.get(start..end).ok_or(AnalyzeError::Span {
        start,
        end,
        len: source.len(),
    })?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Re-read `path` from disk and return the text between `start` and `end`.
pub fn read_span(path: &Path, start: usize, end: usize) -> Result<String> {
    let source = fs::read(path).map_err(|source| AnalyzeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    slice(&source, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_slice_exact_bytes() {
        let source = b"package main\n\nfunc f() {\n\t// keep me\n}\n";
        let text = slice(source, 14, 38).unwrap();
        assert_eq!(text, "func f() {\n\t// keep me\n}");
    }

    #[test]
    fn test_slice_out_of_range() {
        let err = slice(b"abc", 1, 10).unwrap_err();
        assert!(matches!(err, AnalyzeError::Span { start: 1, end: 10, len: 3 }));
    }

    #[test]
    fn test_slice_inverted_range() {
        assert!(slice(b"abcdef", 4, 2).is_err());
    }

    #[test]
    fn test_slice_lossy_utf8() {
        let source = [b'a', 0xff, b'b'];
        assert_eq!(slice(&source, 0, 3).unwrap(), "a\u{fffd}b");
    }

    #[test]
    fn test_read_span_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("main.go");
        std::fs::write(&path, "package main\ntype ID int\n").unwrap();

        assert_eq!(read_span(&path, 18, 24).unwrap(), "ID int");
    }

    #[test]
    fn test_read_span_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_span(&temp.path().join("gone.go"), 0, 1).unwrap_err();
        assert!(matches!(err, AnalyzeError::Io { .. }));
    }
}
