//! Language support - shared tree-sitter grammar configuration
//!
//! This is the single source of truth for grammar selection. All
//! language-specific tree-sitter configuration goes here to avoid
//! duplication across the pipeline.

use tree_sitter::{Parser, Tree};

use crate::error::AnalyzeError;

/// Pick a grammar name for a module path.
///
/// TypeScript syntax is a superset of JavaScript here, but the grammars
/// disagree on a handful of node shapes (heritage clauses, field names),
/// so routing by extension keeps both dialects first-class.
pub fn language_for_path(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("ts") => "typescript",
        Some("tsx") => "tsx",
        _ => "javascript",
    }
}

/// Get the tree-sitter language for a grammar name.
pub fn get_tree_sitter_language(language: &str) -> tree_sitter::Language {
    match language {
        "typescript" => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        "tsx" => tree_sitter_typescript::LANGUAGE_TSX.into(),
        _ => tree_sitter_javascript::LANGUAGE.into(),
    }
}

/// Parse one module's source into a syntax tree.
///
/// Parse failure is fatal for the whole run: the pipeline does not attempt
/// to recover from malformed source.
pub fn parse_module(path: &str, source: &str) -> Result<Tree, AnalyzeError> {
    let language = language_for_path(path);
    let mut parser = Parser::new();
    parser
        .set_language(&get_tree_sitter_language(language))
        .map_err(|_| AnalyzeError::Parse {
            path: path.to_string(),
            language,
        })?;

    parser.parse(source, None).ok_or_else(|| AnalyzeError::Parse {
        path: path.to_string(),
        language,
    })
}
