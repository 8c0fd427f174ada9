//! The built-in analyzer pipeline
//!
//! One focused module per construct, dispatching on node kind at the top
//! of each hook. Order matters and is declared in the registry.

pub mod arrow_function;
pub mod class_jsdoc;
pub mod classes;
pub mod cleanup;
pub mod define_calls;
pub mod exports;
pub mod function_like;
pub mod imports;
pub mod link;
pub mod mixins;
pub mod reexported_mixins;
pub mod variables;

use tree_sitter::Node;

/// Whether a node is a top-level statement of its module, directly or
/// behind an export statement.
pub(crate) fn is_top_level(node: Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "program" => true,
        Some(parent) if parent.kind() == "export_statement" => parent
            .parent()
            .map(|grandparent| grandparent.kind() == "program")
            .unwrap_or(false),
        _ => false,
    }
}
