//! Syntax-tree navigation helpers
//!
//! Thin utilities over tree-sitter nodes: text access, child lookup by kind
//! or field, pre-order walks, and doc-comment discovery. Everything in the
//! pipeline goes through these instead of poking at nodes directly.

use tree_sitter::Node;

/// Get the source text covered by a node.
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Get the text of a named field, if present.
pub fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).to_string())
}

/// Find the first direct child with the given kind.
pub fn find_child_by_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|c| c.kind() == kind);
    result
}

/// Collect all direct children with the given kind.
pub fn find_children_by_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == kind)
        .collect()
}

/// Whether a direct child of the given kind exists. Anonymous keyword
/// tokens ("static", "async", "get") report their text as the kind, so
/// this doubles as a modifier check.
pub fn has_child_of_kind(node: Node, kind: &str) -> bool {
    find_child_by_kind(node, kind).is_some()
}

/// Pre-order walk over a subtree, visiting every node exactly once.
pub fn walk_tree<'t, F>(node: Node<'t>, visitor: &mut F)
where
    F: FnMut(Node<'t>),
{
    visitor(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_tree(child, visitor);
    }
}

/// Collect every descendant (including the node itself) of the given kind.
pub fn find_descendants_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    walk_tree(node, &mut |n| {
        if n.kind() == kind {
            out.push(n);
        }
    });
    out
}

/// Unquote a string literal. Handles plain strings and substitution-free
/// template strings; anything else returns `None`.
pub fn string_literal_value(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let text = node_text(node, source);
            Some(text.trim_matches(|c| c == '"' || c == '\'').to_string())
        }
        "template_string" => {
            if find_child_by_kind(node, "template_substitution").is_some() {
                return None;
            }
            Some(node_text(node, source).trim_matches('`').to_string())
        }
        _ => None,
    }
}

/// Strip the leading `:` from a type annotation's text.
pub fn type_annotation_text(node: Node, source: &str) -> Option<String> {
    node.child_by_field_name("type")
        .map(|t| node_text(t, source).trim_start_matches(':').trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Find the JSDoc block documenting a node.
///
/// Comments attach as preceding siblings. Declarations wrapped in an export
/// statement (or a declarator inside a lexical declaration) carry their
/// comment on the wrapping statement, so those wrappers are consulted when
/// the node itself has none. Only wrapper statements are climbed: walking
/// any higher would let a class's first member steal the class's own doc
/// block.
pub fn doc_comment(node: Node, source: &str) -> Option<String> {
    if let Some(text) = preceding_jsdoc(node, source) {
        return Some(text);
    }
    let mut current = node;
    for _ in 0..2 {
        let Some(parent) = current.parent() else {
            break;
        };
        if !matches!(
            parent.kind(),
            "export_statement" | "lexical_declaration" | "variable_declaration"
        ) {
            break;
        }
        if let Some(text) = preceding_jsdoc(parent, source) {
            return Some(text);
        }
        current = parent;
    }
    None
}

fn preceding_jsdoc(node: Node, source: &str) -> Option<String> {
    // Only the immediately preceding comment counts; a plain comment
    // between a doc block and the node breaks the association.
    let sibling = node.prev_named_sibling()?;
    if sibling.kind().contains("comment") {
        let text = node_text(sibling, source);
        if text.trim_start().starts_with("/**") {
            return Some(text.to_string());
        }
    }
    None
}
