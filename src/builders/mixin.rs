//! Mixin detection and extraction
//!
//! A mixin factory is a function that takes a base class and returns a
//! class expression extending it. Detection is purely structural: no
//! symbol binding is consulted. The named-return shapes compare the
//! returned identifier's text with the declared class's name, so a
//! shadowing declaration inside the factory body can misbind. Best
//! effort; shadowing is not handled.

use tree_sitter::Node;

use crate::ast;
use crate::builders::{class, function};
use crate::jsdoc::JsDoc;
use crate::schema::MixinDeclaration;

/// A detected mixin: the factory (JSDoc and parameter source) and the
/// inner class (member source).
#[derive(Debug, Clone, Copy)]
pub struct MixinMatch<'t> {
    pub function_node: Node<'t>,
    pub class_node: Node<'t>,
}

/// Try to match a function/arrow node against the known mixin shapes:
///
/// 1. `klass => class extends klass { ... }`
/// 2. `klass => { return class extends klass { ... } }`
/// 3. `klass => { class X extends klass { ... }; return X; }`
/// 4. `function M(klass) { return class extends klass { ... } }`
/// 5. `function M(klass) { class X extends klass { ... }; return X; }`
pub fn detect_mixin<'t>(candidate: Node<'t>, source: &str) -> Option<MixinMatch<'t>> {
    let class_node = match candidate.kind() {
        "arrow_function" => {
            let body = candidate.child_by_field_name("body")?;
            if is_extending_class(body) {
                Some(body)
            } else if body.kind() == "statement_block" {
                class_returned_from_block(body, source)
            } else {
                None
            }
        }
        "function_declaration" | "function_expression" => {
            let body = candidate.child_by_field_name("body")?;
            class_returned_from_block(body, source)
        }
        _ => None,
    }?;

    Some(MixinMatch {
        function_node: candidate,
        class_node,
    })
}

fn class_returned_from_block<'t>(block: Node<'t>, source: &str) -> Option<Node<'t>> {
    let return_statement = ast::find_child_by_kind(block, "return_statement")?;
    let returned = return_statement.named_child(0)?;

    if is_extending_class(returned) {
        return Some(returned);
    }

    if returned.kind() == "identifier" {
        // Textual equality between the returned identifier and a class
        // declared in the same block. Not symbol resolution.
        let returned_name = ast::node_text(returned, source);
        return ast::find_children_by_kind(block, "class_declaration")
            .into_iter()
            .find(|declared| {
                ast::field_text(*declared, "name", source).as_deref() == Some(returned_name)
                    && is_extending_class(*declared)
            });
    }
    None
}

fn is_extending_class(node: Node) -> bool {
    matches!(node.kind(), "class" | "class_declaration")
        && ast::find_child_by_kind(node, "class_heritage").is_some()
}

/// Build a mixin declaration: the class builder runs against the inner
/// class, then the class-only superclass is stripped (the base arrives as
/// a parameter) and the factory's parameters and JSDoc are grafted on.
///
/// The inner class's own mixin applications survive as unresolved names so
/// the caller can resolve them like any other heritage.
pub fn build_mixin(
    name: impl Into<String>,
    detected: MixinMatch<'_>,
    source: &str,
    doc: Option<&JsDoc>,
) -> (MixinDeclaration, Vec<String>) {
    let inner = class::build_class(detected.class_node, source);

    let mut parts = function::build_function_like(detected.function_node, source, doc);
    parts.name = name.into();

    let declaration = MixinDeclaration {
        name: parts.name,
        description: parts.description,
        summary: parts.summary,
        parameters: parts.parameters,
        mixins: Vec::new(),
        members: inner.declaration.members,
        attributes: inner.declaration.attributes,
        events: inner.declaration.events,
        css_properties: inner.declaration.css_properties,
        css_parts: inner.declaration.css_parts,
        slots: inner.declaration.slots,
        css_states: inner.declaration.css_states,
        ignore: parts.ignore,
    };

    (declaration, inner.mixin_names)
}
