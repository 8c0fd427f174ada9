//! Class field extraction
//!
//! Builds field records from field definitions, including the syntax-shape
//! type inference and the deliberately narrow default-value capture: only
//! values that are constant by construction (literals, `as const`) ever
//! become a `default`.

use tree_sitter::Node;

use crate::ast;
use crate::jsdoc::{self, JsDoc};
use crate::schema::{Attribute, ClassField, Privacy, Type};

/// A field plus the attribute it reflects to, when `@attr`-annotated.
#[derive(Debug)]
pub struct BuiltField {
    pub field: ClassField,
    pub attribute: Option<Attribute>,
}

/// Build a field record from a `field_definition`/`public_field_definition`
/// class member.
pub fn build_class_field(node: Node, source: &str) -> Option<BuiltField> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| node.child_by_field_name("property"))?;
    if name_node.kind() == "computed_property_name" {
        return None;
    }
    let name = ast::node_text(name_node, source).to_string();

    let mut field = ClassField::new(name.clone());
    field.is_static = ast::has_child_of_kind(node, "static");
    field.privacy = syntax_privacy(node, &name, source);
    if ast::has_child_of_kind(node, "readonly") {
        field.readonly = Some(true);
    }
    field.field_type = ast::type_annotation_text(node, source).map(Type::new);

    let doc = jsdoc::for_node(node, source);

    if let Some(value) = node.child_by_field_name("value") {
        if field.field_type.is_none() {
            field.field_type = infer_type(value, source);
        }
        field.default = capture_default(value, source);
        field.initializer_ref = initializer_identifier(value, source);
    }

    let attribute = apply_jsdoc(&mut field, doc.as_ref());
    Some(BuiltField { field, attribute })
}

/// Overlay a JSDoc block onto a field and synthesize the `@attr` attribute
/// record, if any. The attribute never carries member-only keys; it gets
/// the field's type/default and its own name and description.
pub fn apply_jsdoc(field: &mut ClassField, doc: Option<&JsDoc>) -> Option<Attribute> {
    let doc = doc?;

    if field.description.is_none() {
        field.description = doc.description.clone();
    }
    if field.summary.is_none() {
        field.summary = doc.summary();
    }
    if let Some(privacy) = doc.privacy() {
        field.privacy = Some(privacy);
    }
    if let Some(type_text) = doc.type_text() {
        field.field_type = Some(Type::new(type_text));
    }
    if doc.is_ignored() {
        field.ignore = true;
    }
    if doc.has(&["reflect", "reflects"]) {
        field.reflects = Some(true);
    }

    let attr_tag = doc.tag(&["attr", "attribute"])?;
    let attr_name = attr_tag
        .name
        .clone()
        .unwrap_or_else(|| field.name.clone());
    field.attribute = Some(attr_name.clone());

    Some(Attribute {
        name: attr_name,
        field_name: Some(field.name.clone()),
        attr_type: attr_tag
            .type_text
            .clone()
            .map(Type::new)
            .or_else(|| field.field_type.clone()),
        description: attr_tag.description.clone(),
        default: field.default.clone(),
        inherited_from: None,
    })
}

/// Privacy from syntax alone: a TypeScript accessibility modifier or a
/// `#private` name. JSDoc tags may override later.
pub fn syntax_privacy(node: Node, name: &str, source: &str) -> Option<Privacy> {
    if let Some(modifier) = ast::find_child_by_kind(node, "accessibility_modifier") {
        return match ast::node_text(modifier, source) {
            "private" => Some(Privacy::Private),
            "protected" => Some(Privacy::Protected),
            _ => Some(Privacy::Public),
        };
    }
    if name.starts_with('#') {
        return Some(Privacy::Private);
    }
    None
}

/// Infer a type from the shape of an initializer expression.
pub fn infer_type(value: Node, source: &str) -> Option<Type> {
    let text = || ast::node_text(value, source).to_string();
    match value.kind() {
        "true" | "false" => Some(Type::new("boolean")),
        "string" | "template_string" => Some(Type::new("string")),
        "number" => Some(Type::new("number")),
        "null" => Some(Type::new("null")),
        "array" => Some(Type::new("array")),
        "object" => Some(Type::new("object")),
        "unary_expression" => {
            let operator = ast::field_text(value, "operator", source)?;
            match operator.as_str() {
                "!" => Some(Type::new("boolean")),
                "+" | "-" => Some(Type::new("number")),
                _ => None,
            }
        }
        // `'left' as const` and dotted namespace references keep their
        // literal source text as the type.
        "as_expression" if text().ends_with("as const") => Some(Type::new(text())),
        "member_expression" => Some(Type::new(text())),
        _ => None,
    }
}

/// Capture a default value, but only when the expression is constant by
/// construction. Calls, conditionals, binary expressions, and property
/// access never become defaults.
pub fn capture_default(value: Node, source: &str) -> Option<String> {
    let text = ast::node_text(value, source).to_string();
    match value.kind() {
        "string" | "template_string" | "number" | "true" | "false" | "null" | "undefined"
        | "array" | "object" => Some(text),
        "unary_expression" => {
            let argument = value.child_by_field_name("argument")?;
            match argument.kind() {
                "number" | "true" | "false" => Some(text),
                _ => None,
            }
        }
        "as_expression" if text.ends_with("as const") => Some(text),
        _ => None,
    }
}

/// A bare-identifier initializer is not a default, but it may resolve to a
/// variable declaration later (package-link initializer resolution).
pub fn initializer_identifier(value: Node, source: &str) -> Option<String> {
    if value.kind() == "identifier" {
        Some(ast::node_text(value, source).to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_module;

    fn first_field<'t>(tree: &'t tree_sitter::Tree) -> Node<'t> {
        let fields = ast::find_descendants_of_kind(tree.root_node(), "field_definition");
        if let Some(first) = fields.first() {
            return *first;
        }
        ast::find_descendants_of_kind(tree.root_node(), "public_field_definition")[0]
    }

    fn build(source: &str, path: &str) -> BuiltField {
        let tree = parse_module(path, source).unwrap();
        build_class_field(first_field(&tree), source).unwrap()
    }

    #[test]
    fn literal_initializers_infer_type_and_default() {
        let built = build("class A { open = false; }", "a.js");
        assert_eq!(built.field.field_type.as_ref().unwrap().text, "boolean");
        assert_eq!(built.field.default.as_deref(), Some("false"));

        let built = build("class A { label = 'hi'; }", "a.js");
        assert_eq!(built.field.field_type.as_ref().unwrap().text, "string");

        let built = build("class A { count = -1; }", "a.js");
        assert_eq!(built.field.field_type.as_ref().unwrap().text, "number");
        assert_eq!(built.field.default.as_deref(), Some("-1"));

        let built = build("class A { items = []; }", "a.js");
        assert_eq!(built.field.field_type.as_ref().unwrap().text, "array");
    }

    #[test]
    fn complex_initializers_never_become_defaults() {
        for source in [
            "class A { x = compute(); }",
            "class A { x = a ? b : c; }",
            "class A { x = 1 + 2; }",
            "class A { x = window.foo; }",
        ] {
            let built = build(source, "a.js");
            assert_eq!(built.field.default, None, "leaked from: {source}");
        }
    }

    #[test]
    fn identifier_initializer_records_a_reference() {
        let built = build("class A { x = SOME_CONST; }", "a.js");
        assert_eq!(built.field.default, None);
        assert_eq!(built.field.initializer_ref.as_deref(), Some("SOME_CONST"));
    }

    #[test]
    fn dotted_reference_is_captured_as_type_text() {
        let built = build("class A { dir = Direction.Up; }", "a.js");
        assert_eq!(
            built.field.field_type.as_ref().unwrap().text,
            "Direction.Up"
        );
        assert_eq!(built.field.default, None);
    }

    #[test]
    fn explicit_annotation_beats_inference() {
        let built = build("class A { flag: string = false; }", "a.ts");
        assert_eq!(built.field.field_type.as_ref().unwrap().text, "string");
    }

    #[test]
    fn attr_tag_synthesizes_attribute() {
        let source = "class A {\n  /** @attr my-attr */\n  myAttr = 'x';\n}";
        let built = build(source, "a.js");
        let attr = built.attribute.unwrap();
        assert_eq!(attr.name, "my-attr");
        assert_eq!(attr.field_name.as_deref(), Some("myAttr"));
        assert_eq!(built.field.attribute.as_deref(), Some("my-attr"));
    }

    #[test]
    fn privacy_from_hash_and_modifier() {
        let built = build("class A { #secret = 1; }", "a.js");
        assert_eq!(built.field.privacy, Some(Privacy::Private));

        let built = build("class A { protected x = 1; }", "a.ts");
        assert_eq!(built.field.privacy, Some(Privacy::Protected));
    }

    #[test]
    fn ignore_tag_flags_without_removing() {
        let source = "class A {\n  /** @ignore */\n  internalState = 1;\n}";
        let built = build(source, "a.js");
        assert!(built.field.ignore);
    }
}
