//! Class extraction
//!
//! Two labeled passes over the class body: the first seeds attributes from
//! `static observedAttributes` so later passes can attach field data to
//! them (forward references within one class work this way), the second
//! builds methods, fields, and events. A final walk over the constructor
//! body backfills fields that only exist as `this.x = ...` assignments.

use tree_sitter::Node;

use crate::ast;
use crate::builders::{event, field, function};
use crate::jsdoc;
use crate::schema::{
    Attribute, ClassDeclaration, ClassField, ClassMember, ClassMethod, Type,
};

/// A built class plus its unresolved heritage names. Reference resolution
/// needs the module's import table, so it stays with the calling plugin.
#[derive(Debug)]
pub struct ClassBuild {
    pub declaration: ClassDeclaration,
    pub superclass_name: Option<String>,
    /// Mixin factory names applied in the heritage clause, outermost first.
    pub mixin_names: Vec<String>,
}

/// Build a class declaration from a `class_declaration` or `class`
/// (expression) node.
pub fn build_class(class_node: Node, source: &str) -> ClassBuild {
    let name = ast::field_text(class_node, "name", source).unwrap_or_default();
    let mut declaration = ClassDeclaration::new(name);
    declaration.tag_name = decorator_tag_name(class_node, source);

    let (superclass_name, mixin_names) = match heritage_expression(class_node) {
        Some(expression) => unwrap_heritage(expression, source),
        None => (None, Vec::new()),
    };

    let Some(body) = class_node.child_by_field_name("body") else {
        return ClassBuild {
            declaration,
            superclass_name,
            mixin_names,
        };
    };

    // Pass 1: seed attributes from observedAttributes, in declared order.
    for attribute_name in observed_attribute_names(body, source) {
        declaration.attributes.push(Attribute::new(attribute_name));
    }

    // Pass 2: members.
    let mut getters: Vec<String> = Vec::new();
    let mut setters: Vec<String> = Vec::new();
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_definition" => {
                build_method_member(member, source, &mut declaration, &mut getters, &mut setters)
            }
            "field_definition" | "public_field_definition" => {
                if let Some(built) = field::build_class_field(member, source) {
                    if built.field.name != "observedAttributes" {
                        upsert_field(&mut declaration, built.field);
                        if let Some(attribute) = built.attribute {
                            merge_attribute(&mut declaration, attribute);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    // Getter-only accessors surface as readonly fields.
    for name in &getters {
        if setters.contains(name) {
            continue;
        }
        if let Some(ClassMember::Field(existing)) = declaration
            .members
            .iter_mut()
            .find(|m| m.name() == name.as_str())
        {
            existing.readonly = Some(true);
        }
    }

    walk_constructor(body, source, &mut declaration);

    ClassBuild {
        declaration,
        superclass_name,
        mixin_names,
    }
}

fn build_method_member(
    member: Node,
    source: &str,
    declaration: &mut ClassDeclaration,
    getters: &mut Vec<String>,
    setters: &mut Vec<String>,
) {
    let Some(name_node) = member.child_by_field_name("name") else {
        return;
    };
    if name_node.kind() == "computed_property_name" {
        return;
    }
    let name = ast::node_text(name_node, source).to_string();

    // Every method body is scanned for dispatched events, the
    // constructor's included.
    if let Some(method_body) = member.child_by_field_name("body") {
        for dispatched in event::collect_events(method_body, source) {
            event::add_event(&mut declaration.events, dispatched);
        }
    }

    if name == "constructor" {
        return;
    }

    let is_getter = ast::has_child_of_kind(member, "get");
    let is_setter = ast::has_child_of_kind(member, "set");
    if name == "observedAttributes" && is_getter {
        return;
    }

    let doc = jsdoc::for_node(member, source);
    if is_getter || is_setter {
        let mut accessor_field = ClassField::new(name.clone());
        accessor_field.is_static = ast::has_child_of_kind(member, "static");
        accessor_field.privacy = field::syntax_privacy(member, &name, source);
        if is_getter {
            accessor_field.field_type = member
                .child_by_field_name("return_type")
                .map(|t| Type::new(ast::node_text(t, source).trim_start_matches(':').trim()));
            getters.push(name);
        } else {
            let parameters = function::build_parameters(member, source);
            accessor_field.field_type = parameters.into_iter().next().and_then(|p| p.param_type);
            setters.push(name);
        }
        let attribute = field::apply_jsdoc(&mut accessor_field, doc.as_ref());
        upsert_field(declaration, accessor_field);
        if let Some(attribute) = attribute {
            merge_attribute(declaration, attribute);
        }
        return;
    }

    let parts = function::build_function_like(member, source, doc.as_ref());
    let method = ClassMethod {
        name,
        is_static: ast::has_child_of_kind(member, "static"),
        privacy: parts
            .privacy
            .or_else(|| field::syntax_privacy(member, ast::node_text(name_node, source), source)),
        description: parts.description,
        summary: parts.summary,
        parameters: parts.parameters,
        return_info: parts.return_info,
        inherited_from: None,
        ignore: parts.ignore,
    };
    declaration.members.push(ClassMember::Method(method));
}

/// Scan the constructor body's top-level expression statements for
/// `this.x = <literal>` assignments, decomposing comma chains, and merge
/// the discovered data into already-known fields or register new ones.
fn walk_constructor(body: Node, source: &str, declaration: &mut ClassDeclaration) {
    let Some(constructor) = find_constructor(body, source) else {
        return;
    };
    let Some(constructor_body) = constructor.child_by_field_name("body") else {
        return;
    };

    let mut cursor = constructor_body.walk();
    for statement in constructor_body.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(expression) = statement.named_child(0) else {
            continue;
        };
        let mut assignments = Vec::new();
        collect_assignments(expression, &mut assignments);

        let doc = jsdoc::for_node(statement, source);
        for assignment in assignments {
            let Some(name) = this_property_name(assignment, source) else {
                continue;
            };
            let mut incoming = ClassField::new(name);
            if let Some(value) = assignment.child_by_field_name("right") {
                incoming.field_type = field::infer_type(value, source);
                incoming.default = field::capture_default(value, source);
                incoming.initializer_ref = field::initializer_identifier(value, source);
            }
            let attribute = field::apply_jsdoc(&mut incoming, doc.as_ref());
            upsert_field(declaration, incoming);
            if let Some(attribute) = attribute {
                merge_attribute(declaration, attribute);
            }
        }
    }
}

/// Recursively decompose comma-expression chains into their individual
/// assignments.
fn collect_assignments<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "assignment_expression" => out.push(node),
        "sequence_expression" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_assignments(child, out);
            }
        }
        "parenthesized_expression" => {
            if let Some(inner) = node.named_child(0) {
                collect_assignments(inner, out);
            }
        }
        _ => {}
    }
}

fn this_property_name(assignment: Node, source: &str) -> Option<String> {
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "member_expression" {
        return None;
    }
    let object = left.child_by_field_name("object")?;
    if object.kind() != "this" {
        return None;
    }
    let property = left.child_by_field_name("property")?;
    Some(ast::node_text(property, source).to_string())
}

fn find_constructor<'t>(body: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut cursor = body.walk();
    let result = body.named_children(&mut cursor).find(|member| {
        member.kind() == "method_definition"
            && ast::field_text(*member, "name", source).as_deref() == Some("constructor")
    });
    result
}

/// Merge a field into the member list: a record for the same name is
/// merged (incoming data overwriting, explicit type/privacy reconciled),
/// anything else is appended.
pub fn upsert_field(declaration: &mut ClassDeclaration, incoming: ClassField) {
    for member in &mut declaration.members {
        if let ClassMember::Field(existing) = member {
            if existing.name == incoming.name {
                existing.merge_from(incoming);
                return;
            }
        }
    }
    declaration.members.push(ClassMember::Field(incoming));
}

/// Merge an attribute: one already seeded under the same name (from
/// `observedAttributes`) absorbs the newer record, the newer data taking
/// precedence on conflicting keys.
pub fn merge_attribute(declaration: &mut ClassDeclaration, newer: Attribute) {
    match declaration.attribute_mut(&newer.name) {
        Some(existing) => existing.merge_from(newer),
        None => declaration.attributes.push(newer),
    }
}

fn heritage_expression(class_node: Node) -> Option<Node> {
    let heritage = ast::find_child_by_kind(class_node, "class_heritage")?;
    // The TypeScript grammar nests an extends_clause; the JavaScript
    // grammar puts the expression directly under the heritage node.
    if let Some(extends) = ast::find_child_by_kind(heritage, "extends_clause") {
        return extends
            .child_by_field_name("value")
            .or_else(|| extends.named_child(0));
    }
    heritage.named_child(0)
}

/// Peel mixin applications off a heritage expression: `A(B(Base))` yields
/// mixins `[A, B]` and superclass `Base`.
fn unwrap_heritage(expression: Node, source: &str) -> (Option<String>, Vec<String>) {
    let mut mixins = Vec::new();
    let mut current = expression;
    loop {
        match current.kind() {
            "call_expression" => {
                if let Some(callee) = current.child_by_field_name("function") {
                    mixins.push(ast::node_text(callee, source).to_string());
                }
                let argument = current
                    .child_by_field_name("arguments")
                    .and_then(|args| args.named_child(0));
                match argument {
                    Some(inner) => current = inner,
                    None => return (None, mixins),
                }
            }
            "identifier" | "member_expression" => {
                return (Some(ast::node_text(current, source).to_string()), mixins);
            }
            _ => return (None, mixins),
        }
    }
}

fn decorator_tag_name(class_node: Node, source: &str) -> Option<String> {
    for decorator in ast::find_children_by_kind(class_node, "decorator") {
        let Some(call) = ast::find_child_by_kind(decorator, "call_expression") else {
            continue;
        };
        let Some(callee) = call.child_by_field_name("function") else {
            continue;
        };
        if ast::node_text(callee, source) != "customElement" {
            continue;
        }
        let tag = call
            .child_by_field_name("arguments")
            .and_then(|args| args.named_child(0))
            .and_then(|first| ast::string_literal_value(first, source));
        if tag.is_some() {
            return tag;
        }
    }
    None
}

fn observed_attribute_names(body: Node, source: &str) -> Vec<String> {
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "field_definition" | "public_field_definition" => {
                let name = member
                    .child_by_field_name("name")
                    .or_else(|| member.child_by_field_name("property"));
                let is_observed = name
                    .map(|n| ast::node_text(n, source) == "observedAttributes")
                    .unwrap_or(false);
                if is_observed && ast::has_child_of_kind(member, "static") {
                    if let Some(value) = member.child_by_field_name("value") {
                        return array_string_elements(value, source);
                    }
                }
            }
            "method_definition" => {
                let is_observed =
                    ast::field_text(member, "name", source).as_deref() == Some("observedAttributes");
                if is_observed
                    && ast::has_child_of_kind(member, "static")
                    && ast::has_child_of_kind(member, "get")
                {
                    let returned = member
                        .child_by_field_name("body")
                        .and_then(|b| {
                            ast::find_descendants_of_kind(b, "return_statement")
                                .into_iter()
                                .next()
                        })
                        .and_then(|ret| ret.named_child(0));
                    if let Some(value) = returned {
                        return array_string_elements(value, source);
                    }
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

fn array_string_elements(node: Node, source: &str) -> Vec<String> {
    if node.kind() != "array" {
        return Vec::new();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|element| ast::string_literal_value(element, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_module;
    use crate::schema::Privacy;

    fn build(source: &str, path: &str) -> ClassBuild {
        let tree = parse_module(path, source).unwrap();
        let nodes = ast::find_descendants_of_kind(tree.root_node(), "class_declaration");
        let class_node = if nodes.is_empty() {
            ast::find_descendants_of_kind(tree.root_node(), "class")[0]
        } else {
            nodes[0]
        };
        build_class(class_node, source)
    }

    #[test]
    fn observed_attributes_from_field_form() {
        let build = build(
            "class MyEl extends HTMLElement { static observedAttributes = ['a-a', 'b-b']; }",
            "a.js",
        );
        let names: Vec<&str> = build
            .declaration
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["a-a", "b-b"]);
        assert!(build
            .declaration
            .attributes
            .iter()
            .all(|a| a.field_name.is_none()));
        assert_eq!(build.superclass_name.as_deref(), Some("HTMLElement"));
    }

    #[test]
    fn observed_attributes_from_getter_form() {
        let build = build(
            "class MyEl extends HTMLElement { static get observedAttributes() { return ['x-x']; } }",
            "a.js",
        );
        assert_eq!(build.declaration.attributes[0].name, "x-x");
        // The getter itself never becomes a member.
        assert!(build.declaration.members.is_empty());
    }

    #[test]
    fn heritage_mixins_unwrap_outermost_first() {
        let build = build("class X extends A(B(Base)) {}", "a.js");
        assert_eq!(build.mixin_names, vec!["A", "B"]);
        assert_eq!(build.superclass_name.as_deref(), Some("Base"));
    }

    #[test]
    fn constructor_assignments_register_fields() {
        let source = r#"
class A {
  constructor() {
    super();
    this.count = 0;
    this.label = 'hi', this.open = false;
  }
}
"#;
        let build = build(source, "a.js");
        let names: Vec<&str> = build.declaration.members.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["count", "label", "open"]);
        let ClassMember::Field(open) = build.declaration.member("open").unwrap() else {
            panic!("expected field");
        };
        assert_eq!(open.default.as_deref(), Some("false"));
        assert_eq!(open.field_type.as_ref().unwrap().text, "boolean");
    }

    #[test]
    fn constructor_assignment_backfills_declared_field() {
        let source = r#"
class A {
  count: number;
  constructor() {
    super();
    this.count = 3;
  }
}
"#;
        let build = build(source, "a.ts");
        let ClassMember::Field(count) = build.declaration.member("count").unwrap() else {
            panic!("expected field");
        };
        // The declared annotation survives; the constructor supplies the
        // default.
        assert_eq!(count.field_type.as_ref().unwrap().text, "number");
        assert_eq!(count.default.as_deref(), Some("3"));
        assert_eq!(
            build
                .declaration
                .members
                .iter()
                .filter(|m| m.name() == "count")
                .count(),
            1
        );
    }

    #[test]
    fn methods_and_privacy() {
        let source = r#"
class A {
  #tick() {}
  static create() {}
  run(speed = 1) {}
}
"#;
        let build = build(source, "a.js");
        let ClassMember::Method(tick) = build.declaration.member("#tick").unwrap() else {
            panic!("expected method");
        };
        assert_eq!(tick.privacy, Some(Privacy::Private));
        let ClassMember::Method(create) = build.declaration.member("create").unwrap() else {
            panic!("expected method");
        };
        assert!(create.is_static);
        let ClassMember::Method(run) = build.declaration.member("run").unwrap() else {
            panic!("expected method");
        };
        assert_eq!(run.parameters[0].default.as_deref(), Some("1"));
    }

    #[test]
    fn getter_only_accessor_is_readonly_field() {
        let source = "class A { get size() { return 1; } set width(w) {} get area() { return 2; } set area(a) {} }";
        let build = build(source, "a.js");
        let ClassMember::Field(size) = build.declaration.member("size").unwrap() else {
            panic!("expected field");
        };
        assert_eq!(size.readonly, Some(true));
        let ClassMember::Field(area) = build.declaration.member("area").unwrap() else {
            panic!("expected field");
        };
        assert_eq!(area.readonly, None);
    }

    #[test]
    fn attr_field_merges_into_seeded_attribute() {
        let source = r#"
class A extends HTMLElement {
  static observedAttributes = ['my-attr'];
  /** @attr my-attr */
  myAttr = 'x';
}
"#;
        let build = build(source, "a.js");
        assert_eq!(build.declaration.attributes.len(), 1);
        let attr = &build.declaration.attributes[0];
        assert_eq!(attr.field_name.as_deref(), Some("myAttr"));
        assert_eq!(attr.default.as_deref(), Some("'x'"));
    }

    #[test]
    fn decorator_supplies_tag_name() {
        let source = "@customElement('fancy-button')\nclass FancyButton extends HTMLElement {}";
        let build = build(source, "a.ts");
        assert_eq!(build.declaration.tag_name.as_deref(), Some("fancy-button"));
    }

    #[test]
    fn events_found_across_methods() {
        let source = r#"
class A {
  constructor() { super(); this.dispatchEvent(new Event('constructed')); }
  go() { this.dispatchEvent(new CustomEvent('gone')); }
}
"#;
        let build = build(source, "a.js");
        let names: Vec<_> = build
            .declaration
            .events
            .iter()
            .filter_map(|e| e.name.as_deref())
            .collect();
        assert_eq!(names, vec!["constructed", "gone"]);
    }
}
