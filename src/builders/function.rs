//! Function-like extraction
//!
//! Shared by top-level functions, class methods, arrow functions, and
//! mixin factories: parameter lists, return types, and the JSDoc overlay
//! that fills whatever the syntax left blank.

use tree_sitter::Node;

use crate::ast;
use crate::jsdoc::JsDoc;
use crate::schema::{FunctionReturn, Parameter, Privacy, Type};

/// The function-shaped pieces of a declaration, before they are placed
/// into a method, function, or mixin record.
#[derive(Debug, Default)]
pub struct FunctionParts {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_info: Option<FunctionReturn>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub privacy: Option<Privacy>,
    pub ignore: bool,
}

/// Build the function-like parts of a function/arrow/method node.
pub fn build_function_like(node: Node, source: &str, doc: Option<&JsDoc>) -> FunctionParts {
    let mut parts = FunctionParts {
        name: ast::field_text(node, "name", source).unwrap_or_default(),
        parameters: build_parameters(node, source),
        return_info: return_type(node, source).map(|t| FunctionReturn {
            return_type: Some(t),
            description: None,
        }),
        ..Default::default()
    };

    if let Some(doc) = doc {
        apply_jsdoc(&mut parts, doc);
    }
    parts
}

/// Extract the parameter list, handling both grammars' parameter shapes.
pub fn build_parameters(node: Node, source: &str) -> Vec<Parameter> {
    let Some(list) = node
        .child_by_field_name("parameters")
        .or_else(|| node.child_by_field_name("parameter"))
    else {
        return Vec::new();
    };

    // An arrow function's single bare parameter has no surrounding list.
    if list.kind() == "identifier" {
        return vec![Parameter {
            name: ast::node_text(list, source).to_string(),
            ..Default::default()
        }];
    }

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter_map(|child| build_parameter(child, source))
        .collect()
}

fn build_parameter(node: Node, source: &str) -> Option<Parameter> {
    match node.kind() {
        "identifier" => Some(Parameter {
            name: ast::node_text(node, source).to_string(),
            ..Default::default()
        }),
        // Destructured parameters keep their full pattern text as the name.
        "object_pattern" | "array_pattern" => Some(Parameter {
            name: ast::node_text(node, source).to_string(),
            ..Default::default()
        }),
        "assignment_pattern" => {
            let name = ast::field_text(node, "left", source)?;
            Some(Parameter {
                name,
                default: ast::field_text(node, "right", source),
                optional: true,
                ..Default::default()
            })
        }
        "rest_pattern" => Some(Parameter {
            name: ast::node_text(node, source)
                .trim_start_matches("...")
                .to_string(),
            rest: true,
            ..Default::default()
        }),
        "required_parameter" | "optional_parameter" => {
            let pattern = node.child_by_field_name("pattern")?;
            let mut parameter = build_parameter(pattern, source).unwrap_or(Parameter {
                name: ast::node_text(pattern, source).to_string(),
                ..Default::default()
            });
            parameter.param_type = ast::type_annotation_text(node, source).map(Type::new);
            if parameter.default.is_none() {
                parameter.default = ast::field_text(node, "value", source);
                parameter.optional = parameter.optional || parameter.default.is_some();
            }
            if node.kind() == "optional_parameter" {
                parameter.optional = true;
            }
            Some(parameter)
        }
        _ => None,
    }
}

fn return_type(node: Node, source: &str) -> Option<Type> {
    node.child_by_field_name("return_type").map(|annotation| {
        Type::new(
            ast::node_text(annotation, source)
                .trim_start_matches(':')
                .trim(),
        )
    })
}

/// Fill syntax gaps from JSDoc: descriptions, parameter details, return
/// info, and the privacy override tags.
pub fn apply_jsdoc(parts: &mut FunctionParts, doc: &JsDoc) {
    parts.description = parts.description.take().or_else(|| doc.description.clone());
    parts.summary = parts.summary.take().or_else(|| doc.summary());
    if let Some(privacy) = doc.privacy() {
        parts.privacy = Some(privacy);
    }
    if doc.is_ignored() {
        parts.ignore = true;
    }

    for parameter in &mut parts.parameters {
        let Some(tag) = doc.param(&parameter.name) else {
            continue;
        };
        if parameter.param_type.is_none() {
            parameter.param_type = tag.type_text.clone().map(Type::new);
        }
        if parameter.description.is_none() {
            parameter.description = tag.description.clone();
        }
        if parameter.default.is_none() {
            parameter.default = tag.default.clone();
        }
        parameter.optional = parameter.optional || tag.optional;
    }

    if let Some(tag) = doc.returns() {
        let info = parts.return_info.get_or_insert_with(FunctionReturn::default);
        if info.return_type.is_none() {
            info.return_type = tag.type_text.clone().map(Type::new);
        }
        if info.description.is_none() {
            info.description = tag.description.clone();
        }
    }
}
