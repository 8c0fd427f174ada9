//! Top-level variable declarations (analyze phase)
//!
//! Variables with plain value initializers. Function-valued and
//! mixin-shaped declarators were claimed by earlier plugins; everything
//! else becomes a `variable` declaration with the same type inference and
//! default capture rules fields use.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::builders::{field, mixin};
use crate::jsdoc;
use crate::plugins::is_top_level;
use crate::schema::{Declaration, Type, VariableDeclaration};

pub struct VariablesPlugin;

impl Plugin for VariablesPlugin {
    fn name(&self) -> &str {
        "CORE - VARIABLES"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if !matches!(
            args.node.kind(),
            "lexical_declaration" | "variable_declaration"
        ) || !is_top_level(args.node)
        {
            return Ok(());
        }
        let source = args.source;

        for declarator in ast::find_children_by_kind(args.node, "variable_declarator") {
            let Some(name) = declarator
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")
                .map(|n| ast::node_text(n, source).to_string())
            else {
                continue;
            };
            if args.module.has_declaration(&name) {
                continue;
            }

            let value = declarator.child_by_field_name("value");
            if let Some(value) = value {
                if matches!(value.kind(), "arrow_function" | "function_expression" | "class") {
                    continue;
                }
                if mixin::detect_mixin(value, source).is_some() {
                    continue;
                }
            }

            let doc = jsdoc::for_node(declarator, source);
            let mut declaration = VariableDeclaration {
                name,
                var_type: ast::type_annotation_text(declarator, source).map(Type::new),
                ..Default::default()
            };
            if let Some(value) = value {
                if declaration.var_type.is_none() {
                    declaration.var_type = field::infer_type(value, source);
                }
                declaration.default = field::capture_default(value, source);
            }
            if let Some(doc) = &doc {
                declaration.description = doc.description.clone();
                declaration.summary = doc.summary();
                if declaration.var_type.is_none() {
                    declaration.var_type = doc.type_text().map(Type::new);
                }
                declaration.ignore = doc.is_ignored();
            }

            args.module
                .declarations
                .push(Declaration::Variable(declaration));
        }
        Ok(())
    }
}
