//! Arrow functions bound to top-level variables (analyze phase)
//!
//! `const f = () => ...` and `const f = function () {}` surface as
//! function declarations named after the variable. Mixin-shaped values
//! are left for the mixins plugin.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::builders::{function, mixin};
use crate::jsdoc;
use crate::plugins::is_top_level;
use crate::schema::{Declaration, FunctionDeclaration};

pub struct ArrowFunctionPlugin;

impl Plugin for ArrowFunctionPlugin {
    fn name(&self) -> &str {
        "CORE - ARROW-FUNCTION"
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
            let Some(value) = declarator.child_by_field_name("value") else {
                continue;
            };
            if !matches!(value.kind(), "arrow_function" | "function_expression") {
                continue;
            }
            if mixin::detect_mixin(value, source).is_some() {
                continue;
            }
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

            let doc = jsdoc::for_node(declarator, source);
            let parts = function::build_function_like(value, source, doc.as_ref());
            args.module
                .declarations
                .push(Declaration::Function(FunctionDeclaration {
                    name,
                    description: parts.description,
                    summary: parts.summary,
                    parameters: parts.parameters,
                    return_info: parts.return_info,
                    ignore: parts.ignore,
                }));
        }
        Ok(())
    }
}
