//! Wrapped mixin exports (analyze phase)
//!
//! `export const M = dedupe(klass => class extends klass { ... })` hides
//! the mixin shape inside a call expression, so the mixins plugin never
//! sees it. This plugin looks through top-level call-expression arguments
//! of exported variable initializers for an inner mixin shape and unwraps
//! it under the exported name.

use anyhow::Result;
use tree_sitter::Node;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::builders::mixin::{self, MixinMatch};
use crate::jsdoc;
use crate::plugins::is_top_level;
use crate::schema::Declaration;

pub struct ReexportedWrappedMixinsPlugin;

impl Plugin for ReexportedWrappedMixinsPlugin {
    fn name(&self) -> &str {
        "CORE - REEXPORTED-WRAPPED-MIXINS"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if args.node.kind() != "export_statement" || !is_top_level(args.node) {
            return Ok(());
        }
        let source = args.source;
        let Some(declaration) = args.node.child_by_field_name("declaration") else {
            return Ok(());
        };
        if !matches!(
            declaration.kind(),
            "lexical_declaration" | "variable_declaration"
        ) {
            return Ok(());
        }

        for declarator in ast::find_children_by_kind(declaration, "variable_declarator") {
            let Some(value) = declarator.child_by_field_name("value") else {
                continue;
            };
            if value.kind() != "call_expression" {
                continue;
            }
            let Some(name) = declarator
                .child_by_field_name("name")
                .filter(|n| n.kind() == "identifier")
                .map(|n| ast::node_text(n, source).to_string())
            else {
                continue;
            };
            let Some(detected) = wrapped_mixin(value, source) else {
                continue;
            };

            let doc = jsdoc::for_node(declarator, source);
            let (mut mixin_declaration, inner_mixin_names) =
                mixin::build_mixin(name, detected, source, doc.as_ref());
            mixin_declaration.mixins = inner_mixin_names
                .iter()
                .map(|inner| args.context.resolve(inner))
                .collect();

            // The variables plugin ran earlier in this pass and saw only an
            // opaque call expression; its placeholder record is refined
            // into the unwrapped mixin.
            let existing = args
                .module
                .declarations
                .iter()
                .position(|d| d.name() == mixin_declaration.name);
            match existing {
                Some(index)
                    if matches!(args.module.declarations[index], Declaration::Variable(_)) =>
                {
                    args.module.declarations[index] = Declaration::Mixin(mixin_declaration);
                }
                Some(_) => {}
                None => args
                    .module
                    .declarations
                    .push(Declaration::Mixin(mixin_declaration)),
            }
        }
        Ok(())
    }
}

/// Search a call expression's arguments (through nested wrapping calls)
/// for a mixin-shaped function.
fn wrapped_mixin<'t>(call: Node<'t>, source: &str) -> Option<MixinMatch<'t>> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    for argument in arguments.named_children(&mut cursor) {
        match argument.kind() {
            "arrow_function" | "function_expression" => {
                if let Some(found) = mixin::detect_mixin(argument, source) {
                    return Some(found);
                }
            }
            "call_expression" => {
                if let Some(found) = wrapped_mixin(argument, source) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}
