//! `customElements.define` calls (analyze phase)
//!
//! Each definition call produces a `custom-element-definition` export
//! whose declaration reference points at the defined class. Tag names are
//! attached to the class declarations themselves later, at package link,
//! once every module's declarations exist.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::schema::{Export, ExportKind};

pub struct CustomElementsDefinePlugin;

impl Plugin for CustomElementsDefinePlugin {
    fn name(&self) -> &str {
        "CORE - CUSTOM-ELEMENTS-DEFINE-CALLS"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if args.node.kind() != "call_expression" {
            return Ok(());
        }
        let node = args.node;
        let source = args.source;

        let Some(function) = node.child_by_field_name("function") else {
            return Ok(());
        };
        if function.kind() != "member_expression" {
            return Ok(());
        }
        let callee = ast::node_text(function, source);
        if callee != "customElements.define" && callee != "window.customElements.define" {
            return Ok(());
        }

        let Some(arguments) = node.child_by_field_name("arguments") else {
            return Ok(());
        };
        let Some(tag_name) = arguments
            .named_child(0)
            .and_then(|first| ast::string_literal_value(first, source))
        else {
            return Ok(());
        };
        let Some(class_argument) = arguments.named_child(1) else {
            return Ok(());
        };
        if class_argument.kind() != "identifier" {
            // An inline class expression has no name to link against.
            return Ok(());
        }
        let class_name = ast::node_text(class_argument, source);

        args.module.exports.push(Export {
            kind: ExportKind::CustomElementDefinition,
            name: tag_name,
            declaration: args.context.resolve(class_name),
        });
        Ok(())
    }
}
