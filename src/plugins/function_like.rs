//! Top-level function declarations (analyze phase)
//!
//! Plain functions only: anything matching a mixin shape is left for the
//! mixins plugin, which runs later in the same pass.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::builders::{function, mixin};
use crate::jsdoc;
use crate::plugins::is_top_level;
use crate::schema::{Declaration, FunctionDeclaration};

pub struct FunctionLikePlugin;

impl Plugin for FunctionLikePlugin {
    fn name(&self) -> &str {
        "CORE - FUNCTION-LIKE"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if args.node.kind() != "function_declaration" || !is_top_level(args.node) {
            return Ok(());
        }
        if mixin::detect_mixin(args.node, args.source).is_some() {
            return Ok(());
        }

        let doc = jsdoc::for_node(args.node, args.source);
        let parts = function::build_function_like(args.node, args.source, doc.as_ref());
        if parts.name.is_empty() || args.module.has_declaration(&parts.name) {
            return Ok(());
        }

        args.module
            .declarations
            .push(Declaration::Function(FunctionDeclaration {
                name: parts.name,
                description: parts.description,
                summary: parts.summary,
                parameters: parts.parameters,
                return_info: parts.return_info,
                ignore: parts.ignore,
            }));
        Ok(())
    }
}
