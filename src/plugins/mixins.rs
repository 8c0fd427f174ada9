//! Mixin declarations (analyze phase)
//!
//! Picks up the function and variable declarations the earlier plugins
//! skipped because they matched a mixin shape, and builds them with the
//! mixin builder.

use anyhow::Result;
use tree_sitter::Node;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::builders::mixin;
use crate::jsdoc;
use crate::plugins::is_top_level;
use crate::schema::Declaration;

pub struct MixinsPlugin;

impl Plugin for MixinsPlugin {
    fn name(&self) -> &str {
        "CORE - MIXINS"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if !is_top_level(args.node) {
            return Ok(());
        }
        match args.node.kind() {
            "function_declaration" => {
                let node = args.node;
                let name = ast::field_text(node, "name", args.source);
                try_build(args, node, node, name);
            }
            "lexical_declaration" | "variable_declaration" => {
                for declarator in ast::find_children_by_kind(args.node, "variable_declarator") {
                    let Some(value) = declarator.child_by_field_name("value") else {
                        continue;
                    };
                    let name = declarator
                        .child_by_field_name("name")
                        .filter(|n| n.kind() == "identifier")
                        .map(|n| ast::node_text(n, args.source).to_string());
                    try_build(args, value, declarator, name);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Detect and build one mixin candidate. `doc_node` is where the JSDoc
/// lives (the declarator for variable-bound mixins).
fn try_build(
    args: &mut AnalyzeArgs<'_, '_>,
    candidate: Node<'_>,
    doc_node: Node<'_>,
    name: Option<String>,
) {
    let Some(name) = name else { return };
    if args.module.has_declaration(&name) {
        return;
    }
    let Some(detected) = mixin::detect_mixin(candidate, args.source) else {
        return;
    };

    let doc = jsdoc::for_node(doc_node, args.source);
    let (mut declaration, inner_mixin_names) =
        mixin::build_mixin(name, detected, args.source, doc.as_ref());
    declaration.mixins = inner_mixin_names
        .iter()
        .map(|inner| args.context.resolve(inner))
        .collect();

    args.module.declarations.push(Declaration::Mixin(declaration));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::language::parse_module;
    use crate::schema::{Module, Reference};

    fn analyze(source: &str) -> Module {
        let tree = parse_module("src/mixins.js", source).unwrap();
        let mut context = AnalyzerContext::new(false, Vec::new());
        context.begin_collect("src/mixins.js");
        context.finish_collect();
        context.begin_analyze("src/mixins.js");
        let mut module = Module::new("src/mixins.js");
        let mut plugin = MixinsPlugin;
        ast::walk_tree(tree.root_node(), &mut |node| {
            let mut args = AnalyzeArgs {
                node,
                source,
                module: &mut module,
                context: &mut context,
            };
            plugin.analyze(&mut args).unwrap();
        });
        module
    }

    #[test]
    fn arrow_mixin_with_members() {
        let module = analyze(
            "export const DisabledMixin = klass => class extends klass { disabled = false; };",
        );
        let Declaration::Mixin(mixin) = &module.declarations[0] else {
            panic!("expected mixin");
        };
        assert_eq!(mixin.name, "DisabledMixin");
        assert_eq!(mixin.members[0].name(), "disabled");
        assert_eq!(mixin.parameters[0].name, "klass");
    }

    #[test]
    fn function_mixin_with_named_return() {
        let module = analyze(
            "export function LoggerMixin(Base) { class Logger extends Base { log() {} } return Logger; }",
        );
        let Declaration::Mixin(mixin) = &module.declarations[0] else {
            panic!("expected mixin");
        };
        assert_eq!(mixin.name, "LoggerMixin");
        assert_eq!(mixin.members[0].name(), "log");
    }

    #[test]
    fn chained_mixin_applications_resolve() {
        let module =
            analyze("const M = klass => class extends Other(klass) { x = 1; };");
        let Declaration::Mixin(mixin) = &module.declarations[0] else {
            panic!("expected mixin");
        };
        assert_eq!(
            mixin.mixins[0],
            Reference::local("Other", "src/mixins.js")
        );
    }

    #[test]
    fn plain_functions_do_not_match() {
        let module = analyze("function add(a, b) { return a + b; }");
        assert!(module.declarations.is_empty());
    }
}
