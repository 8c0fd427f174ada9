//! Import collection (collect phase)
//!
//! Records every import binding under its local bound name. This is the
//! only thing the collect phase does: the records feed symbol resolution
//! during analyze and are never part of the manifest.

use anyhow::Result;

use crate::analysis::context::{ImportKind, ImportRecord};
use crate::analysis::plugin::{CollectArgs, Plugin};
use crate::ast;
use crate::utils::paths;

pub struct ImportsPlugin;

impl Plugin for ImportsPlugin {
    fn name(&self) -> &str {
        "CORE - IMPORTS"
    }

    fn collect(&mut self, args: &mut CollectArgs<'_, '_>) -> Result<()> {
        if args.node.kind() != "import_statement" {
            return Ok(());
        }
        let node = args.node;
        let source = args.source;

        let Some(import_path) = node
            .child_by_field_name("source")
            .and_then(|s| ast::string_literal_value(s, source))
        else {
            return Ok(());
        };
        let is_bare = paths::is_bare_specifier(&import_path);
        // `import type { ... }` marks the whole statement type-only.
        let statement_type_only = ast::has_child_of_kind(node, "type");

        let record = |name: String, kind: ImportKind, type_only: bool| ImportRecord {
            name,
            kind,
            import_path: import_path.clone(),
            is_bare_module_specifier: is_bare,
            is_type_only: statement_type_only || type_only,
        };

        let Some(clause) = ast::find_child_by_kind(node, "import_clause") else {
            // No bindings: a side-effect import.
            args.context
                .push_import(record(String::new(), ImportKind::SideEffect, false));
            return Ok(());
        };

        let mut cursor = clause.walk();
        for child in clause.children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    args.context.push_import(record(
                        ast::node_text(child, source).to_string(),
                        ImportKind::Default,
                        false,
                    ));
                }
                "namespace_import" => {
                    if let Some(binding) = ast::find_child_by_kind(child, "identifier") {
                        args.context.push_import(record(
                            ast::node_text(binding, source).to_string(),
                            ImportKind::Aggregate,
                            false,
                        ));
                    }
                }
                "named_imports" => {
                    for specifier in ast::find_children_by_kind(child, "import_specifier") {
                        // Aliased imports are recorded under the local
                        // binding, not the original exported name.
                        let local = specifier
                            .child_by_field_name("alias")
                            .or_else(|| specifier.child_by_field_name("name"));
                        let Some(local) = local else { continue };
                        args.context.push_import(record(
                            ast::node_text(local, source).to_string(),
                            ImportKind::Named,
                            ast::has_child_of_kind(specifier, "type"),
                        ));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::language::parse_module;

    fn collect(source: &str) -> Vec<ImportRecord> {
        let tree = parse_module("src/el.js", source).unwrap();
        let mut context = AnalyzerContext::new(false, Vec::new());
        context.begin_collect("src/el.js");
        let mut plugin = ImportsPlugin;
        ast::walk_tree(tree.root_node(), &mut |node| {
            let mut args = CollectArgs {
                node,
                source,
                context: &mut context,
            };
            plugin.collect(&mut args).unwrap();
        });
        context.imports().to_vec()
    }

    #[test]
    fn default_named_and_aliased() {
        let records = collect(
            "import Base from './base.js';\nimport { one, two as alias } from 'lib';",
        );
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Base");
        assert_eq!(records[0].kind, ImportKind::Default);
        assert!(!records[0].is_bare_module_specifier);

        assert_eq!(records[1].name, "one");
        assert_eq!(records[2].name, "alias", "alias is the local binding");
        assert!(records[2].is_bare_module_specifier);
    }

    #[test]
    fn namespace_and_side_effect() {
        let records = collect("import * as helpers from './helpers.js';\nimport './register.js';");
        assert_eq!(records[0].name, "helpers");
        assert_eq!(records[0].kind, ImportKind::Aggregate);
        assert_eq!(records[1].kind, ImportKind::SideEffect);
        assert_eq!(records[1].name, "");
    }

    #[test]
    fn type_only_imports_are_marked() {
        let source = "import type { Settings } from './types.js';";
        let tree = parse_module("src/el.ts", source).unwrap();
        let mut context = AnalyzerContext::new(false, Vec::new());
        context.begin_collect("src/el.ts");
        let mut plugin = ImportsPlugin;
        ast::walk_tree(tree.root_node(), &mut |node| {
            let mut args = CollectArgs {
                node,
                source,
                context: &mut context,
            };
            plugin.collect(&mut args).unwrap();
        });
        let records = context.imports();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_type_only);
    }
}
