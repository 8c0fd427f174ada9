//! Export extraction (analyze phase)
//!
//! Produces one export record per exported binding: declarations exported
//! in place, default exports, named export clauses (with and without a
//! source), and aggregate re-exports.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::plugins::is_top_level;
use crate::schema::{Export, ExportKind, Reference};
use crate::utils::paths;

pub struct ExportsPlugin;

impl Plugin for ExportsPlugin {
    fn name(&self) -> &str {
        "CORE - EXPORTS"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if args.node.kind() != "export_statement" || !is_top_level(args.node) {
            return Ok(());
        }
        let node = args.node;
        let source = args.source;
        let current_path = args.context.current_module_path().to_string();

        let export_source = node
            .child_by_field_name("source")
            .and_then(|s| ast::string_literal_value(s, source));

        // `export * from './x'`, an aggregate re-export.
        if ast::has_child_of_kind(node, "*") {
            if let Some(specifier) = export_source {
                args.module.exports.push(Export {
                    kind: ExportKind::Js,
                    name: "*".to_string(),
                    declaration: reference_through("*", &specifier, &current_path),
                });
            }
            return Ok(());
        }

        if let Some(declaration) = node.child_by_field_name("declaration") {
            let is_default = ast::has_child_of_kind(node, "default");
            for declared in declared_names(declaration, source) {
                args.module.exports.push(Export {
                    kind: ExportKind::Js,
                    name: if is_default {
                        "default".to_string()
                    } else {
                        declared.clone()
                    },
                    declaration: Reference::local(declared, current_path.clone()),
                });
            }
            return Ok(());
        }

        // `export default someIdentifier;`
        if ast::has_child_of_kind(node, "default") {
            let value = node
                .child_by_field_name("value")
                .or_else(|| ast::find_child_by_kind(node, "identifier"));
            if let Some(value) = value {
                if value.kind() == "identifier" {
                    args.module.exports.push(Export {
                        kind: ExportKind::Js,
                        name: "default".to_string(),
                        declaration: args.context.resolve(ast::node_text(value, source)),
                    });
                }
            }
            return Ok(());
        }

        // `export { a, b as c }` with or without a source.
        if let Some(clause) = ast::find_child_by_kind(node, "export_clause") {
            for specifier in ast::find_children_by_kind(clause, "export_specifier") {
                let Some(original) = specifier
                    .child_by_field_name("name")
                    .map(|n| ast::node_text(n, source).to_string())
                else {
                    continue;
                };
                let exported_as = specifier
                    .child_by_field_name("alias")
                    .map(|n| ast::node_text(n, source).to_string())
                    .unwrap_or_else(|| original.clone());

                let declaration = match &export_source {
                    Some(specifier_path) => {
                        reference_through(&original, specifier_path, &current_path)
                    }
                    None => args.context.resolve(&original),
                };
                args.module.exports.push(Export {
                    kind: ExportKind::Js,
                    name: exported_as,
                    declaration,
                });
            }
        }
        Ok(())
    }
}

/// Reference a name through an explicit re-export source specifier.
fn reference_through(name: &str, specifier: &str, current_path: &str) -> Reference {
    if paths::is_bare_specifier(specifier) {
        Reference::package(name, specifier)
    } else {
        Reference::local(name, paths::resolve_relative(current_path, specifier))
    }
}

/// Names declared by an exported declaration node.
fn declared_names(declaration: tree_sitter::Node, source: &str) -> Vec<String> {
    match declaration.kind() {
        "class_declaration" | "function_declaration" | "abstract_class_declaration" => {
            ast::field_text(declaration, "name", source)
                .into_iter()
                .collect()
        }
        "lexical_declaration" | "variable_declaration" => {
            ast::find_children_by_kind(declaration, "variable_declarator")
                .into_iter()
                .filter_map(|declarator| {
                    declarator
                        .child_by_field_name("name")
                        .filter(|name| name.kind() == "identifier")
                        .map(|name| ast::node_text(name, source).to_string())
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::language::parse_module;
    use crate::schema::Module;

    fn analyze(source: &str) -> Module {
        let tree = parse_module("src/el.js", source).unwrap();
        let mut context = AnalyzerContext::new(false, Vec::new());
        context.begin_collect("src/el.js");
        context.finish_collect();
        context.begin_analyze("src/el.js");
        let mut module = Module::new("src/el.js");
        let mut plugin = ExportsPlugin;
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
    fn exported_declarations() {
        let module = analyze("export class MyEl {}\nexport const a = 1, b = 2;");
        let names: Vec<&str> = module.exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["MyEl", "a", "b"]);
        assert_eq!(
            module.exports[0].declaration,
            Reference::local("MyEl", "src/el.js")
        );
    }

    #[test]
    fn default_export_of_declaration() {
        let module = analyze("export default class MyEl {}");
        assert_eq!(module.exports[0].name, "default");
        assert_eq!(module.exports[0].declaration.name, "MyEl");
    }

    #[test]
    fn named_clause_with_alias() {
        let module = analyze("class A {}\nexport { A as Renamed };");
        assert_eq!(module.exports[0].name, "Renamed");
        assert_eq!(module.exports[0].declaration.name, "A");
        assert_eq!(
            module.exports[0].declaration.module.as_deref(),
            Some("src/el.js")
        );
    }

    #[test]
    fn reexport_through_relative_source() {
        let module = analyze("export { Base } from './base.js';");
        assert_eq!(
            module.exports[0].declaration,
            Reference::local("Base", "src/base.js")
        );
    }

    #[test]
    fn aggregate_reexport() {
        let module = analyze("export * from 'lit';");
        assert_eq!(module.exports[0].name, "*");
        assert_eq!(
            module.exports[0].declaration,
            Reference::package("*", "lit")
        );
    }
}
