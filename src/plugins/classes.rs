//! Top-level class declarations (analyze phase)
//!
//! Runs the class builder and resolves heritage names against the current
//! module's import table. Has to run before the class JSDoc plugin, which
//! attaches to declarations by name.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::builders::class;
use crate::plugins::is_top_level;
use crate::schema::Declaration;

pub struct ClassesPlugin;

impl Plugin for ClassesPlugin {
    fn name(&self) -> &str {
        "CORE - CLASSES"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if !matches!(
            args.node.kind(),
            "class_declaration" | "abstract_class_declaration"
        ) || !is_top_level(args.node)
        {
            return Ok(());
        }

        let build = class::build_class(args.node, args.source);
        if build.declaration.name.is_empty()
            || args.module.has_declaration(&build.declaration.name)
        {
            return Ok(());
        }

        let mut declaration = build.declaration;
        declaration.superclass = build
            .superclass_name
            .map(|name| args.context.resolve(&name));
        declaration.mixins = build
            .mixin_names
            .iter()
            .map(|name| args.context.resolve(name))
            .collect();

        args.module
            .declarations
            .push(Declaration::Class(declaration));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::{AnalyzerContext, ImportKind, ImportRecord};
    use crate::ast;
    use crate::language::parse_module;
    use crate::schema::{Module, Reference};

    fn analyze_with_imports(source: &str, imports: Vec<ImportRecord>) -> Module {
        let tree = parse_module("src/el.js", source).unwrap();
        let mut context = AnalyzerContext::new(false, Vec::new());
        context.begin_collect("src/el.js");
        for record in imports {
            context.push_import(record);
        }
        context.finish_collect();
        context.begin_analyze("src/el.js");
        let mut module = Module::new("src/el.js");
        let mut plugin = ClassesPlugin;
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
    fn heritage_resolves_through_imports() {
        let imports = vec![ImportRecord {
            name: "Base".to_string(),
            kind: ImportKind::Default,
            import_path: "./base.js".to_string(),
            is_bare_module_specifier: false,
            is_type_only: false,
        }];
        let module = analyze_with_imports("class MyEl extends Base {}", imports);
        let class = module.declarations[0].as_class().unwrap();
        assert_eq!(
            class.superclass.as_ref().unwrap(),
            &Reference::local("Base", "src/base.js")
        );
    }

    #[test]
    fn unimported_heritage_is_assumed_local() {
        let module = analyze_with_imports("class MyEl extends HTMLElement {}", Vec::new());
        let class = module.declarations[0].as_class().unwrap();
        assert_eq!(
            class.superclass.as_ref().unwrap(),
            &Reference::local("HTMLElement", "src/el.js")
        );
    }

    #[test]
    fn mixin_applications_resolve_in_order() {
        let imports = vec![ImportRecord {
            name: "A".to_string(),
            kind: ImportKind::Named,
            import_path: "lib".to_string(),
            is_bare_module_specifier: true,
            is_type_only: false,
        }];
        let module = analyze_with_imports("class X extends A(B(Base)) {}", imports);
        let class = module.declarations[0].as_class().unwrap();
        assert_eq!(class.mixins[0], Reference::package("A", "lib"));
        assert_eq!(class.mixins[1], Reference::local("B", "src/el.js"));
    }

    #[test]
    fn duplicate_names_first_declaration_wins() {
        let module =
            analyze_with_imports("class Twice { a() {} }\nclass Twice { b() {} }", Vec::new());
        assert_eq!(module.declarations.len(), 1);
        let class = module.declarations[0].as_class().unwrap();
        assert_eq!(class.members[0].name(), "a");
    }
}
