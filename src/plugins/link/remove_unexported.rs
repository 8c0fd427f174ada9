//! Unexported declaration removal (package link phase)
//!
//! Declarations that are neither exported nor reachable from an exported
//! declaration are dropped. Reachability matters: an unexported local base
//! class or mixin still feeds inheritance flattening, and an unexported
//! variable may still be borrowed by initializer resolution, so removal
//! keeps the transitive closure of references alive.

use std::collections::HashSet;

use anyhow::Result;
use tracing::debug;

use crate::analysis::plugin::{PackageLinkArgs, Plugin};
use crate::resolve::symbols;
use crate::schema::{ClassMember, Declaration};

pub struct RemoveUnexportedPlugin;

impl Plugin for RemoveUnexportedPlugin {
    fn name(&self) -> &str {
        "CORE - REMOVE-UNEXPORTED-DECLARATIONS"
    }

    fn package_link(&mut self, args: &mut PackageLinkArgs<'_>) -> Result<()> {
        let mut keep: HashSet<(String, String)> = HashSet::new();

        // Seed with everything any module exports.
        for module in &args.manifest.modules {
            for export in &module.exports {
                if let Some(target_module) = &export.declaration.module {
                    keep.insert((target_module.clone(), export.declaration.name.clone()));
                }
            }
        }

        // Grow to the transitive closure of references out of kept
        // declarations: superclasses, mixins, and field initializers.
        loop {
            let mut grew = false;
            for module in &args.manifest.modules {
                for declaration in &module.declarations {
                    if !keep.contains(&(module.path.clone(), declaration.name().to_string())) {
                        continue;
                    }
                    for referenced in referenced_by(declaration, &module.path, args) {
                        grew |= keep.insert(referenced);
                    }
                }
            }
            if !grew {
                break;
            }
        }

        for module in &mut args.manifest.modules {
            let before = module.declarations.len();
            let path = module.path.clone();
            module
                .declarations
                .retain(|declaration| keep.contains(&(path.clone(), declaration.name().to_string())));
            if module.declarations.len() != before {
                debug!(
                    "removed {} unexported declarations from {}",
                    before - module.declarations.len(),
                    path
                );
            }
        }
        Ok(())
    }
}

fn referenced_by(
    declaration: &Declaration,
    module_path: &str,
    args: &PackageLinkArgs<'_>,
) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(class_like) = declaration.as_class_like() else {
        return out;
    };

    if let Some(superclass) = class_like.superclass() {
        if let Some(target) = &superclass.module {
            out.push((target.clone(), superclass.name.clone()));
        }
    }
    for mixin in class_like.mixin_refs() {
        if let Some(target) = &mixin.module {
            out.push((target.clone(), mixin.name.clone()));
        }
    }
    for member in class_like.members() {
        let ClassMember::Field(field) = member else {
            continue;
        };
        if let Some(initializer) = &field.initializer_ref {
            let reference = symbols::resolve(
                initializer,
                module_path,
                args.context.imports_for(module_path),
            );
            if let Some(target) = reference.module {
                out.push((target, reference.name));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::schema::{
        ClassDeclaration, Export, ExportKind, Manifest, Module, Reference, VariableDeclaration,
    };

    fn run(manifest: &mut Manifest) {
        let mut context = AnalyzerContext::new(false, Vec::new());
        let mut plugin = RemoveUnexportedPlugin;
        let mut args = PackageLinkArgs {
            manifest,
            context: &mut context,
        };
        plugin.package_link(&mut args).unwrap();
    }

    #[test]
    fn unexported_helpers_are_removed() {
        let mut module = Module::new("src/el.js");
        module
            .declarations
            .push(Declaration::Class(ClassDeclaration::new("Public")));
        module
            .declarations
            .push(Declaration::Variable(VariableDeclaration {
                name: "internalFlag".to_string(),
                ..Default::default()
            }));
        module.exports.push(Export {
            kind: ExportKind::Js,
            name: "Public".to_string(),
            declaration: Reference::local("Public", "src/el.js"),
        });

        let mut manifest = Manifest::new(None);
        manifest.modules.push(module);
        run(&mut manifest);

        assert_eq!(manifest.modules[0].declarations.len(), 1);
        assert_eq!(manifest.modules[0].declarations[0].name(), "Public");
    }

    #[test]
    fn unexported_base_classes_survive_through_references() {
        let mut module = Module::new("src/el.js");
        let mut exported = ClassDeclaration::new("Exported");
        exported.superclass = Some(Reference::local("LocalBase", "src/el.js"));
        module.declarations.push(Declaration::Class(exported));
        module
            .declarations
            .push(Declaration::Class(ClassDeclaration::new("LocalBase")));
        module.exports.push(Export {
            kind: ExportKind::Js,
            name: "Exported".to_string(),
            declaration: Reference::local("Exported", "src/el.js"),
        });

        let mut manifest = Manifest::new(None);
        manifest.modules.push(module);
        run(&mut manifest);

        let names: Vec<&str> = manifest.modules[0]
            .declarations
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, vec!["Exported", "LocalBase"]);
    }
}
