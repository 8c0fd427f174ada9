//! Tag-name linking (package link phase)
//!
//! Matches `custom-element-definition` exports back to the class
//! declarations they reference and stamps the tag name on the class. A
//! decorator- or `@tagname`-declared tag already on the class stands.

use anyhow::Result;
use tracing::warn;

use crate::analysis::plugin::{PackageLinkArgs, Plugin};

pub struct LinkTagNamesPlugin;

impl Plugin for LinkTagNamesPlugin {
    fn name(&self) -> &str {
        "CORE - LINK-TAG-NAMES"
    }

    fn package_link(&mut self, args: &mut PackageLinkArgs<'_>) -> Result<()> {
        struct Link {
            module_path: String,
            class_name: String,
            tag_name: String,
        }
        let mut links: Vec<Link> = Vec::new();

        for module in &args.manifest.modules {
            for export in &module.exports {
                if export.kind != crate::schema::ExportKind::CustomElementDefinition {
                    continue;
                }
                let Some(module_path) = export.declaration.module.clone() else {
                    // A definition of a class imported from a bare package;
                    // nothing local to annotate.
                    continue;
                };
                links.push(Link {
                    module_path,
                    class_name: export.declaration.name.clone(),
                    tag_name: export.name.clone(),
                });
            }
        }

        for link in links {
            let target = args
                .manifest
                .module_mut(&link.module_path)
                .and_then(|module| module.declaration_mut(&link.class_name))
                .and_then(|declaration| declaration.as_class_mut());
            match target {
                Some(class) => {
                    if class.tag_name.is_none() {
                        class.tag_name = Some(link.tag_name);
                    }
                }
                None => warn!(
                    "custom element definition '{}' references unknown class '{}' in '{}'",
                    link.tag_name, link.class_name, link.module_path
                ),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::schema::{
        ClassDeclaration, Declaration, Export, ExportKind, Manifest, Module, Reference,
    };

    #[test]
    fn definition_export_stamps_the_class() {
        let mut module = Module::new("src/el.js");
        module
            .declarations
            .push(Declaration::Class(ClassDeclaration::new("MyEl")));
        module.exports.push(Export {
            kind: ExportKind::CustomElementDefinition,
            name: "my-el".to_string(),
            declaration: Reference::local("MyEl", "src/el.js"),
        });
        let mut manifest = Manifest::new(None);
        manifest.modules.push(module);

        let mut context = AnalyzerContext::new(false, Vec::new());
        let mut plugin = LinkTagNamesPlugin;
        let mut args = PackageLinkArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        plugin.package_link(&mut args).unwrap();

        let class = manifest.modules[0].declarations[0].as_class().unwrap();
        assert_eq!(class.tag_name.as_deref(), Some("my-el"));
    }

    #[test]
    fn definitions_link_across_modules() {
        let mut defining = Module::new("src/define.js");
        defining.exports.push(Export {
            kind: ExportKind::CustomElementDefinition,
            name: "my-el".to_string(),
            declaration: Reference::local("MyEl", "src/el.js"),
        });
        let mut declaring = Module::new("src/el.js");
        declaring
            .declarations
            .push(Declaration::Class(ClassDeclaration::new("MyEl")));

        let mut manifest = Manifest::new(None);
        manifest.modules.push(declaring);
        manifest.modules.push(defining);

        let mut context = AnalyzerContext::new(false, Vec::new());
        let mut plugin = LinkTagNamesPlugin;
        let mut args = PackageLinkArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        plugin.package_link(&mut args).unwrap();

        let class = manifest.modules[0].declarations[0].as_class().unwrap();
        assert_eq!(class.tag_name.as_deref(), Some("my-el"));
    }
}
