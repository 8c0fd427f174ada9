//! Initializer resolution (package link phase)
//!
//! A field initialized from a bare identifier (`this.size = DEFAULT_SIZE`)
//! captured no default during analysis. Once every module's declarations
//! exist, the identifier is resolved like any other symbol; when it lands
//! on a known variable declaration, the variable's type and default are
//! borrowed for whatever the field left unset.

use anyhow::Result;

use crate::analysis::plugin::{PackageLinkArgs, Plugin};
use crate::resolve::symbols;
use crate::schema::{ClassMember, Manifest, Reference, Type, VariableDeclaration};

pub struct ResolveInitializersPlugin;

impl Plugin for ResolveInitializersPlugin {
    fn name(&self) -> &str {
        "CORE - RESOLVE-INITIALIZERS"
    }

    fn package_link(&mut self, args: &mut PackageLinkArgs<'_>) -> Result<()> {
        // Two steps to keep borrows simple: plan all the copies against the
        // immutable graph, then apply them.
        struct Planned {
            module_index: usize,
            declaration_index: usize,
            field_name: String,
            var_type: Option<Type>,
            default: Option<String>,
        }
        let mut planned: Vec<Planned> = Vec::new();

        for (module_index, module) in args.manifest.modules.iter().enumerate() {
            for (declaration_index, declaration) in module.declarations.iter().enumerate() {
                let Some(class_like) = declaration.as_class_like() else {
                    continue;
                };
                for member in class_like.members() {
                    let ClassMember::Field(field) = member else {
                        continue;
                    };
                    let Some(initializer) = &field.initializer_ref else {
                        continue;
                    };
                    let reference = symbols::resolve(
                        initializer,
                        &module.path,
                        args.context.imports_for(&module.path),
                    );
                    let Some(variable) = find_variable(
                        &reference,
                        args.manifest,
                        args.context.third_party_manifests(),
                    ) else {
                        continue;
                    };
                    planned.push(Planned {
                        module_index,
                        declaration_index,
                        field_name: field.name.clone(),
                        var_type: variable.var_type.clone(),
                        default: variable.default.clone(),
                    });
                }
            }
        }

        for plan in planned {
            let declaration =
                &mut args.manifest.modules[plan.module_index].declarations[plan.declaration_index];
            let Some(class_like) = declaration.as_class_like_mut() else {
                continue;
            };
            for member in class_like.members_mut() {
                let ClassMember::Field(field) = member else {
                    continue;
                };
                if field.name != plan.field_name {
                    continue;
                }
                if field.field_type.is_none() {
                    field.field_type = plan.var_type.clone();
                }
                if field.default.is_none() {
                    field.default = plan.default.clone();
                }
            }
        }
        Ok(())
    }
}

fn find_variable<'a>(
    reference: &Reference,
    manifest: &'a Manifest,
    third_party: &'a [Manifest],
) -> Option<&'a VariableDeclaration> {
    let module_path = reference.module.as_deref()?;
    manifest
        .find_declaration(module_path, &reference.name)
        .or_else(|| {
            third_party
                .iter()
                .find_map(|external| external.find_declaration(module_path, &reference.name))
        })
        .and_then(|declaration| declaration.as_variable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::context::AnalyzerContext;
    use crate::schema::{ClassDeclaration, ClassField, Declaration, Module};

    #[test]
    fn field_borrows_variable_type_and_default() {
        let mut class = ClassDeclaration::new("MyEl");
        let mut field = ClassField::new("size");
        field.initializer_ref = Some("DEFAULT_SIZE".to_string());
        class.members.push(ClassMember::Field(field));

        let variable = VariableDeclaration {
            name: "DEFAULT_SIZE".to_string(),
            var_type: Some(Type::new("number")),
            default: Some("10".to_string()),
            ..Default::default()
        };

        let mut module = Module::new("src/el.js");
        module.declarations.push(Declaration::Class(class));
        module.declarations.push(Declaration::Variable(variable));
        let mut manifest = Manifest::new(None);
        manifest.modules.push(module);

        let mut context = AnalyzerContext::new(false, Vec::new());
        let mut plugin = ResolveInitializersPlugin;
        let mut args = PackageLinkArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        plugin.package_link(&mut args).unwrap();

        let class = manifest.modules[0].declarations[0].as_class().unwrap();
        let ClassMember::Field(field) = &class.members[0] else {
            panic!("expected field");
        };
        assert_eq!(field.field_type.as_ref().unwrap().text, "number");
        assert_eq!(field.default.as_deref(), Some("10"));
    }

    #[test]
    fn unresolvable_initializers_change_nothing() {
        let mut class = ClassDeclaration::new("MyEl");
        let mut field = ClassField::new("size");
        field.initializer_ref = Some("window".to_string());
        class.members.push(ClassMember::Field(field));

        let mut module = Module::new("src/el.js");
        module.declarations.push(Declaration::Class(class));
        let mut manifest = Manifest::new(None);
        manifest.modules.push(module);

        let mut context = AnalyzerContext::new(false, Vec::new());
        let mut plugin = ResolveInitializersPlugin;
        let mut args = PackageLinkArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        plugin.package_link(&mut args).unwrap();

        let class = manifest.modules[0].declarations[0].as_class().unwrap();
        let ClassMember::Field(field) = &class.members[0] else {
            panic!("expected field");
        };
        assert_eq!(field.default, None);
        assert_eq!(field.field_type, None);
    }
}
