//! Custom-element classification (package link phase)
//!
//! Promotes a `class` declaration to `custom-element` once it carries a
//! tag name, or when it extends a base-element name known to mark a
//! custom element even without a local registration call.

use anyhow::Result;

use crate::analysis::plugin::{PackageLinkArgs, Plugin};
use crate::schema::{ClassDeclaration, Declaration};

/// Superclass names that mark a class as a custom element on their own.
const KNOWN_BASE_ELEMENTS: &[&str] = &["HTMLElement", "LitElement", "FASTElement", "PolymerElement"];

pub struct ClassifyCustomElementsPlugin;

impl Plugin for ClassifyCustomElementsPlugin {
    fn name(&self) -> &str {
        "CORE - CLASSIFY-CUSTOM-ELEMENTS"
    }

    fn package_link(&mut self, args: &mut PackageLinkArgs<'_>) -> Result<()> {
        for module in &mut args.manifest.modules {
            for declaration in &mut module.declarations {
                let promote = matches!(
                    &declaration,
                    Declaration::Class(class) if class.tag_name.is_some() || extends_known_base(class)
                );
                if !promote {
                    continue;
                }
                let placeholder =
                    std::mem::replace(declaration, Declaration::Class(ClassDeclaration::default()));
                if let Declaration::Class(class) = placeholder {
                    *declaration = Declaration::CustomElement(class);
                }
            }
        }
        Ok(())
    }
}

fn extends_known_base(class: &ClassDeclaration) -> bool {
    class
        .superclass
        .as_ref()
        .map(|superclass| KNOWN_BASE_ELEMENTS.contains(&superclass.name.as_str()))
        .unwrap_or(false)
}
