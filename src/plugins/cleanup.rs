//! Per-module cleanup (module link phase)
//!
//! Runs once per module, after its analyze pass, with the complete module
//! document in hand: strips lifecycle callback methods nobody documents,
//! and drops everything flagged `@ignore`/`@internal` during analysis.
//! Empty list fields never serialize, so no array stripping is needed at
//! assembly time.

use anyhow::Result;

use crate::analysis::plugin::{ModuleLinkArgs, Plugin};
use crate::schema::ClassMember;

/// Standard lifecycle callbacks that never belong in a manifest.
const LIFECYCLE_DENY_LIST: &[&str] = &[
    "constructor",
    "connectedCallback",
    "disconnectedCallback",
    "adoptedCallback",
    "attributeChangedCallback",
    "formAssociatedCallback",
    "formDisabledCallback",
    "formResetCallback",
    "formStateRestoreCallback",
];

pub struct ModuleCleanupPlugin;

impl Plugin for ModuleCleanupPlugin {
    fn name(&self) -> &str {
        "CORE - MODULE-CLEANUP"
    }

    fn module_link(&mut self, args: &mut ModuleLinkArgs<'_>) -> Result<()> {
        args.module
            .declarations
            .retain(|declaration| !declaration.is_ignored());

        for declaration in &mut args.module.declarations {
            let Some(class_like) = declaration.as_class_like_mut() else {
                continue;
            };
            class_like.members_mut().retain(|member| {
                if member.is_ignored() {
                    return false;
                }
                match member {
                    ClassMember::Method(method) => {
                        !LIFECYCLE_DENY_LIST.contains(&method.name.as_str())
                    }
                    ClassMember::Field(_) => true,
                }
            });
        }

        // Drop exports whose declaration was removed as ignored.
        let declared: Vec<String> = args
            .module
            .declarations
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        let module_path = args.module.path.clone();
        args.module.exports.retain(|export| {
            match &export.declaration.module {
                Some(path) if *path == module_path => declared.contains(&export.declaration.name),
                // References into other modules or packages are not ours
                // to police here.
                _ => true,
            }
        });

        Ok(())
    }
}
