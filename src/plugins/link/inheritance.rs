//! Inheritance application (package link phase)
//!
//! Last of the built-in passes: hands the fully linked document graph to
//! the inheritance resolver, together with any externally supplied
//! manifests for references that land outside the analyzed modules.

use anyhow::Result;

use crate::analysis::plugin::{PackageLinkArgs, Plugin};
use crate::resolve::inheritance;

pub struct ApplyInheritancePlugin;

impl Plugin for ApplyInheritancePlugin {
    fn name(&self) -> &str {
        "CORE - APPLY-INHERITANCE"
    }

    fn package_link(&mut self, args: &mut PackageLinkArgs<'_>) -> Result<()> {
        inheritance::apply_inheritance(args.manifest, args.context.third_party_manifests());
        Ok(())
    }
}
