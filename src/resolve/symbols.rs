//! Best-effort symbol resolution
//!
//! Given a name used in a module, decide whether it refers to an import
//! from another local module, a bare package import, or a declaration
//! local to the module itself. This is a syntax-only resolver: it never
//! opens the target module to confirm the symbol actually exists there,
//! and it never fails: an unknown name is assumed local.

use crate::analysis::context::ImportRecord;
use crate::schema::Reference;
use crate::utils::paths;

/// Resolve a name against a module's collected imports.
///
/// When several imports bind the same local name, the last one collected
/// wins (collection order follows AST visitation order).
pub fn resolve(name: &str, current_module_path: &str, imports: &[ImportRecord]) -> Reference {
    let found = imports.iter().rev().find(|record| record.name == name);

    match found {
        Some(record) if record.is_bare_module_specifier => {
            Reference::package(name, record.import_path.clone())
        }
        Some(record) => Reference::local(
            name,
            paths::resolve_relative(current_module_path, &record.import_path),
        ),
        None => Reference::local(name, current_module_path),
    }
}
