//! The shared per-run analysis context
//!
//! One `AnalyzerContext` exists per run and is threaded through every
//! plugin hook. It carries the dev flag, the third-party manifests
//! supplied at the merge point, and the transient import tables. Import
//! lists are fully repopulated when processing moves to a new module so
//! stale records can never leak across module boundaries.

use std::collections::HashMap;

use crate::resolve::symbols;
use crate::schema::{Manifest, Reference};

/// A collected import binding. Transient: exposed to the analyze phase via
/// the context, never part of the emitted manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// The local bound name. Aliased imports are recorded under the alias,
    /// not the original exported name. Empty for side-effect imports.
    pub name: String,
    pub kind: ImportKind,
    pub import_path: String,
    pub is_bare_module_specifier: bool,
    pub is_type_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Named,
    Aggregate,
    SideEffect,
}

#[derive(Debug)]
pub struct AnalyzerContext {
    /// Verbose diagnostics requested by the caller.
    pub dev: bool,
    current_module_path: String,
    /// The current module's import records, in AST visitation order.
    imports: Vec<ImportRecord>,
    /// Import tables per module, filled during the collect phase and kept
    /// around so package-link plugins can still resolve symbols.
    imports_by_module: HashMap<String, Vec<ImportRecord>>,
    third_party_manifests: Vec<Manifest>,
}

impl AnalyzerContext {
    pub fn new(dev: bool, third_party_manifests: Vec<Manifest>) -> Self {
        Self {
            dev,
            current_module_path: String::new(),
            imports: Vec::new(),
            imports_by_module: HashMap::new(),
            third_party_manifests,
        }
    }

    /// Enter a module for the collect phase: the import list starts empty.
    pub(crate) fn begin_collect(&mut self, module_path: &str) {
        self.current_module_path = module_path.to_string();
        self.imports = Vec::new();
    }

    /// Leave a module's collect phase, stashing its import table.
    pub(crate) fn finish_collect(&mut self) {
        let imports = std::mem::take(&mut self.imports);
        self.imports_by_module
            .insert(self.current_module_path.clone(), imports);
    }

    /// Enter a module for the analyze phase: the import list is restored
    /// wholesale from the collect phase, never merged incrementally.
    pub(crate) fn begin_analyze(&mut self, module_path: &str) {
        self.current_module_path = module_path.to_string();
        self.imports = self
            .imports_by_module
            .get(module_path)
            .cloned()
            .unwrap_or_default();
    }

    pub fn current_module_path(&self) -> &str {
        &self.current_module_path
    }

    pub fn push_import(&mut self, record: ImportRecord) {
        self.imports.push(record);
    }

    pub fn imports(&self) -> &[ImportRecord] {
        &self.imports
    }

    pub fn imports_for(&self, module_path: &str) -> &[ImportRecord] {
        self.imports_by_module
            .get(module_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a name used in the current module to a reference.
    pub fn resolve(&self, name: &str) -> Reference {
        symbols::resolve(name, &self.current_module_path, &self.imports)
    }

    pub fn third_party_manifests(&self) -> &[Manifest] {
        &self.third_party_manifests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, path: &str) -> ImportRecord {
        ImportRecord {
            name: name.to_string(),
            kind: ImportKind::Named,
            import_path: path.to_string(),
            is_bare_module_specifier: crate::utils::paths::is_bare_specifier(path),
            is_type_only: false,
        }
    }

    #[test]
    fn imports_repopulate_per_module() {
        let mut ctx = AnalyzerContext::new(false, Vec::new());

        ctx.begin_collect("src/a.js");
        ctx.push_import(named("Base", "./base.js"));
        ctx.finish_collect();

        ctx.begin_collect("src/b.js");
        ctx.finish_collect();

        ctx.begin_analyze("src/b.js");
        assert!(ctx.imports().is_empty(), "no leakage from src/a.js");

        ctx.begin_analyze("src/a.js");
        assert_eq!(ctx.imports().len(), 1);
        assert_eq!(ctx.resolve("Base").module.as_deref(), Some("src/base.js"));
    }
}
