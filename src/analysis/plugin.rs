//! The plugin capability contract
//!
//! A plugin is a bundle of up to five hooks. All hooks are optional: the
//! default bodies are no-ops, so implementers only override what they
//! need. Hooks fire in a fixed global order across all plugins; see the
//! orchestrator for the phase machine and the registry for the built-in
//! pipeline order.
//!
//! A hook returning an error aborts the entire run; the orchestrator
//! wraps it with the plugin's identity before surfacing it. Plugins must
//! tolerate partially populated documents: within one phase, earlier
//! plugins may not have run for the current node yet, and ordering within
//! a phase is significant (classes must exist before JSDoc-derived data
//! can attach to them).

use anyhow::Result;
use tree_sitter::Node;

use crate::analysis::context::AnalyzerContext;
use crate::schema::{Manifest, Module};

pub struct InitArgs<'a> {
    pub manifest: &'a mut Manifest,
    pub context: &'a mut AnalyzerContext,
}

pub struct CollectArgs<'a, 't> {
    pub node: Node<'t>,
    pub source: &'a str,
    pub context: &'a mut AnalyzerContext,
}

pub struct AnalyzeArgs<'a, 't> {
    pub node: Node<'t>,
    pub source: &'a str,
    pub module: &'a mut Module,
    pub context: &'a mut AnalyzerContext,
}

pub struct ModuleLinkArgs<'a> {
    pub module: &'a mut Module,
    pub context: &'a mut AnalyzerContext,
}

pub struct PackageLinkArgs<'a> {
    pub manifest: &'a mut Manifest,
    pub context: &'a mut AnalyzerContext,
}

pub trait Plugin {
    /// Identifies the plugin in error messages.
    fn name(&self) -> &str;

    /// Once per run, before any module is visited.
    fn initialize(&mut self, _args: &mut InitArgs<'_>) -> Result<()> {
        Ok(())
    }

    /// Once per AST node, across all modules, first full pass. Gathers
    /// import records only; document mutation belongs to later phases.
    fn collect(&mut self, _args: &mut CollectArgs<'_, '_>) -> Result<()> {
        Ok(())
    }

    /// Once per AST node, per module, second full pass. Mutates the
    /// module's in-progress document.
    fn analyze(&mut self, _args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        Ok(())
    }

    /// Once per module, right after that module's analyze pass completes.
    fn module_link(&mut self, _args: &mut ModuleLinkArgs<'_>) -> Result<()> {
        Ok(())
    }

    /// Once per run, after every module has completed analyze and module
    /// link.
    fn package_link(&mut self, _args: &mut PackageLinkArgs<'_>) -> Result<()> {
        Ok(())
    }
}
