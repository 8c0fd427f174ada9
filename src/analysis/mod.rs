//! The pipeline orchestrator
//!
//! Drives the five-phase state machine over all modules:
//!
//! 1. initialize: once per plugin, before anything else.
//! 2. collect: every node of every module; gathers import records.
//! 3. analyze: every node of every module; builds the per-module
//!    documents. The current module's imports (from collect) are exposed
//!    through the context.
//! 4. module link: once per module, immediately after its analyze pass.
//! 5. package link: once, after all modules; cross-module resolution and
//!    inheritance flattening happen here.
//!
//! Transitions are strictly sequential and total: every module finishes
//! collect before any module starts analyze, and package link only begins
//! once every module is through analyze and module link. The pipeline is
//! single-threaded and synchronous: symbol resolution and
//! "already exists" dedup checks are order-sensitive.

pub mod context;
pub mod plugin;
mod registry;

pub use context::{AnalyzerContext, ImportKind, ImportRecord};
pub use plugin::{
    AnalyzeArgs, CollectArgs, InitArgs, ModuleLinkArgs, PackageLinkArgs, Plugin,
};

use tracing::debug;
use tree_sitter::Node;

use crate::error::AnalyzeError;
use crate::language;
use crate::schema::{Manifest, Module};

use registry::RegisteredPlugin;

/// One input module: a path (the module's primary key) and its source.
#[derive(Debug, Clone)]
pub struct SourceModule {
    pub path: String,
    pub source: String,
}

impl SourceModule {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Options for a manifest run.
#[derive(Default)]
pub struct AnalyzeOptions {
    /// Verbose diagnostics.
    pub dev: bool,
    /// Free-text readme carried on the manifest root.
    pub readme: Option<String>,
    /// Externally produced manifests consulted when inheritance references
    /// land outside the analyzed modules. Never re-derived here.
    pub third_party_manifests: Vec<Manifest>,
    /// User/framework plugins, appended after the built-in pipeline.
    pub plugins: Vec<Box<dyn Plugin>>,
}

/// Analyze an ordered set of modules into a manifest.
///
/// Module order is preserved. A module whose path was already seen is
/// skipped: no two manifest modules may share a path.
pub fn create_manifest(
    modules: &[SourceModule],
    options: AnalyzeOptions,
) -> Result<Manifest, AnalyzeError> {
    let AnalyzeOptions {
        dev,
        readme,
        third_party_manifests,
        plugins: user_plugins,
    } = options;

    let mut context = AnalyzerContext::new(dev, third_party_manifests);
    let mut registry = registry::build_registry(user_plugins);

    let mut parsed: Vec<(&SourceModule, tree_sitter::Tree)> = Vec::with_capacity(modules.len());
    for module in modules {
        if parsed.iter().any(|(seen, _)| seen.path == module.path) {
            tracing::warn!("skipping duplicate module path '{}'", module.path);
            continue;
        }
        let tree = language::parse_module(&module.path, &module.source)?;
        parsed.push((module, tree));
    }

    let mut manifest = Manifest::new(readme);
    for (module, _) in &parsed {
        manifest.modules.push(Module::new(&module.path));
    }

    // Phase: initialize.
    for registered in registry.iter_mut() {
        let mut args = InitArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        registered
            .plugin
            .initialize(&mut args)
            .map_err(|source| hook_failure(registered, source))?;
    }

    // Phase: collect. Import records only.
    for (module, tree) in &parsed {
        debug!("collect phase: {}", module.path);
        context.begin_collect(&module.path);
        visit_preorder(tree.root_node(), &mut |node| {
            for registered in registry.iter_mut() {
                let mut args = CollectArgs {
                    node,
                    source: &module.source,
                    context: &mut context,
                };
                registered
                    .plugin
                    .collect(&mut args)
                    .map_err(|source| hook_failure(registered, source))?;
            }
            Ok(())
        })?;
        context.finish_collect();
    }

    // Phase: analyze, with each module's link pass right behind it.
    for (index, (module, tree)) in parsed.iter().enumerate() {
        debug!("analyze phase: {}", module.path);
        context.begin_analyze(&module.path);
        let module_doc = &mut manifest.modules[index];

        visit_preorder(tree.root_node(), &mut |node| {
            for registered in registry.iter_mut() {
                let mut args = AnalyzeArgs {
                    node,
                    source: &module.source,
                    module: module_doc,
                    context: &mut context,
                };
                registered
                    .plugin
                    .analyze(&mut args)
                    .map_err(|source| hook_failure(registered, source))?;
            }
            Ok(())
        })?;

        debug!("module link phase: {}", module.path);
        for registered in registry.iter_mut() {
            let mut args = ModuleLinkArgs {
                module: module_doc,
                context: &mut context,
            };
            registered
                .plugin
                .module_link(&mut args)
                .map_err(|source| hook_failure(registered, source))?;
        }
    }

    // Phase: package link. Requires every module to be done.
    debug!("package link phase");
    for registered in registry.iter_mut() {
        let mut args = PackageLinkArgs {
            manifest: &mut manifest,
            context: &mut context,
        };
        registered
            .plugin
            .package_link(&mut args)
            .map_err(|source| hook_failure(registered, source))?;
    }

    debug!(
        "analyzed {} modules, {} declarations total",
        manifest.modules.len(),
        manifest
            .modules
            .iter()
            .map(|m| m.declarations.len())
            .sum::<usize>()
    );
    Ok(manifest)
}

fn hook_failure(registered: &RegisteredPlugin, source: anyhow::Error) -> AnalyzeError {
    AnalyzeError::Plugin {
        plugin: registered.plugin.name().to_string(),
        core: registered.core,
        source,
    }
}

/// Pre-order, depth-first traversal visiting every node exactly once.
fn visit_preorder<'t>(
    node: Node<'t>,
    visit: &mut dyn FnMut(Node<'t>) -> Result<(), AnalyzeError>,
) -> Result<(), AnalyzeError> {
    visit(node)?;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_preorder(child, visit)?;
    }
    Ok(())
}
