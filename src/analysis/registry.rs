//! The plugin registry
//!
//! Built-in plugins run in a fixed declared order; user and framework
//! plugins are appended after them and run in append order within each
//! phase. The registry also remembers which plugins are built-in, so
//! failure messages can point users at the right party.

use crate::analysis::plugin::Plugin;
use crate::plugins;

pub(crate) struct RegisteredPlugin {
    pub plugin: Box<dyn Plugin>,
    pub core: bool,
}

pub(crate) fn build_registry(user_plugins: Vec<Box<dyn Plugin>>) -> Vec<RegisteredPlugin> {
    let mut registry: Vec<RegisteredPlugin> = built_in_plugins()
        .into_iter()
        .map(|plugin| RegisteredPlugin { plugin, core: true })
        .collect();

    registry.extend(
        user_plugins
            .into_iter()
            .map(|plugin| RegisteredPlugin { plugin, core: false }),
    );
    registry
}

/// The built-in pipeline, in execution order. Collection first, then the
/// per-construct analyzers (classes before the JSDoc overlay that needs
/// them), then the module-link cleanup, then the package-link
/// post-processing ending in inheritance flattening.
fn built_in_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(plugins::imports::ImportsPlugin),
        Box::new(plugins::exports::ExportsPlugin),
        Box::new(plugins::define_calls::CustomElementsDefinePlugin),
        Box::new(plugins::function_like::FunctionLikePlugin),
        Box::new(plugins::arrow_function::ArrowFunctionPlugin),
        Box::new(plugins::classes::ClassesPlugin),
        Box::new(plugins::mixins::MixinsPlugin),
        Box::new(plugins::variables::VariablesPlugin),
        Box::new(plugins::reexported_mixins::ReexportedWrappedMixinsPlugin),
        Box::new(plugins::class_jsdoc::ClassJsDocPlugin),
        Box::new(plugins::cleanup::ModuleCleanupPlugin),
        Box::new(plugins::link::remove_unexported::RemoveUnexportedPlugin),
        Box::new(plugins::link::resolve_initializers::ResolveInitializersPlugin),
        Box::new(plugins::link::link_tag_names::LinkTagNamesPlugin),
        Box::new(plugins::link::classify::ClassifyCustomElementsPlugin),
        Box::new(plugins::link::inheritance::ApplyInheritancePlugin),
    ]
}
