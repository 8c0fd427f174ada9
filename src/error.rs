//! Error taxonomy for manifest analysis
//!
//! A run either completes fully or aborts on the first unrecovered error.
//! There is no partial-success output mode: a single broken analyzer aborts
//! manifest generation rather than emitting a corrupt manifest.

use thiserror::Error;

/// Errors that abort a manifest analysis run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The grammar could not produce a syntax tree for a module.
    #[error("could not parse module '{path}' with the {language} grammar")]
    Parse {
        path: String,
        language: &'static str,
    },

    /// A plugin hook returned an error. The plugin's identity is attached so
    /// the user knows where to report the failure.
    #[error("the '{plugin}' plugin failed: {source}. {}", remediation_hint(.core))]
    Plugin {
        plugin: String,
        /// Whether the failing plugin is part of the built-in pipeline.
        core: bool,
        #[source]
        source: anyhow::Error,
    },
}

fn remediation_hint(core: &bool) -> &'static str {
    if *core {
        "This is a built-in analyzer; please report this as a bug against cem_analyzer"
    } else {
        "This is a third-party plugin; please report this to the plugin's author"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_error_names_the_plugin_and_distinguishes_core() {
        let core_err = AnalyzeError::Plugin {
            plugin: "CLASSES".to_string(),
            core: true,
            source: anyhow::anyhow!("boom"),
        };
        let msg = core_err.to_string();
        assert!(msg.contains("CLASSES"));
        assert!(msg.contains("built-in"));

        let user_err = AnalyzeError::Plugin {
            plugin: "my-framework-support".to_string(),
            core: false,
            source: anyhow::anyhow!("boom"),
        };
        let msg = user_err.to_string();
        assert!(msg.contains("my-framework-support"));
        assert!(msg.contains("third-party"));
    }
}
