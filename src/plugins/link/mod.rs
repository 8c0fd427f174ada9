//! Package-link post-processing
//!
//! Cross-module passes that need every module's document to exist:
//! unexported-declaration removal, initializer resolution, tag-name
//! linking, custom-element classification, and inheritance flattening.
//! They run in exactly that order.

pub mod classify;
pub mod inheritance;
pub mod link_tag_names;
pub mod remove_unexported;
pub mod resolve_initializers;
