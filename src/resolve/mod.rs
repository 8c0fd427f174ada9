//! Cross-module resolution
//!
//! `symbols` answers "where does this name point" from a module's import
//! table. `inheritance` runs at package link and flattens superclass and
//! mixin chains onto every class-like declaration.

pub mod inheritance;
pub mod symbols;
