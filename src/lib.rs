// cem_analyzer - Tree-sitter powered custom elements manifest analysis
//
// Statically analyzes JavaScript/TypeScript modules and produces a custom
// elements manifest: classes, members, attributes, events, and inheritance
// relationships, derived from syntax alone. No type checker is involved;
// everything is inferred from syntax shape heuristics.

pub mod analysis;
pub mod ast;
pub mod builders;
pub mod error;
pub mod jsdoc;
pub mod language;
pub mod plugins;
pub mod resolve;
pub mod schema;
pub mod utils;

pub use analysis::{create_manifest, AnalyzeOptions, SourceModule};
pub use error::AnalyzeError;
pub use schema::Manifest;
