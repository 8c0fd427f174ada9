//! The custom elements manifest data model
//!
//! A manifest is a plain document graph: modules own declarations and
//! exports, declarations own members/attributes/events. Plugins mutate
//! these records in place during analysis; serialization is the final
//! assembly step and drops nothing but transient bookkeeping (which never
//! enters these types in the first place).

mod declarations;
mod members;
mod reference;

pub use declarations::{
    ClassDeclaration, ClassLike, Declaration, FunctionDeclaration, InterfaceDeclaration,
    MixinDeclaration, VariableDeclaration,
};
pub use members::{
    Attribute, ClassField, ClassMember, ClassMethod, CssCustomProperty, CssCustomState, CssPart,
    Event, FunctionReturn, Parameter, Privacy, Slot, Type,
};
pub use reference::{Export, ExportKind, Reference};

use serde::{Deserialize, Serialize};

/// Version of the manifest schema this crate emits.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The manifest root: an ordered list of analyzed modules.
///
/// Module order equals input module order, and no two modules share a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub schema_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    pub modules: Vec<Module>,
}

impl Manifest {
    pub fn new(readme: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            readme,
            modules: Vec::new(),
        }
    }

    /// Deterministic JSON rendering of the document graph. Two runs over
    /// identical input produce byte-identical output.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.path == path)
    }

    pub fn module_mut(&mut self, path: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.path == path)
    }

    /// Look up a declaration by module path and name.
    pub fn find_declaration(&self, module_path: &str, name: &str) -> Option<&Declaration> {
        self.module(module_path)?.declaration(name)
    }
}

/// One analyzed source module, keyed by its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub kind: ModuleKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<Declaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<Export>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            kind: ModuleKind::JavaScriptModule,
            path: path.into(),
            declarations: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    pub fn declaration_mut(&mut self, name: &str) -> Option<&mut Declaration> {
        self.declarations.iter_mut().find(|d| d.name() == name)
    }

    pub fn has_declaration(&self, name: &str) -> bool {
        self.declaration(name).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    #[serde(rename = "javascript-module")]
    JavaScriptModule,
}
