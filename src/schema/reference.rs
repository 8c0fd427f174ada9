//! References and exports
//!
//! A `Reference` is the resolution output of the symbol resolver: where a
//! name points. Exactly one of `module` or `package` is set; a reference to
//! a declaration in the current module carries that module's own path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Reference {
    /// A reference into a local module.
    pub fn local(name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module_path.into()),
            package: None,
        }
    }

    /// A reference into a bare package specifier.
    pub fn package(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            package: Some(package.into()),
        }
    }

    pub fn is_package(&self) -> bool {
        self.package.is_some()
    }
}

/// One exported binding of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub kind: ExportKind,
    pub name: String,
    pub declaration: Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportKind {
    #[serde(rename = "js")]
    Js,
    #[serde(rename = "custom-element-definition")]
    CustomElementDefinition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_serializes_only_one_origin() {
        let local = Reference::local("MyEl", "src/my-el.js");
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(json["module"], "src/my-el.js");
        assert!(json.get("package").is_none());

        let pkg = Reference::package("LitElement", "lit");
        let json = serde_json::to_value(&pkg).unwrap();
        assert_eq!(json["package"], "lit");
        assert!(json.get("module").is_none());
    }

    #[test]
    fn export_kind_tags() {
        let export = Export {
            kind: ExportKind::CustomElementDefinition,
            name: "my-el".to_string(),
            declaration: Reference::local("MyEl", "src/my-el.js"),
        };
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["kind"], "custom-element-definition");
    }
}
