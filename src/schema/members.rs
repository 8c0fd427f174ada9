//! Class members, attributes, events, and the merge rules between them
//!
//! Records here are accumulated incrementally by several analyzers (class
//! scan, constructor walk, JSDoc overlay), so the merge semantics live on
//! the types themselves instead of being scattered across plugins.

use serde::{Deserialize, Serialize};

use super::reference::Reference;

/// A free-text type expression. No semantic meaning is attached; this is
/// whatever the source or JSDoc spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub text: String,
}

impl Type {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    Private,
    Protected,
}

/// A field or method of a class-like declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    #[serde(rename = "field")]
    Field(ClassField),
    #[serde(rename = "method")]
    Method(ClassMethod),
}

impl ClassMember {
    pub fn name(&self) -> &str {
        match self {
            ClassMember::Field(f) => &f.name,
            ClassMember::Method(m) => &m.name,
        }
    }

    pub fn inherited_from(&self) -> Option<&Reference> {
        match self {
            ClassMember::Field(f) => f.inherited_from.as_ref(),
            ClassMember::Method(m) => m.inherited_from.as_ref(),
        }
    }

    pub fn set_inherited_from(&mut self, reference: Reference) {
        match self {
            ClassMember::Field(f) => f.inherited_from = Some(reference),
            ClassMember::Method(m) => m.inherited_from = Some(reference),
        }
    }

    pub fn is_ignored(&self) -> bool {
        match self {
            ClassMember::Field(f) => f.ignore,
            ClassMember::Method(m) => m.ignore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassField {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    #[serde(rename = "static", default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Name of the attribute this field reflects to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,

    /// Set when the initializer was a bare identifier; resolved against
    /// variable declarations during the package-link phase. Never
    /// serialized.
    #[serde(skip)]
    pub initializer_ref: Option<String>,
    /// Marked by an `@ignore`/`@internal` annotation; removal happens at
    /// module link so that mid-pass analyzers still see the record.
    #[serde(skip)]
    pub ignore: bool,
}

impl ClassField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Merge a later partial record into this one. Incoming data wins,
    /// except `type` and `privacy`, which are reconciled: an already
    /// present value is kept so later, less specific passes (such as the
    /// constructor walk) cannot erase explicit annotations.
    pub fn merge_from(&mut self, incoming: ClassField) {
        self.field_type = self.field_type.take().or(incoming.field_type);
        self.privacy = self.privacy.or(incoming.privacy);

        if incoming.default.is_some() {
            self.default = incoming.default;
        }
        if incoming.description.is_some() {
            self.description = incoming.description;
        }
        if incoming.summary.is_some() {
            self.summary = incoming.summary;
        }
        if incoming.attribute.is_some() {
            self.attribute = incoming.attribute;
        }
        if incoming.reflects.is_some() {
            self.reflects = incoming.reflects;
        }
        if incoming.readonly.is_some() {
            self.readonly = incoming.readonly;
        }
        if incoming.initializer_ref.is_some() {
            self.initializer_ref = incoming.initializer_ref;
        }
        self.is_static = self.is_static || incoming.is_static;
        self.ignore = self.ignore || incoming.ignore;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMethod {
    pub name: String,
    #[serde(rename = "static", default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_info: Option<FunctionReturn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,

    #[serde(skip)]
    pub ignore: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub rest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionReturn {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An observed or JSDoc-declared attribute of a custom element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    /// Back-reference to the member this attribute originates from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub attr_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Merge a newer attribute record into this one: the newer data takes
    /// precedence on conflicting keys, existing data is preserved on keys
    /// the newer record leaves unset.
    pub fn merge_from(&mut self, newer: Attribute) {
        if !newer.name.is_empty() {
            self.name = newer.name;
        }
        if newer.field_name.is_some() {
            self.field_name = newer.field_name;
        }
        if newer.attr_type.is_some() {
            self.attr_type = newer.attr_type;
        }
        if newer.description.is_some() {
            self.description = newer.description;
        }
        if newer.default.is_some() {
            self.default = newer.default;
        }
    }
}

/// An event dispatched by a class, detected from `this.dispatchEvent(...)`
/// call sites. The name may be absent when it is computed dynamically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssCustomProperty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPart {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssCustomState {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
