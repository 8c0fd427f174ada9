//! Module-level declarations
//!
//! The declaration kinds a module can own. Classes and mixins share the
//! class-like surface (members, attributes, events) behind the `ClassLike`
//! trait so the inheritance resolver can treat them uniformly.

use serde::{Deserialize, Serialize};

use super::members::{
    Attribute, ClassMember, CssCustomProperty, CssCustomState, CssPart, Event, FunctionReturn,
    Parameter, Slot, Type,
};
use super::reference::Reference;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    #[serde(rename = "class")]
    Class(ClassDeclaration),
    /// A class that has been linked to a tag name (or extends a known base
    /// element) and therefore describes a registered custom element.
    #[serde(rename = "custom-element")]
    CustomElement(ClassDeclaration),
    #[serde(rename = "mixin")]
    Mixin(MixinDeclaration),
    #[serde(rename = "function")]
    Function(FunctionDeclaration),
    #[serde(rename = "variable")]
    Variable(VariableDeclaration),
    /// Interfaces appear in externally supplied manifests (and may be
    /// produced by user plugins); the built-in pipeline never emits them.
    #[serde(rename = "interface")]
    Interface(InterfaceDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => &c.name,
            Declaration::Mixin(m) => &m.name,
            Declaration::Function(f) => &f.name,
            Declaration::Variable(v) => &v.name,
            Declaration::Interface(i) => &i.name,
        }
    }

    pub fn is_ignored(&self) -> bool {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => c.ignore,
            Declaration::Mixin(m) => m.ignore,
            Declaration::Function(f) => f.ignore,
            Declaration::Variable(v) => v.ignore,
            Declaration::Interface(_) => false,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDeclaration> {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDeclaration> {
        match self {
            Declaration::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_class_like(&self) -> Option<&dyn ClassLike> {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => Some(c),
            Declaration::Mixin(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_class_like_mut(&mut self) -> Option<&mut dyn ClassLike> {
        match self {
            Declaration::Class(c) | Declaration::CustomElement(c) => Some(c),
            Declaration::Mixin(m) => Some(m),
            _ => None,
        }
    }
}

/// Uniform access to the class-shaped surface of classes and mixins.
pub trait ClassLike {
    fn name(&self) -> &str;
    fn superclass(&self) -> Option<&Reference>;
    fn mixin_refs(&self) -> &[Reference];
    fn members(&self) -> &[ClassMember];
    fn members_mut(&mut self) -> &mut Vec<ClassMember>;
    fn attributes(&self) -> &[Attribute];
    fn attributes_mut(&mut self) -> &mut Vec<Attribute>;
    fn events(&self) -> &[Event];
    fn events_mut(&mut self) -> &mut Vec<Event>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superclass: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ClassMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_properties: Vec<CssCustomProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_parts: Vec<CssPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_states: Vec<CssCustomState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(skip)]
    pub ignore: bool,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.iter().find(|m| m.name() == name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }
}

impl ClassLike for ClassDeclaration {
    fn name(&self) -> &str {
        &self.name
    }
    fn superclass(&self) -> Option<&Reference> {
        self.superclass.as_ref()
    }
    fn mixin_refs(&self) -> &[Reference] {
        &self.mixins
    }
    fn members(&self) -> &[ClassMember] {
        &self.members
    }
    fn members_mut(&mut self) -> &mut Vec<ClassMember> {
        &mut self.members
    }
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
    fn events(&self) -> &[Event] {
        &self.events
    }
    fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }
}

/// A mixin factory: function-shaped on the outside, class-shaped inside.
/// Carries the factory's parameters and JSDoc next to the inner class's
/// members. Mixins have no superclass of their own (the base comes in as a
/// parameter) but may apply further mixins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixinDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ClassMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_properties: Vec<CssCustomProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_parts: Vec<CssPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_states: Vec<CssCustomState>,

    #[serde(skip)]
    pub ignore: bool,
}

impl ClassLike for MixinDeclaration {
    fn name(&self) -> &str {
        &self.name
    }
    fn superclass(&self) -> Option<&Reference> {
        None
    }
    fn mixin_refs(&self) -> &[Reference] {
        &self.mixins
    }
    fn members(&self) -> &[ClassMember] {
        &self.members
    }
    fn members_mut(&mut self) -> &mut Vec<ClassMember> {
        &mut self.members
    }
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
    fn events(&self) -> &[Event] {
        &self.events
    }
    fn events_mut(&mut self) -> &mut Vec<Event> {
        &mut self.events
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_info: Option<FunctionReturn>,

    #[serde(skip)]
    pub ignore: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip)]
    pub ignore: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_kind_tags() {
        let class = Declaration::Class(ClassDeclaration::new("MyEl"));
        assert_eq!(serde_json::to_value(&class).unwrap()["kind"], "class");

        let element = Declaration::CustomElement(ClassDeclaration::new("MyEl"));
        assert_eq!(
            serde_json::to_value(&element).unwrap()["kind"],
            "custom-element"
        );

        let mixin = Declaration::Mixin(MixinDeclaration {
            name: "MyMixin".to_string(),
            ..Default::default()
        });
        assert_eq!(serde_json::to_value(&mixin).unwrap()["kind"], "mixin");
    }

    #[test]
    fn interface_declarations_round_trip() {
        // Produced by external manifests and user plugins, not the
        // built-in pipeline.
        let parsed: Declaration =
            serde_json::from_value(serde_json::json!({"kind": "interface", "name": "Sizable"}))
                .unwrap();
        assert_eq!(parsed.name(), "Sizable");
        assert_eq!(serde_json::to_value(&parsed).unwrap()["kind"], "interface");
    }

    #[test]
    fn class_like_covers_classes_and_mixins() {
        let mut decl = Declaration::Mixin(MixinDeclaration {
            name: "M".to_string(),
            ..Default::default()
        });
        let class_like = decl.as_class_like_mut().unwrap();
        assert_eq!(class_like.name(), "M");
        assert!(class_like.superclass().is_none());

        let var = Declaration::Variable(VariableDeclaration {
            name: "x".to_string(),
            ..Default::default()
        });
        assert!(var.as_class_like().is_none());
    }
}
