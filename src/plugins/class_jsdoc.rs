//! Class-level JSDoc (analyze phase)
//!
//! Attaches class JSDoc data to declarations the classes plugin created
//! earlier in the same pass: description and summary, `@attr` attributes,
//! `@fires` events, CSS custom properties/parts/states, slots, and
//! `@tag`-declared tag names.

use anyhow::Result;

use crate::analysis::plugin::{AnalyzeArgs, Plugin};
use crate::ast;
use crate::builders::{class, event};
use crate::jsdoc::{self, JsDocTag};
use crate::plugins::is_top_level;
use crate::schema::{
    Attribute, CssCustomProperty, CssCustomState, CssPart, Event, Slot, Type,
};

pub struct ClassJsDocPlugin;

impl Plugin for ClassJsDocPlugin {
    fn name(&self) -> &str {
        "CORE - CLASS-JSDOC"
    }

    fn analyze(&mut self, args: &mut AnalyzeArgs<'_, '_>) -> Result<()> {
        if !matches!(
            args.node.kind(),
            "class_declaration" | "abstract_class_declaration"
        ) || !is_top_level(args.node)
        {
            return Ok(());
        }
        let Some(doc) = jsdoc::for_node(args.node, args.source) else {
            return Ok(());
        };
        let Some(name) = ast::field_text(args.node, "name", args.source) else {
            return Ok(());
        };
        let Some(declaration) = args.module.declaration_mut(&name) else {
            return Ok(());
        };
        if doc.is_ignored() {
            if let Some(class) = declaration.as_class_mut() {
                class.ignore = true;
            }
            return Ok(());
        }
        let Some(class) = declaration.as_class_mut() else {
            return Ok(());
        };

        if class.description.is_none() {
            class.description = doc.description.clone();
        }
        if class.summary.is_none() {
            class.summary = doc.summary();
        }
        if class.tag_name.is_none() {
            class.tag_name = doc
                .tag(&["tag", "tagname"])
                .and_then(|tag| tag.name.clone());
        }

        for tag in doc.tags_named(&["attr", "attribute"]) {
            let Some(attr_name) = tag.name.clone() else {
                continue;
            };
            class::merge_attribute(
                class,
                Attribute {
                    name: attr_name,
                    field_name: None,
                    attr_type: tag.type_text.clone().map(Type::new),
                    description: tag.description.clone(),
                    default: tag.default.clone(),
                    inherited_from: None,
                },
            );
        }

        for tag in doc.tags_named(&["fires", "event"]) {
            event::add_event(
                &mut class.events,
                Event {
                    name: tag.name.clone(),
                    event_type: tag.type_text.clone().map(Type::new),
                    description: tag.description.clone(),
                    inherited_from: None,
                },
            );
        }

        for tag in doc.tags_named(&["cssprop", "cssproperty"]) {
            let Some(name) = tag.name.clone() else { continue };
            class.css_properties.push(CssCustomProperty {
                name,
                syntax: tag.type_text.clone(),
                default: tag.default.clone(),
                description: tag.description.clone(),
            });
        }

        for tag in doc.tags_named(&["csspart"]) {
            let Some(name) = tag.name.clone() else { continue };
            class.css_parts.push(CssPart {
                name,
                description: tag.description.clone(),
            });
        }

        for tag in doc.tags_named(&["slot"]) {
            class.slots.push(Slot {
                // An unnamed @slot documents the default slot.
                name: slot_name(tag),
                description: tag.description.clone(),
            });
        }

        for tag in doc.tags_named(&["cssstate"]) {
            let Some(name) = tag.name.clone() else { continue };
            class.css_states.push(CssCustomState {
                name,
                description: tag.description.clone(),
            });
        }
        Ok(())
    }
}

fn slot_name(tag: &JsDocTag) -> String {
    match &tag.name {
        // A bare `@slot - description` parses the dash as separator; a
        // lone dash name also means the default slot.
        Some(name) if name != "-" => name.clone(),
        _ => String::new(),
    }
}
