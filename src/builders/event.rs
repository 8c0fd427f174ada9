//! Event detection
//!
//! Finds `this.dispatchEvent(new X(name, ...))` call sites anywhere inside
//! a method body (full-subtree walk, not just top-level statements) and
//! records the constructed event's type and, when it is a string literal,
//! its name.

use tree_sitter::Node;

use crate::ast;
use crate::schema::{Event, Type};

/// Collect every dispatched event in a subtree, in source order.
pub fn collect_events(body: Node, source: &str) -> Vec<Event> {
    let mut events = Vec::new();
    for call in ast::find_descendants_of_kind(body, "call_expression") {
        if let Some(event) = event_from_call(call, source) {
            events.push(event);
        }
    }
    events
}

/// Append an event, deduplicating named events: the first occurrence wins,
/// later dispatches of the same name are ignored.
pub fn add_event(events: &mut Vec<Event>, event: Event) {
    if let Some(name) = &event.name {
        if events.iter().any(|e| e.name.as_deref() == Some(name)) {
            return;
        }
    }
    events.push(event);
}

fn event_from_call(call: Node, source: &str) -> Option<Event> {
    let function = call.child_by_field_name("function")?;
    if function.kind() != "member_expression" {
        return None;
    }
    let object = function.child_by_field_name("object")?;
    let property = function.child_by_field_name("property")?;
    if object.kind() != "this" || ast::node_text(property, source) != "dispatchEvent" {
        return None;
    }

    let arguments = call.child_by_field_name("arguments")?;
    let constructed = ast::find_child_by_kind(arguments, "new_expression")?;
    let constructor = constructed.child_by_field_name("constructor")?;
    let event_type = ast::node_text(constructor, source).to_string();

    // The event name is the constructor's first string-literal argument;
    // a dynamically computed name stays unset.
    let name = constructed
        .child_by_field_name("arguments")
        .and_then(|args| args.named_child(0))
        .and_then(|first| ast::string_literal_value(first, source));

    Some(Event {
        name,
        event_type: Some(Type::new(event_type)),
        description: None,
        inherited_from: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_module;

    fn events_in(source: &str) -> Vec<Event> {
        let tree = parse_module("a.js", source).unwrap();
        let mut out = Vec::new();
        for event in collect_events(tree.root_node(), source) {
            add_event(&mut out, event);
        }
        out
    }

    #[test]
    fn detects_nested_dispatch_sites() {
        let source = r#"
class A {
  toggle() {
    if (this.open) {
      this.dispatchEvent(new CustomEvent('opened-changed', { detail: true }));
    }
  }
}
"#;
        let events = events_in(source);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name.as_deref(), Some("opened-changed"));
        assert_eq!(events[0].event_type.as_ref().unwrap().text, "CustomEvent");
    }

    #[test]
    fn duplicate_names_first_occurrence_wins() {
        let source = r#"
class A {
  one() { this.dispatchEvent(new Event('ping')); }
  two() { this.dispatchEvent(new CustomEvent('ping')); }
}
"#;
        let events = events_in(source);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type.as_ref().unwrap().text, "Event");
    }

    #[test]
    fn dynamic_names_stay_unset() {
        let source = "class A { go() { this.dispatchEvent(new CustomEvent(this.eventName)); } }";
        let events = events_in(source);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, None);
    }

    #[test]
    fn other_dispatchers_are_ignored() {
        let source = "class A { go() { window.dispatchEvent(new Event('resize')); } }";
        assert!(events_in(source).is_empty());
    }
}
