//! Inheritance flattening
//!
//! Runs once at package link, over the fully analyzed document graph.
//! Every class-like declaration gets the members, attributes, and events
//! of its superclass chain and transitive mixin closure copied onto it,
//! stamped with `inheritedFrom`.
//!
//! Ordering is load-bearing: the traversal list is processed in discovery
//! order (mixins nearest the class first, then progressively higher
//! superclasses and their mixins), and once a nearer ancestor has filled a
//! slot, a farther ancestor finding the same name leaves it alone. This
//! tie-break is pinned by test and must not change.

use std::collections::HashSet;

use tracing::debug;

use crate::schema::{
    Attribute, ClassLike, ClassMember, Event, Manifest, Reference,
};

/// Flatten inheritance across the whole manifest, consulting externally
/// supplied manifests for references that land outside it.
pub fn apply_inheritance(manifest: &mut Manifest, third_party: &[Manifest]) {
    let mut targets: Vec<(usize, usize)> = Vec::new();
    for (module_index, module) in manifest.modules.iter().enumerate() {
        for (decl_index, declaration) in module.declarations.iter().enumerate() {
            if declaration.as_class_like().is_some() {
                targets.push((module_index, decl_index));
            }
        }
    }

    // Snapshot every class's ancestor contributions against the pristine
    // graph before mutating anything, so flattening one class never feeds
    // already-flattened data into another.
    let mut planned = Vec::with_capacity(targets.len());
    for &(module_index, decl_index) in &targets {
        let module_path = manifest.modules[module_index].path.clone();
        let class_like = manifest.modules[module_index].declarations[decl_index]
            .as_class_like()
            .expect("targets only hold class-likes");
        let contributions = build_contributions(class_like, &module_path, manifest, third_party);
        planned.push(((module_index, decl_index), contributions));
    }

    for ((module_index, decl_index), contributions) in planned {
        let target = manifest.modules[module_index].declarations[decl_index]
            .as_class_like_mut()
            .expect("targets only hold class-likes");
        debug!(
            "flattening {} ancestor contributions onto '{}'",
            contributions.len(),
            target.name()
        );
        for contribution in contributions {
            merge_contribution(target, contribution);
        }
    }
}

/// One ancestor's copyable data, keyed by the reference that reached it.
struct Contribution {
    reference: Reference,
    members: Vec<ClassMember>,
    attributes: Vec<Attribute>,
    events: Vec<Event>,
}

impl Contribution {
    fn snapshot(class_like: &dyn ClassLike, reference: Reference) -> Self {
        Self {
            reference,
            members: class_like.members().to_vec(),
            attributes: class_like.attributes().to_vec(),
            events: class_like.events().to_vec(),
        }
    }
}

fn build_contributions(
    class: &dyn ClassLike,
    module_path: &str,
    manifest: &Manifest,
    third_party: &[Manifest],
) -> Vec<Contribution> {
    let mut contributions = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    seen.insert((module_path.to_string(), class.name().to_string()));

    // The class's own mixins, nearest first, each with its transitive
    // closure walked fully before the next top-level mixin.
    for reference in class.mixin_refs() {
        expand_mixin(reference, manifest, third_party, &mut seen, &mut contributions);
    }

    // Walk the superclass chain, unioning mixin lists at each step. An
    // unresolvable link (unindexed package, missing module) stops the
    // chain; that is not an error.
    let mut current_mixins: Vec<Reference> = class.mixin_refs().to_vec();
    let mut current_superclass = class.superclass().cloned();
    while let Some(reference) = current_superclass {
        let Some(superclass) = find_class_like(&reference, manifest, third_party) else {
            break;
        };

        let mut union = current_mixins.clone();
        for inherited in superclass.mixin_refs() {
            if !union.iter().any(|r| reference_key(r) == reference_key(inherited)) {
                union.push(inherited.clone());
            }
        }
        for mixin in &union {
            expand_mixin(mixin, manifest, third_party, &mut seen, &mut contributions);
        }

        if !seen.insert(reference_key(&reference)) {
            // Cycle in the superclass chain; stop rather than loop.
            break;
        }
        contributions.push(Contribution::snapshot(superclass, reference));

        current_mixins = union;
        current_superclass = superclass.superclass().cloned();
    }

    contributions
}

fn expand_mixin(
    reference: &Reference,
    manifest: &Manifest,
    third_party: &[Manifest],
    seen: &mut HashSet<(String, String)>,
    contributions: &mut Vec<Contribution>,
) {
    if !seen.insert(reference_key(reference)) {
        return;
    }
    // A mixin that resolves only to an external bare-package reference
    // contributes nothing: there is no data to merge.
    let Some(mixin) = find_class_like(reference, manifest, third_party) else {
        return;
    };
    contributions.push(Contribution::snapshot(mixin, reference.clone()));
    for inner in mixin.mixin_refs() {
        expand_mixin(inner, manifest, third_party, seen, contributions);
    }
}

fn reference_key(reference: &Reference) -> (String, String) {
    let origin = reference
        .module
        .clone()
        .or_else(|| reference.package.clone())
        .unwrap_or_default();
    (origin, reference.name.clone())
}

/// Resolve a reference to a class-like declaration, searching the local
/// manifest first and the externally supplied manifests after. Package
/// references can only be satisfied externally.
fn find_class_like<'a>(
    reference: &Reference,
    manifest: &'a Manifest,
    third_party: &'a [Manifest],
) -> Option<&'a dyn ClassLike> {
    if let Some(module_path) = &reference.module {
        return manifest
            .find_declaration(module_path, &reference.name)
            .or_else(|| {
                third_party
                    .iter()
                    .find_map(|external| external.find_declaration(module_path, &reference.name))
            })
            .and_then(|declaration| declaration.as_class_like());
    }

    if reference.package.is_some() {
        for external in third_party {
            for module in &external.modules {
                if let Some(declaration) = module.declaration(&reference.name) {
                    if let Some(class_like) = declaration.as_class_like() {
                        return Some(class_like);
                    }
                }
            }
        }
    }
    None
}

fn merge_contribution(target: &mut dyn ClassLike, contribution: Contribution) {
    let Contribution {
        reference,
        members,
        attributes,
        events,
    } = contribution;

    for member in members {
        merge_member(target.members_mut(), member, &reference);
    }
    for attribute in attributes {
        merge_attribute(target.attributes_mut(), attribute, &reference);
    }
    for event in events {
        merge_event(target.events_mut(), event, &reference);
    }
}

fn merge_member(existing: &mut Vec<ClassMember>, ancestor: ClassMember, reference: &Reference) {
    match existing.iter_mut().find(|m| m.name() == ancestor.name()) {
        Some(current) => {
            if current.inherited_from().is_some() {
                // Already filled by a nearer ancestor; first writer wins.
                return;
            }
            // The class's own entry overrides: it keeps every field it
            // defines and only borrows type/privacy it left unset.
            current.set_inherited_from(reference.clone());
            backfill_member(current, &ancestor);
        }
        None => {
            let mut cloned = ancestor;
            cloned.set_inherited_from(reference.clone());
            existing.push(cloned);
        }
    }
}

fn backfill_member(current: &mut ClassMember, ancestor: &ClassMember) {
    match (current, ancestor) {
        (ClassMember::Field(own), ClassMember::Field(inherited)) => {
            if own.field_type.is_none() {
                own.field_type = inherited.field_type.clone();
            }
            if own.privacy.is_none() {
                own.privacy = inherited.privacy;
            }
        }
        (ClassMember::Method(own), ClassMember::Method(inherited)) => {
            if own.privacy.is_none() {
                own.privacy = inherited.privacy;
            }
        }
        // A field overriding a method (or vice versa) keeps its own shape.
        _ => {}
    }
}

fn merge_attribute(existing: &mut Vec<Attribute>, ancestor: Attribute, reference: &Reference) {
    match existing.iter_mut().find(|a| a.name == ancestor.name) {
        Some(current) => {
            if current.inherited_from.is_some() {
                return;
            }
            current.inherited_from = Some(reference.clone());
            if current.attr_type.is_none() {
                current.attr_type = ancestor.attr_type;
            }
        }
        None => {
            let mut cloned = ancestor;
            cloned.inherited_from = Some(reference.clone());
            existing.push(cloned);
        }
    }
}

fn merge_event(existing: &mut Vec<Event>, ancestor: Event, reference: &Reference) {
    let slot = ancestor
        .name
        .as_deref()
        .and_then(|name| {
            existing
                .iter_mut()
                .find(|e| e.name.as_deref() == Some(name))
        });
    match slot {
        Some(current) => {
            if current.inherited_from.is_some() {
                return;
            }
            current.inherited_from = Some(reference.clone());
        }
        None => {
            let mut cloned = ancestor;
            cloned.inherited_from = Some(reference.clone());
            existing.push(cloned);
        }
    }
}
