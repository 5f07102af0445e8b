//! Reference linking (phase 2 of a workspace build).
//!
//! The linker walks every cross-reference node of a document — import
//! targets, supertype references, property type references and property
//! reuse references — resolves its text against the scope valid at that
//! position, and binds the reference to the found node. Unresolved
//! references become diagnostics instead of aborting, so one pass reports
//! every problem in the document.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::diagnostics::{Diagnostic, codes};
use super::scope::{Scope, SymbolKind};
use crate::base::Span;
use crate::syntax::{Document, PropertyNode, PropertyTypeNode, TypeDef, TypeId};

/// Where a pending reference lives inside the document
enum RefSlot {
    Import(usize),
    Supertype(TypeId, usize),
    PropertyType(crate::syntax::PropertyId),
    PropertyTarget(crate::syntax::PropertyId),
}

struct PendingRef {
    slot: RefSlot,
    text: SmolStr,
    span: Span,
    expected: SymbolKind,
}

/// Resolve and bind every reference in `doc` against `scope`.
///
/// Returns the link errors found; sibling references keep resolving after
/// a failure so the caller gets the full list.
pub(crate) fn link_document(doc: &mut Document, scope: &dyn Scope) -> Vec<Diagnostic> {
    let pending = collect_references(doc);
    debug!(
        namespace = %doc.namespace().name,
        references = pending.len(),
        "linking document"
    );

    let mut diagnostics = Vec::new();
    for reference in pending {
        match scope.element(&reference.text) {
            Some(found) if found.kind == reference.expected => {
                trace!(text = %reference.text, resolved = %found.name, "bound reference");
                bind(doc, &reference.slot, found.node);
            }
            Some(found) => {
                diagnostics.push(
                    Diagnostic::error(
                        format!(
                            "reference to '{}' resolved to a {}, expected a {}",
                            reference.text,
                            found.kind.display(),
                            reference.expected.display()
                        ),
                        reference.span,
                    )
                    .with_code(codes::WRONG_REFERENCE_KIND),
                );
            }
            None => {
                diagnostics.push(
                    Diagnostic::error(
                        format!("could not resolve reference to '{}'", reference.text),
                        reference.span,
                    )
                    .with_code(codes::UNRESOLVED_REFERENCE),
                );
            }
        }
    }
    diagnostics
}

fn collect_references(doc: &Document) -> Vec<PendingRef> {
    let mut pending = Vec::new();

    for (index, import) in doc.namespace().imports.iter().enumerate() {
        pending.push(PendingRef {
            slot: RefSlot::Import(index),
            text: import.namespace.text.clone(),
            span: import.namespace.span,
            expected: SymbolKind::Namespace,
        });
    }

    for (type_id, def) in doc.iter_types() {
        let TypeDef::Composite(composite) = def else {
            continue;
        };
        for (index, supertype) in composite.supertypes.iter().enumerate() {
            pending.push(PendingRef {
                slot: RefSlot::Supertype(type_id, index),
                text: supertype.text.clone(),
                span: supertype.span,
                expected: SymbolKind::Type,
            });
        }
    }

    for (prop_id, prop) in doc.iter_properties() {
        match prop {
            PropertyNode::Def(def) => {
                if let PropertyTypeNode::Named(reference) = &def.ty {
                    pending.push(PendingRef {
                        slot: RefSlot::PropertyType(prop_id),
                        text: reference.text.clone(),
                        span: reference.span,
                        expected: SymbolKind::Type,
                    });
                }
            }
            PropertyNode::Ref(reuse) => {
                pending.push(PendingRef {
                    slot: RefSlot::PropertyTarget(prop_id),
                    text: reuse.target.text.clone(),
                    span: reuse.target.span,
                    expected: SymbolKind::Property,
                });
            }
        }
    }

    pending
}

fn bind(doc: &mut Document, slot: &RefSlot, target: crate::syntax::NodeRef) {
    match slot {
        RefSlot::Import(index) => {
            doc.import_mut(*index).namespace.target = Some(target);
        }
        RefSlot::Supertype(type_id, index) => {
            if let Some(composite) = doc.composite_mut(*type_id) {
                composite.supertypes[*index].target = Some(target);
            }
        }
        RefSlot::PropertyType(prop_id) => {
            if let PropertyNode::Def(def) = doc.property_mut(*prop_id) {
                if let PropertyTypeNode::Named(reference) = &mut def.ty {
                    reference.target = Some(target);
                }
            }
        }
        RefSlot::PropertyTarget(prop_id) => {
            if let PropertyNode::Ref(reuse) = doc.property_mut(*prop_id) {
                reuse.target.target = Some(target);
            }
        }
    }
}
