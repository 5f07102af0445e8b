//! Per-document symbol computation (phase 1 of a workspace build).
//!
//! Each document exports: its namespace (under the namespace's own
//! qualified name), every top-level type (under `namespace.typeName`) and
//! every declared property of those types (under
//! `namespace.typeName.propertyName`). Properties of inline types are not
//! separately exported. Top-level types are additionally reachable by
//! their bare simple name, but only from within the same document.

use smol_str::SmolStr;
use tracing::trace;

use super::scope::{MapScope, SymbolDescription, SymbolKind};
use crate::semantic::qualified_names::{property_qname, type_qname};
use crate::syntax::{Document, NodeRef, PropertyNode, TypeDef};

/// The outcome of scope computation for one document
#[derive(Debug, Clone, Default)]
pub struct DocumentSymbols {
    /// Symbols visible to other documents, keyed by fully-qualified name
    pub exported: Vec<SymbolDescription>,
    /// Top-level types keyed by simple name, never exported
    pub local: MapScope,
}

/// Compute the exported and local symbols of one document.
///
/// Reads only the document's own tree, so this is safe to run for all
/// documents of a project in parallel.
pub fn compute_document_symbols(doc: &Document) -> DocumentSymbols {
    let ns = doc.namespace();
    let file = doc.file();
    let mut exported = Vec::new();
    let mut local = MapScope::new();

    exported.push(SymbolDescription::new(
        SmolStr::new(ns.name.join()),
        SymbolKind::Namespace,
        NodeRef::namespace(file),
        ns.span,
    ));

    for &type_id in doc.top_level_types() {
        let def = doc.type_def(type_id);
        let qname = type_qname(doc, type_id);
        trace!(type_name = %qname, "exporting top-level type");
        exported.push(SymbolDescription::new(
            SmolStr::new(qname.join()),
            SymbolKind::Type,
            NodeRef::ty(file, type_id),
            def.span(),
        ));
        local.insert(SymbolDescription::new(
            SmolStr::new(qname.simple_name()),
            SymbolKind::Type,
            NodeRef::ty(file, type_id),
            def.span(),
        ));

        if let TypeDef::Composite(composite) = def {
            for &prop_id in &composite.properties {
                // only declared properties export a name of their own
                let Some(qname) = property_qname(doc, prop_id) else {
                    continue;
                };
                let span = match doc.property(prop_id) {
                    PropertyNode::Def(def) => def.span,
                    PropertyNode::Ref(r) => r.span,
                };
                exported.push(SymbolDescription::new(
                    SmolStr::new(qname.join()),
                    SymbolKind::Property,
                    NodeRef::property(file, prop_id),
                    span,
                ));
            }
        }
    }

    DocumentSymbols { exported, local }
}
