//! Qualified-name computation from containment position.
//!
//! A named top-level type is `namespace.simpleName`. An inline composite
//! type declared as a property's type has no independent textual name: its
//! simple name is derived as `<ownerSimpleName>_<propertyName>`, applied
//! recursively when inline types nest.

use smol_str::{SmolStr, format_smolstr};

use crate::base::QName;
use crate::syntax::{Document, PropertyId, TypeId, TypeOwner};

/// The effective simple name of a type: its declared name for top-level
/// types, the position-derived name for property-owned inline types.
pub fn type_simple_name(doc: &Document, id: TypeId) -> SmolStr {
    match doc.type_owner(id) {
        TypeOwner::Namespace => doc
            .type_def(id)
            .declared_name()
            .map(SmolStr::new)
            .unwrap_or_else(|| SmolStr::new_static("unknown")),
        TypeOwner::Property(prop) => {
            let owner = type_simple_name(doc, doc.property_owner(prop));
            let prop_name = doc
                .property_def(prop)
                .map(|def| def.name.as_str())
                .unwrap_or("unknown");
            format_smolstr!("{owner}_{prop_name}")
        }
    }
}

/// Fully-qualified name of a type: the namespace name plus the effective
/// simple name. Inline types nested arbitrarily deep still produce a
/// single trailing segment (`GU_borehull`, `GU_borehull_prove`, ...).
pub fn type_qname(doc: &Document, id: TypeId) -> QName {
    doc.namespace().name.child(type_simple_name(doc, id))
}

/// Fully-qualified name of a declared property: the owning type's
/// qualified name plus the property name. `None` for property references,
/// which have no name of their own.
pub fn property_qname(doc: &Document, id: PropertyId) -> Option<QName> {
    let def = doc.property_def(id)?;
    Some(type_qname(doc, doc.property_owner(id)).child(def.name.clone()))
}
