//! Builders for raw documents and common multi-document projects.
#![allow(dead_code)]

use sosi::Span;
use sosi::syntax::{
    BuiltinDef, CompositeDef, CompositeKind, Document, DomainMapping, EnumDef, EnumLiteral,
    LiteralValue, MultiplicityExpr, PropertyDef, PropertyNode, PropertyRef, PropertyTypeNode,
    Reference, Sigil, TypeDef, TypeId,
};
use sosi::{FileId, Workspace};

pub fn builtin(name: &str) -> TypeDef {
    TypeDef::Builtin(BuiltinDef {
        name: name.into(),
        description: None,
        tags: Vec::new(),
        mappings: Vec::new(),
        span: Span::default(),
    })
}

pub fn builtin_mapped(name: &str, mappings: &[(&str, &str)]) -> TypeDef {
    TypeDef::Builtin(BuiltinDef {
        name: name.into(),
        description: None,
        tags: Vec::new(),
        mappings: mappings
            .iter()
            .map(|(domain, target)| DomainMapping::new(*domain, *target))
            .collect(),
        span: Span::default(),
    })
}

pub fn enumeration(name: &str, literals: &[(&str, Option<f64>)]) -> TypeDef {
    TypeDef::Enum(EnumDef {
        name: name.into(),
        description: None,
        tags: Vec::new(),
        literals: literals
            .iter()
            .map(|(literal, value)| EnumLiteral {
                name: (*literal).into(),
                description: None,
                tags: Vec::new(),
                value: value.map(LiteralValue::Number),
                span: Span::default(),
            })
            .collect(),
        mappings: Vec::new(),
        span: Span::default(),
    })
}

pub fn composite(name: &str) -> TypeDef {
    composite_of_kind(Some(name), CompositeKind::Feature)
}

pub fn data_composite(name: &str) -> TypeDef {
    composite_of_kind(Some(name), CompositeKind::Data)
}

pub fn inline_composite() -> TypeDef {
    composite_of_kind(None, CompositeKind::Feature)
}

pub fn composite_of_kind(name: Option<&str>, kind: CompositeKind) -> TypeDef {
    TypeDef::Composite(CompositeDef {
        name: name.map(Into::into),
        description: None,
        tags: Vec::new(),
        is_abstract: false,
        kind,
        supertypes: Vec::new(),
        properties: Vec::new(),
        span: Span::default(),
    })
}

pub fn composite_extending(name: &str, supertypes: &[&str]) -> TypeDef {
    let mut def = match composite(name) {
        TypeDef::Composite(c) => c,
        _ => unreachable!(),
    };
    def.supertypes = supertypes
        .iter()
        .map(|text| Reference::new(*text, Span::default()))
        .collect();
    TypeDef::Composite(def)
}

/// A declared property with a named type reference
pub fn property(
    name: &str,
    sigil: Option<Sigil>,
    type_ref: &str,
    multiplicity: MultiplicityExpr,
) -> PropertyNode {
    PropertyNode::Def(PropertyDef {
        name: name.into(),
        description: None,
        tags: Vec::new(),
        sigil,
        ty: PropertyTypeNode::Named(Reference::new(type_ref, Span::default())),
        multiplicity,
        span: Span::default(),
    })
}

/// A declared property whose type is an inline definition already
/// allocated in the document
pub fn inline_property(name: &str, inline: TypeId, multiplicity: MultiplicityExpr) -> PropertyNode {
    PropertyNode::Def(PropertyDef {
        name: name.into(),
        description: None,
        tags: Vec::new(),
        sigil: None,
        ty: PropertyTypeNode::Inline(inline),
        multiplicity,
        span: Span::default(),
    })
}

/// A property reuse, e.g. `Entitet.id`
pub fn property_ref(target: &str) -> PropertyNode {
    PropertyNode::Ref(PropertyRef {
        target: Reference::new(target, Span::default()),
        span: Span::default(),
    })
}

/// A workspace with one document per `(namespace, imports)` entry and a
/// populate callback per document, built and linked.
pub fn linked_workspace(
    documents: &[(&str, &[&str])],
    populate: impl Fn(usize, &mut Document),
) -> (Workspace, Vec<FileId>) {
    let mut workspace = Workspace::new();
    let mut files = Vec::new();
    for (index, (name, imports)) in documents.iter().enumerate() {
        let file = workspace.create_document(*name, Span::default());
        let doc = workspace.document_mut(file);
        for import in *imports {
            doc.add_import(*import, Span::default());
        }
        populate(index, doc);
        files.push(file);
    }
    workspace.build();
    (workspace, files)
}

/// The two-document project used across the suites: a `modell` namespace
/// exporting builtins and a base `Entitet` type, and an `ngu.nadag`
/// namespace importing it.
pub fn modell_and_nadag(populate_nadag: impl Fn(&mut Document)) -> (Workspace, FileId, FileId) {
    let (workspace, files) = linked_workspace(
        &[("modell", &[]), ("ngu.nadag", &["modell"])],
        |index, doc| match index {
            0 => {
                doc.add_type(builtin("String"));
                doc.add_type(builtin("Timestamp"));
                doc.add_type(builtin("Flate"));
                let entitet = doc.add_type(composite("Entitet"));
                doc.add_property(
                    entitet,
                    property("id", Some(Sigil::Id), "String", MultiplicityExpr::default()),
                );
            }
            _ => populate_nadag(doc),
        },
    );
    (workspace, files[0], files[1])
}
