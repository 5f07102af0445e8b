//! Raw parse-tree entities for the SOSI specification language.
//!
//! The types in this module describe the shape an external parser is
//! expected to produce: a [`Document`] rooted at a [`Namespace`], holding
//! all type definitions and properties in per-document arenas addressed by
//! [`TypeId`] and [`PropertyId`]. Cross-references start out as unbound
//! [`Reference`] nodes and are bound to [`NodeRef`] targets by the linker.
//!
//! Raw entities are produced once per parse and never mutated afterwards;
//! the lazily-bound target slot of a [`Reference`] is the one exception,
//! written exactly once per workspace build.

mod nodes;
mod tree;

pub use nodes::{
    BuiltinDef, CompositeDef, CompositeKind, DomainMapping, EnumDef, EnumLiteral, Import,
    LiteralValue, MultiplicityExpr, MultiplicityRange, Namespace, PropertyDef, PropertyNode,
    PropertyRef, PropertyTypeNode, Reference, Sigil, Tag, TypeDef,
};
pub use tree::{Document, NodeId, NodeRef, PropertyId, TypeId, TypeOwner};
