//! Semantic output graph.
//!
//! The entities here are what generators and other downstream consumers
//! traverse: a [`Specification`] rooted at the built namespace, holding
//! every built type in an arena. Arena ids double as node identity — a
//! type built for a given qualified name exists exactly once per build,
//! and every reference to it shares the same [`SemanticTypeId`]. That is
//! what makes self-referential and mutually-referential composite types
//! representable without infinite structure.
//!
//! Semantic entities are immutable once built and scoped to one build
//! invocation; nothing here outlives its [`Specification`] unless a
//! caller retains the whole value.

mod builder;

pub use builder::{BuildError, build_specification};

use std::fmt;

use crate::base::QName;
use crate::syntax::LiteralValue;

// ============================================================================
// Identifiers
// ============================================================================

/// Identity of a built type within its [`Specification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticTypeId(pub u32);

impl SemanticTypeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a built composite-type property within its [`Specification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticPropertyId(pub u32);

impl SemanticPropertyId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A resolved tag; a bare `$name` carries boolean `true`
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticTag {
    pub name: QName,
    pub value: LiteralValue,
}

/// A domain → target name mapping on builtin and enum types
#[derive(Debug, Clone, PartialEq)]
pub struct DomainMapping {
    pub domain: QName,
    pub target: QName,
}

/// Kind of a composite-type property, mapped from the property sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Id,
    Geometry,
    Association,
    Containment,
    Container,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Id => "id",
            PropertyKind::Geometry => "geometry",
            PropertyKind::Association => "association",
            PropertyKind::Containment => "containment",
            PropertyKind::Container => "container",
        }
    }
}

/// Normalized cardinality bounds; `upper == -1` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    pub lower: u32,
    pub upper: i32,
}

impl Multiplicity {
    pub const UNBOUNDED: i32 = -1;

    pub fn new(lower: u32, upper: i32) -> Self {
        Self { lower, upper }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper == Self::UNBOUNDED
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: Self::UNBOUNDED,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            write!(f, "{}..*", self.lower)
        } else {
            write!(f, "{}..{}", self.lower, self.upper)
        }
    }
}

/// `data` or `feature`, from the composite `kind` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeTypeKind {
    Data,
    Feature,
}

impl CompositeTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeTypeKind::Data => "data",
            CompositeTypeKind::Feature => "feature",
        }
    }
}

/// A built type, discriminated by variant. Identified by its qualified
/// name; the arena id is the shared identity within one build.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticType {
    Builtin(BuiltinType),
    Enum(EnumType),
    Composite(CompositeType),
}

impl SemanticType {
    /// The fully-qualified name, as ordered segments
    pub fn name(&self) -> &QName {
        match self {
            SemanticType::Builtin(t) => &t.name,
            SemanticType::Enum(t) => &t.name,
            SemanticType::Composite(t) => &t.name,
        }
    }

    /// Explicit discriminator string, matching the interchange vocabulary
    pub fn entity_type(&self) -> &'static str {
        match self {
            SemanticType::Builtin(_) => "builtinType",
            SemanticType::Enum(_) => "enumType",
            SemanticType::Composite(_) => "compositeType",
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeType> {
        match self {
            SemanticType::Composite(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_builtin(&self) -> Option<&BuiltinType> {
        match self {
            SemanticType::Builtin(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            SemanticType::Enum(t) => Some(t),
            _ => None,
        }
    }
}

/// Leaf type carrying its domain mappings verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinType {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    pub mappings: Vec<DomainMapping>,
}

/// Leaf type carrying literal properties and domain mappings
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    pub literals: Vec<EnumTypeLiteral>,
    pub mappings: Vec<DomainMapping>,
}

/// One literal of a built enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeLiteral {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    pub value: Option<LiteralValue>,
}

/// A built record type
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    pub is_abstract: bool,
    pub kind: CompositeTypeKind,
    /// Resolved supertype references, declaration order
    pub supertypes: Vec<SemanticTypeRef>,
    /// Properties in declaration order
    pub properties: Vec<SemanticPropertyId>,
}

/// A resolved type reference: qualified name plus the shared node
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticTypeRef {
    pub qname: QName,
    pub target: SemanticTypeId,
}

/// A built composite-type property
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTypeProperty {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    pub kind: PropertyKind,
    pub ty: SemanticTypeRef,
    pub multiplicity: Multiplicity,
}

// ============================================================================
// Specification
// ============================================================================

/// Root of one build: the namespace's metadata, its top-level types, and
/// the arenas holding every built node.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub qualified_name: QName,
    pub description: Option<String>,
    pub tags: Vec<SemanticTag>,
    /// Top-level types in declaration order
    pub types: Vec<SemanticTypeId>,
    types_arena: Vec<SemanticType>,
    properties_arena: Vec<CompositeTypeProperty>,
}

impl Specification {
    pub(crate) fn new(
        qualified_name: QName,
        description: Option<String>,
        tags: Vec<SemanticTag>,
        types: Vec<SemanticTypeId>,
        types_arena: Vec<SemanticType>,
        properties_arena: Vec<CompositeTypeProperty>,
    ) -> Self {
        Self {
            qualified_name,
            description,
            tags,
            types,
            types_arena,
            properties_arena,
        }
    }

    pub fn semantic_type(&self, id: SemanticTypeId) -> &SemanticType {
        &self.types_arena[id.index()]
    }

    pub fn property(&self, id: SemanticPropertyId) -> &CompositeTypeProperty {
        &self.properties_arena[id.index()]
    }

    /// Top-level types in declaration order
    pub fn iter_types(&self) -> impl Iterator<Item = (SemanticTypeId, &SemanticType)> {
        self.types.iter().map(|&id| (id, self.semantic_type(id)))
    }

    /// Every built type, inline ones included
    pub fn iter_all_types(&self) -> impl Iterator<Item = (SemanticTypeId, &SemanticType)> {
        self.types_arena
            .iter()
            .enumerate()
            .map(|(i, ty)| (SemanticTypeId::new(i), ty))
    }

    /// Find a top-level type by simple name
    pub fn find_type(&self, simple_name: &str) -> Option<SemanticTypeId> {
        self.types
            .iter()
            .copied()
            .find(|&id| self.semantic_type(id).name().simple_name() == simple_name)
    }

    /// Find any built type by its joined qualified name
    pub fn find_by_qname(&self, qname: &str) -> Option<SemanticTypeId> {
        self.iter_all_types()
            .find(|(_, ty)| ty.name().join() == qname)
            .map(|(id, _)| id)
    }

    /// Number of built types, inline ones included
    pub fn type_count(&self) -> usize {
        self.types_arena.len()
    }
}
