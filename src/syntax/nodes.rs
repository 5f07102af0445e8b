use smol_str::SmolStr;

use super::tree::{NodeRef, PropertyId, TypeId};
use crate::base::{QName, Span};

// ============================================================================
// References
// ============================================================================

/// A textual cross-reference with a lazily-bound target.
///
/// The `target` slot is `None` until the linker has run; reading it before
/// a successful workspace build is a contract violation on the caller's
/// side and surfaces as a builder error, not a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The reference text as written in the source, e.g. `Id` or `Entitet.id`
    pub text: SmolStr,
    pub span: Span,
    /// Bound by the linker; `None` while unlinked or unresolved
    pub target: Option<NodeRef>,
}

impl Reference {
    pub fn new(text: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
            target: None,
        }
    }

    /// Whether the linker has bound this reference
    pub fn is_linked(&self) -> bool {
        self.target.is_some()
    }
}

// ============================================================================
// Literals and tags
// ============================================================================

/// A literal tag or enum value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(SmolStr),
    Number(f64),
    /// ISO date text, kept verbatim
    Date(SmolStr),
    Boolean(bool),
}

/// A `$name=value` annotation; a bare `$name` defaults to boolean `true`
/// when the semantic model is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: QName,
    pub value: Option<LiteralValue>,
}

impl Tag {
    pub fn new(name: impl Into<QName>, value: Option<LiteralValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A `domain target` pairing on builtin and enum types,
/// e.g. `as java java.lang.String`
#[derive(Debug, Clone, PartialEq)]
pub struct DomainMapping {
    pub domain: SmolStr,
    pub target: SmolStr,
}

impl DomainMapping {
    pub fn new(domain: impl Into<SmolStr>, target: impl Into<SmolStr>) -> Self {
        Self {
            domain: domain.into(),
            target: target.into(),
        }
    }
}

// ============================================================================
// Namespace
// ============================================================================

/// An `import` of another namespace, referenced by its qualified name
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub namespace: Reference,
}

/// Root of one document: a named container of top-level type declarations
/// and the unit of import/export.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: QName,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    /// Declaration order matters for import precedence
    pub imports: Vec<Import>,
    /// Top-level type definitions, in declaration order
    pub types: Vec<TypeId>,
    pub span: Span,
}

// ============================================================================
// Type definitions
// ============================================================================

/// A type definition. The variant set is closed; the grammar guarantees
/// exhaustiveness and the compiler enforces it in every consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Builtin(BuiltinDef),
    Enum(EnumDef),
    Composite(CompositeDef),
}

impl TypeDef {
    /// The name as declared in the source, if any. Inline composite types
    /// may be unnamed; their effective name is derived from position.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeDef::Builtin(b) => Some(&b.name),
            TypeDef::Enum(e) => Some(&e.name),
            TypeDef::Composite(c) => c.name.as_deref(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeDef::Builtin(b) => b.span,
            TypeDef::Enum(e) => e.span,
            TypeDef::Composite(c) => c.span,
        }
    }
}

/// `builtin String as java java.lang.String`
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinDef {
    pub name: SmolStr,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub mappings: Vec<DomainMapping>,
    pub span: Span,
}

/// `codelist Kode { UKJENT = 0 ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub name: SmolStr,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub literals: Vec<EnumLiteral>,
    pub mappings: Vec<DomainMapping>,
    pub span: Span,
}

/// One literal of an enumeration, with an optional numeric or string value
#[derive(Debug, Clone, PartialEq)]
pub struct EnumLiteral {
    pub name: SmolStr,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub value: Option<LiteralValue>,
    pub span: Span,
}

/// The `kind` tag of a composite type; defaults to `Feature`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Data,
    #[default]
    Feature,
}

/// A record-like type with properties and optional supertypes.
///
/// `name` is `None` for composite types declared inline as a property's
/// type; their qualified name is derived from the owning property.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDef {
    pub name: Option<SmolStr>,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub is_abstract: bool,
    pub kind: CompositeKind,
    /// `extends` clauses, each a reference to another composite type
    pub supertypes: Vec<Reference>,
    /// Properties in declaration order
    pub properties: Vec<PropertyId>,
    pub span: Span,
}

// ============================================================================
// Properties
// ============================================================================

/// Property kind sigil: `#` id, `@` geometry, `^` container, `>` association.
/// No sigil means containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    Id,
    Geometry,
    Container,
    Association,
}

impl Sigil {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Sigil::Id),
            '@' => Some(Sigil::Geometry),
            '^' => Some(Sigil::Container),
            '>' => Some(Sigil::Association),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Sigil::Id => '#',
            Sigil::Geometry => '@',
            Sigil::Container => '^',
            Sigil::Association => '>',
        }
    }
}

/// A property member of a composite type
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyNode {
    Def(PropertyDef),
    Ref(PropertyRef),
}

impl PropertyNode {
    pub fn span(&self) -> Span {
        match self {
            PropertyNode::Def(d) => d.span,
            PropertyNode::Ref(r) => r.span,
        }
    }
}

/// The type of a property: either a reference to a named type or an
/// inline type definition owned by the property itself
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeNode {
    Inline(TypeId),
    Named(Reference),
}

/// A declared property: `# id: Id` or `borehull+: type { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: SmolStr,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub sigil: Option<Sigil>,
    pub ty: PropertyTypeNode,
    pub multiplicity: MultiplicityExpr,
    pub span: Span,
}

/// A property reuse: `Entitet.id` reuses that type's property definition
/// verbatim instead of declaring its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRef {
    pub target: Reference,
    pub span: Span,
}

// ============================================================================
// Multiplicity
// ============================================================================

/// Explicit `{lower, upper?}` bounds; a missing upper bound means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultiplicityRange {
    pub lower: u32,
    pub upper: Option<u32>,
}

/// Raw multiplicity annotation as parsed.
///
/// `+` (one-or-more) and `?` (zero-or-one) are independent flags in the
/// grammar, not mutually exclusive variants; an explicit range overrides
/// the lower bound unconditionally and the upper bound when supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MultiplicityExpr {
    pub one_or_more: bool,
    pub zero_or_one: bool,
    pub range: Option<MultiplicityRange>,
}

impl MultiplicityExpr {
    /// The `+` annotation
    pub fn one_or_more() -> Self {
        Self {
            one_or_more: true,
            ..Self::default()
        }
    }

    /// The `?` annotation
    pub fn zero_or_one() -> Self {
        Self {
            zero_or_one: true,
            ..Self::default()
        }
    }

    /// An explicit `{lower, upper?}` range
    pub fn range(lower: u32, upper: Option<u32>) -> Self {
        Self {
            range: Some(MultiplicityRange { lower, upper }),
            ..Self::default()
        }
    }
}
