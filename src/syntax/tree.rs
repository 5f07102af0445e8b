use smol_str::SmolStr;

use super::nodes::{
    CompositeDef, Import, Namespace, PropertyDef, PropertyNode, PropertyTypeNode, Reference, Tag,
    TypeDef,
};
use crate::base::{FileId, QName, Span};

// ============================================================================
// Node identifiers
// ============================================================================

/// Index of a type definition in a document's type arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a property in a document's property arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyId(pub u32);

impl PropertyId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The document's root namespace
    Namespace,
    Type(TypeId),
    Property(PropertyId),
}

/// A node address valid across the whole workspace.
/// This is what linked [`Reference`] targets point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub node: NodeId,
}

impl NodeRef {
    pub fn namespace(file: FileId) -> Self {
        Self {
            file,
            node: NodeId::Namespace,
        }
    }

    pub fn ty(file: FileId, id: TypeId) -> Self {
        Self {
            file,
            node: NodeId::Type(id),
        }
    }

    pub fn property(file: FileId, id: PropertyId) -> Self {
        Self {
            file,
            node: NodeId::Property(id),
        }
    }
}

/// Containment parent of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOwner {
    /// A top-level type declared directly in the namespace
    Namespace,
    /// An inline type declared as the type of a property
    Property(PropertyId),
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TypeData {
    owner: TypeOwner,
    def: TypeDef,
}

#[derive(Debug, Clone, PartialEq)]
struct PropertyData {
    owner: TypeId,
    prop: PropertyNode,
}

/// One parsed document: a namespace root plus arenas for every type
/// definition (top-level and inline) and every property it contains.
///
/// An external parser populates a document through the `add_*` methods
/// below, in declaration order; the arenas are append-only.
#[derive(Debug, Clone)]
pub struct Document {
    file: FileId,
    namespace: Namespace,
    types: Vec<TypeData>,
    properties: Vec<PropertyData>,
}

impl Document {
    pub fn new(file: FileId, name: impl Into<QName>, span: Span) -> Self {
        Self {
            file,
            namespace: Namespace {
                name: name.into(),
                description: None,
                tags: Vec::new(),
                imports: Vec::new(),
                types: Vec::new(),
                span,
            },
            types: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.namespace.description = Some(description.into());
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.namespace.tags.push(tag);
    }

    /// Declare an `import` of another namespace by its qualified name text
    pub fn add_import(&mut self, text: impl Into<SmolStr>, span: Span) {
        self.namespace.imports.push(Import {
            namespace: Reference::new(text, span),
        });
    }

    /// Add a top-level type definition to the namespace
    pub fn add_type(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId::new(self.types.len());
        self.types.push(TypeData {
            owner: TypeOwner::Namespace,
            def,
        });
        self.namespace.types.push(id);
        id
    }

    /// Allocate an inline type definition. Its owner is patched when the
    /// owning property is added with a `PropertyTypeNode::Inline` pointing
    /// at the returned id.
    pub fn alloc_inline_type(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId::new(self.types.len());
        self.types.push(TypeData {
            // provisional until add_property sees the Inline reference
            owner: TypeOwner::Namespace,
            def,
        });
        id
    }

    /// Add a property to a composite type.
    ///
    /// Panics if `owner` is not a composite type; the grammar only allows
    /// properties inside composite bodies.
    pub fn add_property(&mut self, owner: TypeId, prop: PropertyNode) -> PropertyId {
        let id = PropertyId::new(self.properties.len());
        if let PropertyNode::Def(PropertyDef {
            ty: PropertyTypeNode::Inline(inline),
            ..
        }) = &prop
        {
            self.types[inline.index()].owner = TypeOwner::Property(id);
        }
        self.properties.push(PropertyData { owner, prop });
        match &mut self.types[owner.index()].def {
            TypeDef::Composite(c) => c.properties.push(id),
            _ => panic!("property owner must be a composite type"),
        }
        id
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()].def
    }

    pub fn type_owner(&self, id: TypeId) -> TypeOwner {
        self.types[id.index()].owner
    }

    pub fn property(&self, id: PropertyId) -> &PropertyNode {
        &self.properties[id.index()].prop
    }

    /// The composite type a property belongs to
    pub fn property_owner(&self, id: PropertyId) -> TypeId {
        self.properties[id.index()].owner
    }

    /// The property as a definition, if it is one
    pub fn property_def(&self, id: PropertyId) -> Option<&PropertyDef> {
        match self.property(id) {
            PropertyNode::Def(def) => Some(def),
            PropertyNode::Ref(_) => None,
        }
    }

    /// Ids of the namespace's top-level types, in declaration order
    pub fn top_level_types(&self) -> &[TypeId] {
        &self.namespace.types
    }

    /// All type definitions in the document, inline ones included
    pub fn iter_types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, data)| (TypeId::new(i), &data.def))
    }

    pub fn iter_properties(&self) -> impl Iterator<Item = (PropertyId, &PropertyNode)> {
        self.properties
            .iter()
            .enumerate()
            .map(|(i, data)| (PropertyId::new(i), &data.prop))
    }

    // ------------------------------------------------------------------
    // Mutable access for the linker
    // ------------------------------------------------------------------

    pub(crate) fn import_mut(&mut self, index: usize) -> &mut Import {
        &mut self.namespace.imports[index]
    }

    pub(crate) fn composite_mut(&mut self, id: TypeId) -> Option<&mut CompositeDef> {
        match &mut self.types[id.index()].def {
            TypeDef::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn property_mut(&mut self, id: PropertyId) -> &mut PropertyNode {
        &mut self.properties[id.index()].prop
    }
}
