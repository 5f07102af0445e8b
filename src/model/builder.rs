//! Semantic model builder.
//!
//! Consumes a fully linked parse tree and produces the output graph. The
//! builder assumes linking has already succeeded; an unbound reference
//! reaching it signals a contract defect between the linker and the
//! builder and aborts the build, it is not a user data error.
//!
//! Deduplication and cycle safety come from one mechanism: before
//! recursing into a composite type's supertypes and properties, the
//! builder allocates the type's arena slot and memoizes its id under the
//! type's qualified name. A property whose type cycles back to the type
//! currently being built finds the in-progress entry instead of recursing
//! forever, and a type referenced from several places is built exactly
//! once and shared by id.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{
    BuiltinType, CompositeType, CompositeTypeKind, CompositeTypeProperty, DomainMapping, EnumType,
    EnumTypeLiteral, Multiplicity, PropertyKind, SemanticPropertyId, SemanticTag, SemanticType,
    SemanticTypeId, SemanticTypeRef, Specification,
};
use crate::base::{FileId, QName, Span};
use crate::semantic::Workspace;
use crate::semantic::qualified_names::type_qname;
use crate::syntax::{
    BuiltinDef, CompositeKind, Document, EnumDef, LiteralValue, MultiplicityExpr, NodeId, NodeRef,
    PropertyId, PropertyNode, PropertyTypeNode, Reference, Sigil, Tag, TypeDef, TypeId,
};

/// Fatal build failure. Everything here is a defect in the pipeline
/// feeding the builder, never recoverable user input.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Linking did not run, or the caller ignored its errors.
    #[error("unresolved reference '{text}' reached the model builder at {}:{}",
        span.start.line, span.start.column)]
    UnboundReference { text: SmolStr, span: Span },

    /// A reference is bound to a node of the wrong kind.
    #[error("reference '{text}' is bound to a {found}, expected a {expected}")]
    WrongTarget {
        text: SmolStr,
        found: &'static str,
        expected: &'static str,
    },

    /// A chain of property references closes on itself.
    #[error("property reference cycle involving '{text}'")]
    PropertyRefCycle { text: SmolStr },

    /// No document with this id exists in the workspace.
    #[error("unknown document {0:?}")]
    UnknownDocument(FileId),

    /// An internal invariant was violated; aborts rather than producing a
    /// partially-built graph.
    #[error("model builder invariant violated: {0}")]
    Invariant(String),
}

/// Build the semantic graph for one document of a linked workspace.
pub fn build_specification(
    workspace: &Workspace,
    file: FileId,
) -> Result<Specification, BuildError> {
    let mut context = BuildContext::new(workspace);
    let doc = context.document(file)?;
    let ns = doc.namespace();
    debug!(namespace = %ns.name, "building specification");

    let qualified_name = ns.name.clone();
    let description = ns.description.clone();
    let tags = build_tags(&ns.tags);

    let top_level: Vec<TypeId> = doc.top_level_types().to_vec();
    let mut types = Vec::with_capacity(top_level.len());
    for type_id in top_level {
        types.push(context.build_type(file, type_id)?);
    }

    let (types_arena, properties_arena) = context.finish()?;
    Ok(Specification::new(
        qualified_name,
        description,
        tags,
        types,
        types_arena,
        properties_arena,
    ))
}

/// Per-build state: the arenas under construction and the memo tables.
///
/// One context per build invocation, never shared; concurrent builds of
/// independent specifications each own their tables and need no locks.
struct BuildContext<'w> {
    workspace: &'w Workspace,
    types: Vec<Option<SemanticType>>,
    properties: Vec<CompositeTypeProperty>,
    /// qualified name → built (or in-progress) type
    type_memo: FxHashMap<String, SemanticTypeId>,
    /// raw property node → built property
    property_memo: FxHashMap<(FileId, PropertyId), SemanticPropertyId>,
    /// property-ref chains currently being followed, for cycle detection
    in_progress_refs: FxHashSet<(FileId, PropertyId)>,
}

impl<'w> BuildContext<'w> {
    fn new(workspace: &'w Workspace) -> Self {
        Self {
            workspace,
            types: Vec::new(),
            properties: Vec::new(),
            type_memo: FxHashMap::default(),
            property_memo: FxHashMap::default(),
            in_progress_refs: FxHashSet::default(),
        }
    }

    fn document(&self, file: FileId) -> Result<&'w Document, BuildError> {
        if file.index() >= self.workspace.len() {
            return Err(BuildError::UnknownDocument(file));
        }
        Ok(self.workspace.document(file))
    }

    /// Build a type, or return the already-built (possibly in-progress)
    /// node for its qualified name.
    fn build_type(&mut self, file: FileId, type_id: TypeId) -> Result<SemanticTypeId, BuildError> {
        let doc = self.document(file)?;
        let qname = type_qname(doc, type_id);
        let key = qname.join();
        if let Some(&existing) = self.type_memo.get(&key) {
            trace!(type_name = %key, "reusing memoized type");
            return Ok(existing);
        }
        trace!(type_name = %key, "building type");

        // memo-before-recurse: reserve the slot so cycles find it
        let id = SemanticTypeId::new(self.types.len());
        self.types.push(None);
        self.type_memo.insert(key, id);

        let built = match doc.type_def(type_id) {
            TypeDef::Builtin(def) => SemanticType::Builtin(build_builtin(qname, def)),
            TypeDef::Enum(def) => SemanticType::Enum(build_enum(qname, def)),
            TypeDef::Composite(def) => {
                let def = def.clone();
                let supertypes = self.build_supertypes(&def.supertypes)?;
                let mut properties = Vec::with_capacity(def.properties.len());
                for &prop_id in &def.properties {
                    properties.push(self.build_property(file, prop_id)?);
                }
                SemanticType::Composite(CompositeType {
                    name: qname,
                    description: def.description.clone(),
                    tags: build_tags(&def.tags),
                    is_abstract: def.is_abstract,
                    kind: match def.kind {
                        CompositeKind::Data => CompositeTypeKind::Data,
                        CompositeKind::Feature => CompositeTypeKind::Feature,
                    },
                    supertypes,
                    properties,
                })
            }
        };
        self.types[id.index()] = Some(built);
        Ok(id)
    }

    /// Build the resolved supertype list of a composite type. A supertype
    /// reference bound to anything but a composite type is reported and
    /// skipped.
    fn build_supertypes(
        &mut self,
        supertypes: &[Reference],
    ) -> Result<Vec<SemanticTypeRef>, BuildError> {
        let mut built = Vec::with_capacity(supertypes.len());
        for reference in supertypes {
            let (file, type_id) = self.bound_type(reference)?;
            let doc = self.document(file)?;
            if !matches!(doc.type_def(type_id), TypeDef::Composite(_)) {
                warn!(
                    supertype = %reference.text,
                    "supertype is not a composite type; skipping"
                );
                continue;
            }
            let qname = type_qname(doc, type_id);
            let target = self.build_type(file, type_id)?;
            built.push(SemanticTypeRef { qname, target });
        }
        Ok(built)
    }

    /// Build the semantic property for a raw property node.
    ///
    /// A property reference never allocates a node of its own: it resolves
    /// through the referenced definition, transitively, and returns that
    /// property's id.
    fn build_property(
        &mut self,
        file: FileId,
        prop_id: PropertyId,
    ) -> Result<SemanticPropertyId, BuildError> {
        if let Some(&existing) = self.property_memo.get(&(file, prop_id)) {
            return Ok(existing);
        }

        let doc = self.document(file)?;
        let built = match doc.property(prop_id) {
            PropertyNode::Ref(reuse) => {
                let text = reuse.target.text.clone();
                if !self.in_progress_refs.insert((file, prop_id)) {
                    return Err(BuildError::PropertyRefCycle { text });
                }
                let (target_file, target_prop) = self.bound_property(&reuse.target)?;
                let result = self.build_property(target_file, target_prop);
                self.in_progress_refs.remove(&(file, prop_id));
                result?
            }
            PropertyNode::Def(def) => {
                let def = def.clone();
                trace!(property = %def.name, "building property");
                let (type_file, type_id) = match &def.ty {
                    PropertyTypeNode::Inline(inline) => (file, *inline),
                    PropertyTypeNode::Named(reference) => self.bound_type(reference)?,
                };
                let type_qname = type_qname(self.document(type_file)?, type_id);
                let target = self.build_type(type_file, type_id)?;
                let property = CompositeTypeProperty {
                    name: QName::single(def.name.clone()),
                    description: def.description.clone(),
                    tags: build_tags(&def.tags),
                    kind: property_kind(def.sigil),
                    ty: SemanticTypeRef {
                        qname: type_qname,
                        target,
                    },
                    multiplicity: normalize_multiplicity(&def.multiplicity),
                };
                let id = SemanticPropertyId::new(self.properties.len());
                self.properties.push(property);
                id
            }
        };
        self.property_memo.insert((file, prop_id), built);
        Ok(built)
    }

    fn bound_type(&self, reference: &Reference) -> Result<(FileId, TypeId), BuildError> {
        let target = self.bound(reference)?;
        match target.node {
            NodeId::Type(type_id) => Ok((target.file, type_id)),
            NodeId::Namespace => Err(BuildError::WrongTarget {
                text: reference.text.clone(),
                found: "namespace",
                expected: "type",
            }),
            NodeId::Property(_) => Err(BuildError::WrongTarget {
                text: reference.text.clone(),
                found: "property",
                expected: "type",
            }),
        }
    }

    fn bound_property(&self, reference: &Reference) -> Result<(FileId, PropertyId), BuildError> {
        let target = self.bound(reference)?;
        match target.node {
            NodeId::Property(prop_id) => Ok((target.file, prop_id)),
            NodeId::Namespace => Err(BuildError::WrongTarget {
                text: reference.text.clone(),
                found: "namespace",
                expected: "property",
            }),
            NodeId::Type(_) => Err(BuildError::WrongTarget {
                text: reference.text.clone(),
                found: "type",
                expected: "property",
            }),
        }
    }

    fn bound(&self, reference: &Reference) -> Result<NodeRef, BuildError> {
        reference.target.ok_or_else(|| BuildError::UnboundReference {
            text: reference.text.clone(),
            span: reference.span,
        })
    }

    fn finish(self) -> Result<(Vec<SemanticType>, Vec<CompositeTypeProperty>), BuildError> {
        let types = self
            .types
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| BuildError::Invariant("type slot left unfilled".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((types, self.properties))
    }
}

// ============================================================================
// Leaf builders
// ============================================================================

fn build_builtin(name: QName, def: &BuiltinDef) -> BuiltinType {
    BuiltinType {
        name,
        description: def.description.clone(),
        tags: build_tags(&def.tags),
        mappings: build_mappings(&def.mappings),
    }
}

fn build_enum(name: QName, def: &EnumDef) -> EnumType {
    EnumType {
        name,
        description: def.description.clone(),
        tags: build_tags(&def.tags),
        literals: def
            .literals
            .iter()
            .map(|literal| EnumTypeLiteral {
                name: QName::single(literal.name.clone()),
                description: literal.description.clone(),
                tags: build_tags(&literal.tags),
                value: literal.value.clone(),
            })
            .collect(),
        mappings: build_mappings(&def.mappings),
    }
}

fn build_tags(tags: &[Tag]) -> Vec<SemanticTag> {
    tags.iter()
        .map(|tag| SemanticTag {
            name: tag.name.clone(),
            value: tag
                .value
                .clone()
                .unwrap_or(LiteralValue::Boolean(true)),
        })
        .collect()
}

fn build_mappings(mappings: &[crate::syntax::DomainMapping]) -> Vec<DomainMapping> {
    mappings
        .iter()
        .map(|mapping| DomainMapping {
            domain: QName::parse(&mapping.domain),
            target: QName::parse(&mapping.target),
        })
        .collect()
}

/// The fixed sigil → kind table; no sigil means containment
fn property_kind(sigil: Option<Sigil>) -> PropertyKind {
    match sigil {
        Some(Sigil::Id) => PropertyKind::Id,
        Some(Sigil::Geometry) => PropertyKind::Geometry,
        Some(Sigil::Container) => PropertyKind::Container,
        Some(Sigil::Association) => PropertyKind::Association,
        None => PropertyKind::Containment,
    }
}

/// Normalize a raw multiplicity annotation.
///
/// Default is `0..*`. `+` raises the lower bound to 1, `?` caps the upper
/// bound at 1; the two are independent flags. An explicit range overrides
/// the lower bound unconditionally and the upper bound only when one was
/// actually supplied.
fn normalize_multiplicity(expr: &MultiplicityExpr) -> Multiplicity {
    let mut multiplicity = Multiplicity::default();
    if expr.one_or_more {
        multiplicity.lower = 1;
    }
    if expr.zero_or_one {
        multiplicity.upper = 1;
    }
    if let Some(range) = expr.range {
        multiplicity.lower = range.lower;
        if let Some(upper) = range.upper {
            multiplicity.upper = upper as i32;
        }
    }
    multiplicity
}
