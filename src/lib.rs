//! # sosi-base
//!
//! Core library for the SOSI specification language: raw syntax model,
//! cross-file scoping and linking, and semantic model building.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → Semantic output graph (Specification, SemanticType) + builder
//!   ↓
//! semantic  → Scope computation, import-aware resolution, linker, workspace
//!   ↓
//! syntax    → Raw parse-tree entities (Namespace, TypeDef, Property)
//!   ↓
//! base      → Primitives (FileId, QName, Span)
//! ```
//!
//! Parsing source text into the raw tree is out of scope: an external
//! parser populates a [`syntax::Document`] through its construction API.
//! The [`semantic::Workspace`] then runs the two-phase build (scope
//! computation for every document, then linking), and
//! [`model::build_specification`] turns a linked document into the
//! deduplicated, cycle-safe semantic graph.

// ============================================================================
// MODULES (dependency order: base → syntax → semantic → model)
// ============================================================================

/// Foundation types: FileId, QName, Span
pub mod base;

/// Raw parse-tree entities, arena-stored per document
pub mod syntax;

/// Scoping, linking, validation, workspace
pub mod semantic;

/// Semantic output graph and the model builder
pub mod model;

// Re-export foundation types
pub use base::{FileId, Position, QName, Span};

// Re-export the main entry points
pub use model::{BuildError, Specification, build_specification};
pub use semantic::Workspace;
