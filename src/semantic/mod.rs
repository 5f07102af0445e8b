//! # Semantic Analysis
//!
//! This module turns raw per-document parse trees into a linked project:
//! per-document exported/local symbols, import-aware reference resolution,
//! and per-document diagnostics.
//!
//! The [`Workspace`] drives the two mandatory phases: scope computation
//! runs for every document first (it only reads each document's own tree
//! and may run in parallel), then linking resolves every cross-reference
//! against the assembled symbol tables. The barrier between the phases is
//! a hard ordering requirement: linking an import-prefixed reference needs
//! the exporting document's symbols to already exist.

pub mod diagnostics;
pub mod linker;
pub mod qualified_names;
pub mod scope;
pub mod scope_computation;
pub mod validator;
pub mod workspace;

pub use diagnostics::{Diagnostic, Severity};
pub use qualified_names::{property_qname, type_qname, type_simple_name};
pub use scope::{ChainedScope, MapScope, PrefixedScope, Scope, SymbolDescription, SymbolKind};
pub use scope_computation::{DocumentSymbols, compute_document_symbols};
pub use workspace::Workspace;
