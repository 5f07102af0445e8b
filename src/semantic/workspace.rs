//! Workspace — all documents of a project and the two-phase build.
//!
//! `build` runs two mandatory, ordered phases:
//!
//! 1. **Scope computation** for every document. Each document's
//!    computation reads only its own tree, so this phase runs in parallel
//!    across documents. The per-document exports are then merged into one
//!    global symbol table.
//! 2. **Linking** (plus validation) per document, against the completed
//!    global table. The barrier between the phases is a hard ordering
//!    requirement, not an optimization: resolving an import-prefixed
//!    reference in one document needs another document's exports.
//!
//! References may only be treated as resolved after `build` has run.
//! Diagnostics are collected per document; a caller that proceeds to
//! semantic model building despite link errors does so at its own risk.

use rayon::prelude::*;
use smol_str::{SmolStr, format_smolstr};
use tracing::{debug, info};

use super::diagnostics::{Diagnostic, codes};
use super::linker::link_document;
use super::scope::{ChainedScope, MapScope, PrefixedScope, Scope, SymbolDescription};
use super::scope_computation::{DocumentSymbols, compute_document_symbols};
use super::validator::validate_document;
use crate::base::{FileId, QName, Span};
use crate::syntax::Document;

struct DocumentState {
    doc: Document,
    symbols: DocumentSymbols,
    /// Parser diagnostics first, then build diagnostics; `parse_len`
    /// marks the boundary so rebuilds only replace the build part.
    diagnostics: Vec<Diagnostic>,
    parse_len: usize,
}

/// A project of SOSI documents with a shared global symbol table.
#[derive(Default)]
pub struct Workspace {
    documents: Vec<DocumentState>,
    global: MapScope,
    linked: bool,
}

impl Workspace {
    /// Creates a new empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document for the given namespace name and return
    /// its id. The caller populates the document through
    /// [`Workspace::document_mut`], then runs [`Workspace::build`].
    pub fn create_document(&mut self, name: impl Into<QName>, span: Span) -> FileId {
        let file = FileId::new(self.documents.len());
        self.documents.push(DocumentState {
            doc: Document::new(file, name, span),
            symbols: DocumentSymbols::default(),
            diagnostics: Vec::new(),
            parse_len: 0,
        });
        self.linked = false;
        file
    }

    pub fn document(&self, file: FileId) -> &Document {
        &self.documents[file.index()].doc
    }

    /// Mutable access for the populating parser; invalidates prior builds
    pub fn document_mut(&mut self, file: FileId) -> &mut Document {
        self.linked = false;
        &mut self.documents[file.index()].doc
    }

    /// Attach parser-reported diagnostics to a document. They are kept
    /// through rebuilds and reported alongside link and validation
    /// problems.
    pub fn add_parse_diagnostics(&mut self, file: FileId, diagnostics: Vec<Diagnostic>) {
        let state = &mut self.documents[file.index()];
        let at = state.parse_len;
        state.parse_len += diagnostics.len();
        let tail = state.diagnostics.split_off(at);
        state.diagnostics.extend(diagnostics);
        state.diagnostics.extend(tail);
    }

    /// All documents in the project
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().map(|state| &state.doc)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether the last `build` completed (references may be bound)
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    // ------------------------------------------------------------------
    // Build
    // ------------------------------------------------------------------

    /// Run the two-phase build over every document in the project.
    pub fn build(&mut self) {
        info!(documents = self.documents.len(), "building workspace");

        // phase 1: per-document scope computation, no cross-document reads
        let computed: Vec<(DocumentSymbols, Vec<Diagnostic>)> = self
            .documents
            .par_iter()
            .map(|state| {
                (
                    compute_document_symbols(&state.doc),
                    validate_document(&state.doc),
                )
            })
            .collect();

        self.global = MapScope::new();
        for (state, (symbols, validation)) in self.documents.iter_mut().zip(computed) {
            // drop the previous build's diagnostics, keep the parser's
            state.diagnostics.truncate(state.parse_len);
            state.diagnostics.extend(validation);
            for description in &symbols.exported {
                if let Some(existing) = self.global.insert(description.clone()) {
                    state.diagnostics.push(
                        Diagnostic::error(
                            format!(
                                "'{}' is already defined elsewhere in the project",
                                existing.name
                            ),
                            description.span,
                        )
                        .with_code(codes::DUPLICATE_DEFINITION),
                    );
                }
            }
            state.symbols = symbols;
        }
        debug!(symbols = self.global.len(), "global scope assembled");

        // phase 2: linking, after the barrier
        for index in 0..self.documents.len() {
            let prefixes = import_prefixes(&self.documents[index].doc);
            let state = &mut self.documents[index];
            let scope = ChainedScope::new(&state.symbols.local, &self.global);
            let scope = PrefixedScope::new(prefixes, &scope);
            let errors = link_document(&mut state.doc, &scope);
            state.diagnostics.extend(errors);
        }
        self.linked = true;
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Diagnostics attached to one document, in report order
    pub fn diagnostics(&self, file: FileId) -> &[Diagnostic] {
        &self.documents[file.index()].diagnostics
    }

    /// All diagnostics across the project, paired with their document
    pub fn all_diagnostics(&self) -> impl Iterator<Item = (FileId, &Diagnostic)> {
        self.documents.iter().flat_map(|state| {
            state
                .diagnostics
                .iter()
                .map(move |d| (state.doc.file(), d))
        })
    }

    pub fn has_errors(&self) -> bool {
        self.documents
            .iter()
            .any(|state| state.diagnostics.iter().any(|d| d.severity.is_error()))
    }

    /// The symbols a document exports to the rest of the project
    pub fn exported_symbols(&self, file: FileId) -> &[SymbolDescription] {
        &self.documents[file.index()].symbols.exported
    }

    /// Every symbol visible from within a document, including unprefixed
    /// aliases for symbols reachable through the document's imports.
    /// Meaningful after `build`.
    pub fn visible_symbols(&self, file: FileId) -> Vec<SymbolDescription> {
        let state = &self.documents[file.index()];
        let scope = ChainedScope::new(&state.symbols.local, &self.global);
        let scope = PrefixedScope::new(import_prefixes(&state.doc), &scope);
        scope.all_elements()
    }

    /// Look up a single name as seen from within a document
    pub fn resolve_from(&self, file: FileId, name: &str) -> Option<SymbolDescription> {
        let state = &self.documents[file.index()];
        let scope = ChainedScope::new(&state.symbols.local, &self.global);
        let scope = PrefixedScope::new(import_prefixes(&state.doc), &scope);
        scope.element(name)
    }
}

/// The prefix list active inside a document: its own namespace first (so
/// dotted same-document references like `Entitet.id` resolve without a
/// self-import), then each import in declaration order.
fn import_prefixes(doc: &Document) -> Vec<SmolStr> {
    let ns = doc.namespace();
    let mut prefixes = Vec::with_capacity(ns.imports.len() + 1);
    prefixes.push(format_smolstr!("{}.", ns.name));
    for import in &ns.imports {
        prefixes.push(format_smolstr!("{}.", import.namespace.text));
    }
    prefixes
}
