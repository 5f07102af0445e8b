//! Scopes and the import-prefix decorator.
//!
//! A [`Scope`] answers three questions: single lookup, multi-result
//! lookup, and full enumeration of visible symbols. [`MapScope`] is the
//! plain name table, [`ChainedScope`] layers a local scope over the global
//! one, and [`PrefixedScope`] decorates any delegate with the import
//! prefixes active at a reference site.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::{SmolStr, format_smolstr};

use crate::base::Span;
use crate::syntax::NodeRef;

// ============================================================================
// Symbol descriptions
// ============================================================================

/// What kind of node a symbol describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type,
    Property,
}

impl SymbolKind {
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Type => "type",
            SymbolKind::Property => "property",
        }
    }
}

/// A named, addressable symbol as seen from some scope.
///
/// `name` is the key the symbol is visible under in that scope; the same
/// node may appear under different names (fully qualified in the global
/// scope, simple in its own document, prefix-stripped in enumerations).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDescription {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub node: NodeRef,
    pub span: Span,
}

impl SymbolDescription {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, node: NodeRef, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            node,
            span,
        }
    }

    /// The same symbol visible under another name
    fn with_name(&self, name: SmolStr) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }
}

// ============================================================================
// Scope trait
// ============================================================================

/// Symbol lookup interface for one reference site.
pub trait Scope {
    /// Look up a single element by name
    fn element(&self, name: &str) -> Option<SymbolDescription>;

    /// All elements visible under `name` (used for ambiguity reporting)
    fn elements(&self, name: &str) -> Vec<SymbolDescription>;

    /// Every visible symbol, for completion-style enumeration
    fn all_elements(&self) -> Vec<SymbolDescription>;
}

// ============================================================================
// MapScope
// ============================================================================

/// A flat name table. Insertion order is preserved so enumeration follows
/// declaration order across documents.
#[derive(Debug, Clone, Default)]
pub struct MapScope {
    entries: IndexMap<SmolStr, SymbolDescription, FxBuildHasher>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol under its name. The first entry wins; returns the
    /// existing description on conflict so callers can report duplicates.
    pub fn insert(&mut self, description: SymbolDescription) -> Option<&SymbolDescription> {
        match self.entries.entry(description.name.clone()) {
            indexmap::map::Entry::Occupied(entry) => Some(entry.into_mut()),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(description);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolDescription> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolDescription> {
        self.entries.values()
    }
}

impl Scope for MapScope {
    fn element(&self, name: &str) -> Option<SymbolDescription> {
        self.entries.get(name).cloned()
    }

    fn elements(&self, name: &str) -> Vec<SymbolDescription> {
        self.entries.get(name).cloned().into_iter().collect()
    }

    fn all_elements(&self) -> Vec<SymbolDescription> {
        self.entries.values().cloned().collect()
    }
}

// ============================================================================
// ChainedScope
// ============================================================================

/// A local scope layered over an outer one; local entries shadow outer
/// entries with the same name.
pub struct ChainedScope<'a> {
    local: &'a dyn Scope,
    outer: &'a dyn Scope,
}

impl<'a> ChainedScope<'a> {
    pub fn new(local: &'a dyn Scope, outer: &'a dyn Scope) -> Self {
        Self { local, outer }
    }
}

impl Scope for ChainedScope<'_> {
    fn element(&self, name: &str) -> Option<SymbolDescription> {
        self.local
            .element(name)
            .or_else(|| self.outer.element(name))
    }

    fn elements(&self, name: &str) -> Vec<SymbolDescription> {
        let mut found = self.local.elements(name);
        found.extend(self.outer.elements(name));
        found
    }

    fn all_elements(&self) -> Vec<SymbolDescription> {
        let mut all = self.local.all_elements();
        all.extend(self.outer.all_elements());
        all
    }
}

// ============================================================================
// PrefixedScope
// ============================================================================

/// Decorates a delegate scope with the import prefixes active at the
/// reference site (each prefix carries its trailing dot).
///
/// Single lookup tries the unprefixed name first, then each prefix in
/// declaration order; the earliest import wins. Multi-result lookup unions
/// the results across the unprefixed name and every prefixed variant. Full
/// enumeration additionally surfaces an unprefixed alias for every symbol
/// whose name starts with one of the active prefixes, so completion sees
/// imported symbols under their short name too.
pub struct PrefixedScope<'a> {
    prefixes: Vec<SmolStr>,
    delegate: &'a dyn Scope,
}

impl<'a> PrefixedScope<'a> {
    pub fn new(prefixes: Vec<SmolStr>, delegate: &'a dyn Scope) -> Self {
        Self { prefixes, delegate }
    }
}

impl Scope for PrefixedScope<'_> {
    fn element(&self, name: &str) -> Option<SymbolDescription> {
        if let Some(found) = self.delegate.element(name) {
            return Some(found);
        }
        for prefix in &self.prefixes {
            if let Some(found) = self.delegate.element(&format_smolstr!("{prefix}{name}")) {
                return Some(found);
            }
        }
        None
    }

    fn elements(&self, name: &str) -> Vec<SymbolDescription> {
        let mut found = self.delegate.elements(name);
        for prefix in &self.prefixes {
            found.extend(self.delegate.elements(&format_smolstr!("{prefix}{name}")));
        }
        found
    }

    fn all_elements(&self) -> Vec<SymbolDescription> {
        let mut all = Vec::new();
        for description in self.delegate.all_elements() {
            let alias = self.prefixes.iter().find_map(|prefix| {
                description
                    .name
                    .strip_prefix(prefix.as_str())
                    .map(SmolStr::new)
            });
            if let Some(short) = alias {
                all.push(description.with_name(short));
            }
            all.push(description);
        }
        all
    }
}
