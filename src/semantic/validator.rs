//! Document validation.
//!
//! Validation problems never block a build; they are reported alongside
//! link errors in the document's diagnostic list.

use rustc_hash::FxHashMap;

use super::diagnostics::{Diagnostic, codes};
use crate::semantic::qualified_names::type_simple_name;
use crate::syntax::Document;

/// Run all document-local checks.
pub fn validate_document(doc: &Document) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    check_namespace_has_types(doc, &mut diagnostics);
    check_unique_type_names(doc, &mut diagnostics);
    diagnostics
}

/// A namespace should declare at least one type.
fn check_namespace_has_types(doc: &Document, diagnostics: &mut Vec<Diagnostic>) {
    let ns = doc.namespace();
    if ns.types.is_empty() {
        diagnostics.push(
            Diagnostic::warning(
                format!("namespace '{}' does not declare any types", ns.name),
                ns.span,
            )
            .with_code(codes::EMPTY_NAMESPACE),
        );
    }
}

/// Qualified names must be unique within a namespace.
fn check_unique_type_names(doc: &Document, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: FxHashMap<smol_str::SmolStr, crate::syntax::TypeId> = FxHashMap::default();
    for &type_id in doc.top_level_types() {
        let name = type_simple_name(doc, type_id);
        if seen.contains_key(&name) {
            diagnostics.push(
                Diagnostic::error(
                    format!(
                        "type '{}' is already defined in namespace '{}'",
                        name,
                        doc.namespace().name
                    ),
                    doc.type_def(type_id).span(),
                )
                .with_code(codes::DUPLICATE_DEFINITION),
            );
        } else {
            seen.insert(name, type_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, Span};
    use crate::semantic::Severity;
    use crate::syntax::{BuiltinDef, TypeDef};

    fn builtin(name: &str) -> TypeDef {
        TypeDef::Builtin(BuiltinDef {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            mappings: Vec::new(),
            span: Span::default(),
        })
    }

    #[test]
    fn test_empty_namespace_warns() {
        let doc = Document::new(FileId::new(0), "tom.pakke", Span::default());
        let diagnostics = validate_document(&doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].code, Some(codes::EMPTY_NAMESPACE));
    }

    #[test]
    fn test_duplicate_type_reported_on_later_definition() {
        let mut doc = Document::new(FileId::new(0), "ns", Span::default());
        doc.add_type(builtin("String"));
        doc.add_type(builtin("String"));
        let diagnostics = validate_document(&doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::DUPLICATE_DEFINITION));
    }

    #[test]
    fn test_valid_document_is_clean() {
        let mut doc = Document::new(FileId::new(0), "ns", Span::default());
        doc.add_type(builtin("String"));
        assert!(validate_document(&doc).is_empty());
    }
}
