//! Cross-document name resolution: import precedence, local shadowing,
//! dotted references and link diagnostics.
#![allow(clippy::unwrap_used)]

mod helpers;

use helpers::fixtures::{
    builtin, composite, composite_extending, linked_workspace, modell_and_nadag, property,
    property_ref,
};
use sosi::semantic::SymbolKind;
use sosi::semantic::diagnostics::codes;
use sosi::syntax::{Sigil, TypeDef, TypeId};

#[test]
fn test_import_precedence_first_import_wins() {
    let (workspace, files) = linked_workspace(
        &[("m1", &[]), ("m2", &[]), ("n", &["m1", "m2"])],
        |index, doc| {
            if index < 2 {
                doc.add_type(builtin("X"));
            } else {
                doc.add_type(composite_extending("T", &["X"]));
            }
        },
    );

    let x = workspace.resolve_from(files[2], "X").unwrap();
    assert_eq!(x.name, "m1.X");
    assert_eq!(x.node.file, files[0]);
}

#[test]
fn test_local_definition_shadows_import() {
    let (workspace, files) = linked_workspace(&[("m1", &[]), ("n", &["m1"])], |_, doc| {
        doc.add_type(builtin("X"));
    });

    let x = workspace.resolve_from(files[1], "X").unwrap();
    assert_eq!(x.node.file, files[1]);
}

#[test]
fn test_supertype_links_across_documents() {
    let (workspace, modell, nadag) = modell_and_nadag(|doc| {
        doc.add_type(composite_extending("GU", &["Entitet"]));
    });

    assert!(!workspace.has_errors());
    let gu = workspace.document(nadag).type_def(TypeId::new(0));
    let TypeDef::Composite(gu) = gu else {
        panic!("expected a composite type");
    };
    let target = gu.supertypes[0].target.unwrap();
    assert_eq!(target.file, modell);
}

#[test]
fn test_dotted_property_reference_through_import() {
    let (workspace, _, nadag) = modell_and_nadag(|doc| {
        let sak = doc.add_type(composite("Sak"));
        doc.add_property(sak, property_ref("Entitet.id"));
    });

    assert!(!workspace.has_errors());
    let found = workspace.resolve_from(nadag, "Entitet.id").unwrap();
    assert_eq!(found.kind, SymbolKind::Property);
    assert_eq!(found.name, "modell.Entitet.id");
}

#[test]
fn test_dotted_property_reference_same_document() {
    let (workspace, files) = linked_workspace(&[("n", &[])], |_, doc| {
        doc.add_type(builtin("String"));
        let entitet = doc.add_type(composite("Entitet"));
        doc.add_property(
            entitet,
            property("id", Some(Sigil::Id), "String", Default::default()),
        );
        let sak = doc.add_type(composite("Sak"));
        doc.add_property(sak, property_ref("Entitet.id"));
    });

    assert!(!workspace.has_errors());
    // the own namespace acts as an implicit first prefix
    let found = workspace.resolve_from(files[0], "Entitet.id").unwrap();
    assert_eq!(found.name, "n.Entitet.id");
}

#[test]
fn test_prefixed_name_resolves_verbatim() {
    let (workspace, _, nadag) = modell_and_nadag(|doc| {
        doc.add_type(composite("GU"));
    });
    let found = workspace.resolve_from(nadag, "modell.String").unwrap();
    assert_eq!(found.kind, SymbolKind::Type);
}

#[test]
fn test_unresolved_references_are_all_reported() {
    let (workspace, files) = linked_workspace(&[("n", &[])], |_, doc| {
        let t = doc.add_type(composite("T"));
        doc.add_property(t, property("a", None, "Missing", Default::default()));
        doc.add_property(t, property("b", None, "AlsoMissing", Default::default()));
    });

    assert!(workspace.has_errors());
    let unresolved: Vec<_> = workspace
        .diagnostics(files[0])
        .iter()
        .filter(|d| d.code == Some(codes::UNRESOLVED_REFERENCE))
        .collect();
    assert_eq!(unresolved.len(), 2);
    assert!(unresolved[0].message.contains("Missing"));
    assert!(unresolved[1].message.contains("AlsoMissing"));
}

#[test]
fn test_reference_to_wrong_kind_reported() {
    // a supertype reference naming a namespace, not a type
    let (workspace, _, nadag) = modell_and_nadag(|doc| {
        doc.add_type(composite_extending("GU", &["modell"]));
    });

    let diagnostics = workspace.diagnostics(nadag);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some(codes::WRONG_REFERENCE_KIND));
    assert!(diagnostics[0].message.contains("namespace"));
}

#[test]
fn test_visible_symbols_alias_imported_names() {
    let (workspace, _, nadag) = modell_and_nadag(|doc| {
        doc.add_type(composite("GU"));
    });

    let visible = workspace.visible_symbols(nadag);
    let entitet_alias = visible
        .iter()
        .find(|d| d.name == "Entitet")
        .expect("imported type should be visible under its simple name");
    let entitet_full = visible.iter().find(|d| d.name == "modell.Entitet").unwrap();
    assert_eq!(entitet_alias.node, entitet_full.node);
}

#[test]
fn test_import_itself_is_linked() {
    let (workspace, modell, nadag) = modell_and_nadag(|doc| {
        doc.add_type(composite("GU"));
    });
    let import = &workspace.document(nadag).namespace().imports[0];
    assert!(import.namespace.is_linked());
    assert_eq!(import.namespace.target.unwrap().file, modell);
}
