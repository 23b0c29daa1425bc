use mopro_core::{
    identifier::ElementId,
    model::ConnectorKind,
    repository::ModelRepository,
};
use mopro_parser::{error::ErrorCode, parse};
use proptest::{collection::btree_set, prelude::*, sample::Index};

const SHOP_MODEL: &str = r#"
[[packages]]
name = "Shop"
stereotype = "profile"

[[packages.packages]]
name = "Language"
stereotype = "Metamodel"

[[packages.packages.packages]]
name = "Abstract Syntax Model"

[[packages.packages.packages.elements]]
id = 1
name = "Gateway"
notes = "Entry point"
run_state = "Variable=capacity;Value=20;"

[[packages.packages.packages.elements.attributes]]
name = "capacity"
type = "int"
default = "10"

[[packages.packages.packages.elements]]
id = 2
name = "Flow"
base_classes = [3]

[[packages.packages.packages.diagrams]]
name = "Shop ASM"
type = "Logical"
objects = [1, 2]

[[packages.packages.packages]]
name = "UML4Profile"

[[packages.packages.packages.elements]]
id = 3
name = "Association"

[[connectors]]
type = "Generalization"
client = 2
supplier = 3

[[connectors]]
type = "Association"
client = 1
supplier = 2
supplier_end = { role = "target", cardinality = "0..*" }
"#;

#[test]
fn test_parse_builds_package_tree() {
    let repository = parse(SHOP_MODEL).unwrap();

    let profiles = repository.packages_with_stereotype("profile");
    assert_eq!(profiles.len(), 1);
    let shop = profiles[0];
    assert_eq!(shop.name(), "Shop");

    let language = shop.child("Language").unwrap();
    assert!(language.has_stereotype("Metamodel"));
    let asm = language.child("Abstract Syntax Model").unwrap();
    assert_eq!(asm.elements(), &[ElementId::new(1), ElementId::new(2)]);
    assert_eq!(asm.diagrams()[0].objects().len(), 2);
}

#[test]
fn test_parse_builds_elements() {
    let repository = parse(SHOP_MODEL).unwrap();

    let gateway = repository.element(ElementId::new(1)).unwrap();
    assert_eq!(gateway.name(), "Gateway");
    assert!(gateway.is_class());
    assert_eq!(gateway.notes(), "Entry point");
    assert_eq!(gateway.attributes()[0].default_value(), "10");
    assert_eq!(gateway.run_state(), "Variable=capacity;Value=20;");

    let flow = repository.element(ElementId::new(2)).unwrap();
    assert_eq!(flow.base_classes(), &[ElementId::new(3)]);
}

#[test]
fn test_parse_builds_connectors() {
    let repository = parse(SHOP_MODEL).unwrap();

    let connectors = repository.connectors_of(ElementId::new(2));
    assert_eq!(connectors.len(), 2);
    assert_eq!(connectors[0].kind(), &ConnectorKind::Generalization);
    assert_eq!(connectors[1].kind(), &ConnectorKind::Association);
    assert_eq!(connectors[1].supplier_end().role(), "target");
    assert_eq!(connectors[1].supplier_end().cardinality(), "0..*");
    assert_eq!(connectors[1].client_end().role(), "");
}

#[test]
fn test_parse_reports_every_error() {
    let source = r#"
[[packages]]
name = "Broken"

[[packages.elements]]
id = 1
name = "A"
base_classes = [1, 5]

[[packages.elements]]
id = 1
name = "B"
"#;
    let err = parse(source).unwrap_err();
    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E100, ErrorCode::E102, ErrorCode::E101]);
}

#[test]
fn test_parse_malformed_document() {
    let err = parse("[[packages]]\nname = ").unwrap_err();
    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
}

#[test]
fn test_parse_warning_does_not_fail() {
    let source = r#"
[[packages]]
name = "Root"

[[packages.diagrams]]
name = "Twice"

[[packages.diagrams]]
name = "Twice"
"#;
    let repository = parse(source).unwrap();
    assert_eq!(repository.root_packages()[0].diagrams().len(), 2);
}

/// A profile package holding one element per id. Every element after the
/// first generalizes an earlier one, picked by `bases`.
fn generated_model(ids: &[u32], bases: &[Index]) -> String {
    let mut source =
        String::from("[[packages]]\nname = \"Generated\"\nstereotype = \"profile\"\n");
    for (position, id) in ids.iter().enumerate() {
        source.push_str(&format!(
            "\n[[packages.elements]]\nid = {id}\nname = \"E{position}\"\n"
        ));
        if position > 0 {
            let base = ids[bases[position].index(position)];
            source.push_str(&format!("base_classes = [{base}]\n"));
        }
    }
    source
}

proptest! {
    #[test]
    fn test_unique_ids_with_resolvable_bases_load(
        ids in btree_set(1u32..100_000, 1..12),
        bases in prop::collection::vec(any::<Index>(), 12),
    ) {
        let ids: Vec<u32> = ids.into_iter().collect();
        let repository = parse(&generated_model(&ids, &bases)).unwrap();
        for id in &ids {
            prop_assert!(repository.element(ElementId::new(*id)).is_some());
        }
    }

    #[test]
    fn test_duplicate_id_is_always_rejected(
        ids in btree_set(1u32..100_000, 1..12),
        bases in prop::collection::vec(any::<Index>(), 12),
        repeated in any::<Index>(),
    ) {
        let ids: Vec<u32> = ids.into_iter().collect();
        let duplicate = ids[repeated.index(ids.len())];
        let source = format!(
            "{}\n[[packages.elements]]\nid = {duplicate}\nname = \"Copy\"\n",
            generated_model(&ids, &bases)
        );

        let err = parse(&source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
        prop_assert_eq!(codes, vec![ErrorCode::E100]);
    }
}
