//! Built-in catalog invariants and user catalog extension.

use std::io::Write;

use polytrim_analysis::catalog::{ArgumentPredicate, TomlCatalogLoader};
use polytrim_analysis::{AliasTable, Classifier, FeatureCatalog, FeatureId, Rule, SyntaxTreeBuilder};
use polytrim_core::errors::CatalogError;
use polytrim_core::types::FxHashSet;

#[test]
fn builtin_catalog_covers_every_rule_kind() {
    let kinds: FxHashSet<&str> = FeatureCatalog::builtin()
        .entries()
        .iter()
        .map(|e| e.rule.kind())
        .collect();
    for kind in ["global", "static-member", "method", "property", "call"] {
        assert!(kinds.contains(kind), "missing {kind}");
    }
}

#[test]
fn builtin_catalog_uses_corrected_method_names() {
    let methods: Vec<&str> = FeatureCatalog::builtin()
        .entries()
        .iter()
        .filter_map(|e| match &e.rule {
            Rule::GenericMethod(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert!(methods.contains(&"findLast"));
    assert!(methods.contains(&"toLocaleString"));
    assert!(!methods.contains(&"findlast"));
    assert!(!methods.contains(&"toLocalString"));
}

#[test]
fn typed_array_family_is_generated() {
    let catalog = FeatureCatalog::builtin();
    let owners: FxHashSet<&str> = catalog
        .entries()
        .iter()
        .filter(|e| e.id == "es.typed-array.from")
        .filter_map(|e| match &e.rule {
            Rule::StaticMember { owner, .. } => Some(owner.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(owners.len(), 9);
    assert!(owners.contains("Uint8ClampedArray"));
    assert!(catalog.contains("es.typed-array.int16-array"));
}

#[test]
fn error_cause_is_registered_for_every_error_constructor() {
    let callees: Vec<&str> = FeatureCatalog::builtin()
        .entries()
        .iter()
        .filter_map(|e| match &e.rule {
            Rule::PredicateCall {
                callee,
                predicate: ArgumentPredicate::Exactly(2),
            } if e.id == "es.error.cause" => Some(callee.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(callees.len(), 10);
    assert!(!callees.contains(&"AggregateError"));
    assert!(callees.contains(&"RuntimeError"));
}

#[test]
fn alias_targets_are_catalog_ids() {
    let catalog = FeatureCatalog::builtin();
    for target in AliasTable::builtin().targets() {
        assert!(catalog.contains(target.as_str()), "{target} is not in the catalog");
    }
}

#[test]
fn catalog_file_extends_the_classifier() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[features]]
id = "es.object.group-by"
kind = "static-member"
owner = "Object"
member = "groupBy"

[[features]]
id = "es.iterator.constructor"
kind = "global"
name = "Iterator"

[aliases]
"es.iterator" = ["es.iterator.constructor"]
"#
    )
    .unwrap();

    let loaded = TomlCatalogLoader::load_from_file(file.path()).unwrap();
    assert_eq!(loaded.entries.len(), 2);

    let mut classifier = Classifier::builtin();
    classifier.extend(loaded);
    assert!(classifier.catalog().contains("es.object.group-by"));
    assert!(!FeatureCatalog::builtin().contains("es.object.group-by"));

    let mut b = SyntaxTreeBuilder::new(["Object", "Iterator"]);
    let root = b.root();
    b.method_call(root, "Object", "groupBy", 2);
    b.identifier(root, "Iterator");
    let tree = b.build();

    let mut out = classifier
        .classify(["es.object.group-by", "es.iterator"], &tree)
        .unwrap();
    out.sort();
    assert_eq!(
        out,
        vec![
            FeatureId::from("es.iterator.constructor"),
            FeatureId::from("es.object.group-by"),
        ]
    );
}

#[test]
fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TomlCatalogLoader::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDefinition(_)));
}

#[test]
fn call_rule_needs_an_argument_shape() {
    let err = TomlCatalogLoader::load_from_str(
        r#"
        [[features]]
        id = "x.call"
        kind = "call"
        name = "Error"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { ref field, .. } if field == "argument_count"));

    let err = TomlCatalogLoader::load_from_str(
        r#"
        [[features]]
        id = "x.call"
        kind = "call"
        name = "Error"
        argument_count = 2
        min_arguments = 1
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDefinition(_)));
}

#[test]
fn empty_alias_is_rejected() {
    let err = TomlCatalogLoader::load_from_str("[aliases]\n\"es.x\" = []\n").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDefinition(_)));
}

#[test]
fn owner_conflicts_are_listed_in_registration_order() {
    let conflicts = FeatureCatalog::builtin().owner_conflicts();
    let promise = conflicts.iter().find(|c| c.owner == "Promise").unwrap();
    assert_eq!(promise.features.first().unwrap(), "es.promise.all");
    assert_eq!(promise.features.last().unwrap(), "es.promise.resolve");
}
