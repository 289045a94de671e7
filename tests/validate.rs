//! End-to-end validation tests over schema fixtures and in-memory trees.

use std::path::PathBuf;

use json_schema_compat::{
    assert_files_compatible, classify, compare_schema_files, compare_schemas, ChangeKind,
    CompatConfig, CompatError,
};
use serde_json::{json, Value};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Value {
    let text = std::fs::read_to_string(fixture(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn identical_files_are_compatible() {
    let result = compare_schema_files(
        fixture("mount.json"),
        fixture("mount.json"),
        &CompatConfig::default(),
    )
    .unwrap();

    assert!(result.valid);
    assert!(result.violations.is_empty());
}

#[test]
fn self_comparison_is_reflexive() {
    let schema = load_fixture("alternatives.json");
    let result = compare_schemas(&schema, &schema, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn removed_property_is_breaking() {
    let result = compare_schema_files(
        fixture("mount.json"),
        fixture("mount_removed_field.json"),
        &CompatConfig::default(),
    )
    .unwrap();

    assert!(!result.valid);
    assert_eq!(
        result.errors(),
        vec![
            r#"Detected a missing property or field. Path - "/definitions/entry/properties/readonly""#
        ]
    );
}

#[test]
fn assert_variant_fails_on_breaking_change() {
    let err = assert_files_compatible(
        fixture("mount.json"),
        fixture("mount_removed_field.json"),
        &CompatConfig::default(),
    )
    .unwrap_err();

    match err {
        CompatError::Incompatible(message) => {
            assert!(message.contains("/definitions/entry/properties/readonly"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn new_optional_definition_is_compatible() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["field"] = json!({ "type": "number" });

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn new_required_definition_is_breaking() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["field"] = json!({ "type": "number" });
    changed["required"].as_array_mut().unwrap().push(json!("field"));

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ChangeKind::Addition);
    assert_eq!(result.violations[0].path, "/required/1");
}

#[test]
fn field_becoming_required_is_breaking() {
    let original = json!({
        "properties": {
            "/": { "type": "object" },
            "swap": { "type": "object" }
        },
        "required": ["/"]
    });
    let mut changed = original.clone();
    changed["required"] = json!(["/", "swap"]);

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].path, "/required/1");
}

#[test]
fn field_becoming_optional_is_compatible() {
    let original = json!({
        "properties": {
            "/": { "type": "object" },
            "swap": { "type": "object" }
        },
        "required": ["/", "swap"]
    });
    let mut changed = original.clone();
    changed["required"] = json!(["/"]);

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn changed_field_type_is_breaking() {
    let original = json!({
        "definitions": {
            "contact": {
                "properties": { "customerId": { "type": "string" } },
                "required": ["customerId"]
            }
        }
    });
    let mut changed = original.clone();
    changed["definitions"]["contact"]["properties"]["customerId"]["type"] = json!("number");

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(!result.valid);
    assert_eq!(
        result.errors(),
        vec![
            r#"Detected a change to a field value. Path - "/definitions/contact/properties/customerId/type""#
        ]
    );
}

#[test]
fn lowered_min_items_is_compatible() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["entry"]["properties"]["options"]["minItems"] = json!(0);

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn equal_min_items_is_compatible() {
    // The diff never emits a replace for an equal value, but patches from
    // other producers may; equality must not be flagged.
    let original = load_fixture("mount.json");
    let ops = [json_patch::PatchOperation::Replace(
        json_patch::ReplaceOperation {
            path: "/definitions/entry/properties/options/minItems".into(),
            value: json!(1),
        },
    )];

    let result = classify(&original, &ops, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn raised_min_items_is_breaking() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["entry"]["properties"]["options"]["minItems"] = json!(3);

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ChangeKind::Replacement);
    assert_eq!(
        result.violations[0].path,
        "/definitions/entry/properties/options/minItems"
    );
}

#[test]
fn removed_min_items_is_compatible() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["entry"]["properties"]["options"]
        .as_object_mut()
        .unwrap()
        .remove("minItems");

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn documentation_changes_are_compatible() {
    let original = load_fixture("mount.json");
    let mut changed = original.clone();
    changed["definitions"]["entry"]["description"] = json!("A mount table entry");
    changed["definitions"]["entry"]["examples"] = json!([{ "device": "/dev/sda1" }]);

    let result = compare_schemas(&original, &changed, &CompatConfig::default());
    assert!(result.valid);
}

#[test]
fn missing_file_is_an_input_error() {
    let err = compare_schema_files(
        fixture("does_not_exist.json"),
        fixture("mount.json"),
        &CompatConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, CompatError::ReadFile { .. }));
}

#[test]
fn unparsable_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err =
        compare_schema_files(&path, fixture("mount.json"), &CompatConfig::default()).unwrap_err();

    assert!(matches!(err, CompatError::ParseFile { .. }));
}
