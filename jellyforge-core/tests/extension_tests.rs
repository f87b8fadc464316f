//! Extension tag detection and registration.

use assert_fs::prelude::*;
use jellyforge_core::{
    extension::{self, EXTENSION_FILE},
    ExtensionError, TagCall, TagError, TagRegistry, TagShape,
};
use predicates::prelude::*;

#[test]
fn absent_file_yields_builtins_only() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let registry = extension::registry_for_root(root.path()).expect("registry");
    assert_eq!(registry.len(), TagRegistry::with_builtins().len());
    assert!(extension::detect(root.path()).expect("detect").is_none());
}

#[test]
fn declared_tags_are_registered() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child(EXTENSION_FILE)
        .write_str(
            r#"
tags:
  - name: password
    kind: field
    defaults:
      class: secret
  - name: nested
    kind: block
    required: [title]
  - name: help_area
    kind: void
    element: "f:helpArea"
"#,
        )
        .expect("write");

    let registry = extension::registry_for_root(root.path()).expect("registry");
    assert_eq!(registry.len(), TagRegistry::with_builtins().len() + 3);

    let password = registry
        .render_expr("password", TagCall::new().arg("name", "creds.token"), None)
        .expect("password");
    assert_eq!(
        password,
        r#"<f:password name="creds.token" value="${instance.token}" class="secret"/>"#
    );

    assert_eq!(registry.get("nested").unwrap().shape(), TagShape::Block);
    let err = registry
        .render_expr("nested", TagCall::new(), None)
        .unwrap_err();
    assert_eq!(err, TagError::missing("nested", "title"));

    let help = registry
        .render_expr("help_area", TagCall::new(), None)
        .expect("help_area");
    assert_eq!(help, "<f:helpArea/>");
}

#[test]
fn shadowing_a_builtin_is_rejected() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child(EXTENSION_FILE)
        .write_str("tags:\n  - name: textbox\n    kind: field\n")
        .expect("write");

    let err = extension::registry_for_root(root.path()).unwrap_err();
    assert!(
        matches!(err, ExtensionError::Registration(TagError::DuplicateTag(ref n)) if n == "textbox"),
        "got: {err}"
    );
}

#[test]
fn malformed_file_reports_path() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child(EXTENSION_FILE)
        .write_str("tags:\n  - name: x\n    kind: sparkle\n")
        .expect("write");

    let err = extension::registry_for_root(root.path()).unwrap_err();
    assert!(matches!(err, ExtensionError::Parse { .. }), "got: {err}");
    assert!(predicate::str::contains(EXTENSION_FILE).eval(&err.to_string()));
}

#[test]
fn non_scalar_default_is_a_parse_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child(EXTENSION_FILE)
        .write_str("tags:\n  - name: x\n    kind: void\n    defaults:\n      class: [a, b]\n")
        .expect("write");

    let err = extension::registry_for_root(root.path()).unwrap_err();
    assert!(matches!(err, ExtensionError::Parse { .. }), "got: {err}");
}

#[test]
fn invalid_tag_name_is_rejected() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child(EXTENSION_FILE)
        .write_str("tags:\n  - name: help-area\n    kind: void\n")
        .expect("write");

    let err = extension::registry_for_root(root.path()).unwrap_err();
    assert!(matches!(err, ExtensionError::Invalid { .. }), "got: {err}");
}
