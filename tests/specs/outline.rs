//! Behavioral specs for `ginkgo-lens outline`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn widgets_outline(temp: &Project) -> LensBuilder<Text> {
    let ginkgo = temp.ginkgo();
    outline("widgets_test.go")
        .pwd(temp.path())
        .env("GINKGO_LENS_GINKGO", ginkgo.to_str().unwrap())
}

/// > The outline prints as an indented tree with one marker per kind
#[test]
fn prints_tree() {
    let temp = Project::widgets();
    widgets_outline(&temp).passes().stdout_eq(
        "+ Widgets\n  # BeforeEach\n  > It adds two numbers\n  > It subtracts\n",
    );
}

/// > --flat prints the pre-order list
#[test]
fn prints_flat_list() {
    let temp = Project::widgets();
    widgets_outline(&temp)
        .args(&["--flat"])
        .passes()
        .stdout_eq("+ Widgets\n# BeforeEach\n> It adds two numbers\n> It subtracts\n");
}

/// > Only explicitly focused specs get the focus marker
#[test]
fn explicit_focus_marker() {
    let temp = Project::widgets();
    temp.outline_json(
        r#"[{"name":"Describe","text":"Widgets","nodes":[{"name":"FIt","text":"adds","spec":true,"focused":true},{"name":"It","text":"subtracts","spec":true}]}]"#,
    );
    widgets_outline(&temp)
        .passes()
        .stdout_eq("+ Widgets\n  * It adds\n  > It subtracts\n");
}

/// > --keys shows the identity key used to correlate results
#[test]
fn shows_identity_keys() {
    let temp = Project::widgets();
    widgets_outline(&temp)
        .args(&["--keys"])
        .passes()
        .stdout_has("> It subtracts  [Widgets subtracts]");
}

/// > Major version 1 prefixes `When` containers in keys
#[test]
fn v1_keys_keep_when_prefix() {
    let temp = Project::widgets();
    temp.outline_json(
        r#"[{"name":"Describe","text":"Cache","nodes":[{"name":"When","text":"full","nodes":[{"name":"It","text":"evicts","spec":true}]}]}]"#,
    );
    widgets_outline(&temp)
        .args(&["--keys", "--major-version", "1"])
        .passes()
        .stdout_has("[Cache when full evicts]");
}

/// > Major version 2 keys omit the `When` prefix
#[test]
fn v2_keys_omit_when_prefix() {
    let temp = Project::widgets();
    temp.outline_json(
        r#"[{"name":"Describe","text":"Cache","nodes":[{"name":"When","text":"full","nodes":[{"name":"It","text":"evicts","spec":true}]}]}]"#,
    );
    widgets_outline(&temp)
        .args(&["--keys"])
        .passes()
        .stdout_has("[Cache full evicts]");
}

/// > JSON output nests children and carries keys
#[test]
fn json_output() {
    let temp = Project::widgets();
    let json = widgets_outline(&temp).json().passes();

    assert_eq!(json["major_version"], 2);
    assert_eq!(json["file"], "widgets_test.go");
    let root = &json["nodes"][0];
    assert_eq!(root["label"], "Widgets");
    assert_eq!(root["children"].as_array().unwrap().len(), 3);
    assert_eq!(root["children"][2]["key"], "Widgets subtracts");
    assert_eq!(root["children"][2]["icon"], "spec");
}

/// > A file without Ginkgo imports has an empty outline and a warning
#[test]
fn file_without_ginkgo_imports_is_empty() {
    let temp = Project::widgets();
    temp.without_ginkgo_imports();
    widgets_outline(&temp)
        .passes()
        .stdout_eq("")
        .stderr_has("does not import ginkgo");
}

/// > A ginkgo binary that cannot be run is an internal error
#[test]
fn missing_ginkgo_fails() {
    let temp = Project::widgets();
    outline("widgets_test.go")
        .pwd(temp.path())
        .args(&["--ginkgo", "/nonexistent/ginkgo", "--major-version", "2"])
        .exits(3)
        .stderr_has("ginkgo-lens:");
}

/// > A missing test file is an internal error naming the file
#[test]
fn missing_file_fails() {
    let temp = Project::widgets();
    let ginkgo = temp.ginkgo();
    outline("missing_test.go")
        .pwd(temp.path())
        .env("GINKGO_LENS_GINKGO", ginkgo.to_str().unwrap())
        .exits(3)
        .stderr_has("missing_test.go");
}

/// > Malformed outline output is reported
#[test]
fn malformed_outline_fails() {
    let temp = Project::widgets();
    temp.outline_json("{not json");
    widgets_outline(&temp).exits(3);
}
