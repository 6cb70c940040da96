//! Behavioral specs for ginkgo-lens.toml handling.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn ginkgo_path_config(temp: &Project, extra: &str) {
    temp.config(&format!(
        "ginkgo_path = \"{}\"\n{}",
        temp.ginkgo().display(),
        extra
    ));
}

/// > ginkgo_path in the discovered config selects the binary
#[test]
fn ginkgo_path_from_config() {
    let temp = Project::widgets();
    ginkgo_path_config(&temp, "");
    outline("widgets_test.go")
        .pwd(temp.path())
        .passes()
        .stdout_has("> It adds two numbers");
}

/// > Config is discovered from parent directories
#[test]
fn config_found_in_parent_directory() {
    let temp = Project::widgets();
    ginkgo_path_config(&temp, "");
    temp.file("pkg/widgets_test.go", "package widgets_test\n");
    outline("widgets_test.go")
        .pwd(temp.path().join("pkg"))
        .passes()
        .stdout_has("+ Widgets");
}

/// > test_env and test_env_file reach the ginkgo process
#[test]
fn test_env_reaches_ginkgo() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    temp.file(".env", "API_URL=\"http://localhost\"\nGO_ENV=file\n");
    ginkgo_path_config(
        &temp,
        "test_env_file = \".env\"\n\n[test_env]\nGO_ENV = \"test\"\n",
    );
    run("widgets_test.go").pwd(temp.path()).passes();

    let env = temp.read("bin/env.txt");
    assert!(env.lines().any(|l| l == "API_URL=http://localhost"), "{env}");
    assert!(env.lines().any(|l| l == "GO_ENV=test"), "{env}");
}

/// > A missing env file is an error
#[test]
fn missing_env_file_fails() {
    let temp = Project::widgets();
    ginkgo_path_config(&temp, "test_env_file = \"missing.env\"\n");
    run("widgets_test.go")
        .pwd(temp.path())
        .fails()
        .stderr_has("missing.env");
}

/// > Unknown keys warn and suggest the intended key
#[test]
fn unknown_key_warns() {
    let temp = Project::widgets();
    ginkgo_path_config(&temp, "cacheTTL = \"5m\"\n");
    outline("widgets_test.go")
        .pwd(temp.path())
        .passes()
        .stderr_has("cacheTTL")
        .stderr_has("cache_ttl");
}

/// > An unsupported config version is a config error
#[test]
fn unsupported_version_fails() {
    let temp = Project::widgets();
    temp.config("version = 2\n");
    outline("widgets_test.go")
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

/// > An invalid duration is a config error
#[test]
fn invalid_duration_fails() {
    let temp = Project::widgets();
    temp.config("cache_ttl = \"soon\"\n");
    outline("widgets_test.go").pwd(temp.path()).exits(2);
}

/// > The --ginkgo flag overrides the config
#[test]
fn flag_overrides_config() {
    let temp = Project::widgets();
    temp.config("ginkgo_path = \"/nonexistent/ginkgo\"\n");
    let ginkgo = temp.ginkgo();
    outline("widgets_test.go")
        .pwd(temp.path())
        .args(&["--ginkgo", ginkgo.to_str().unwrap()])
        .passes()
        .stdout_has("+ Widgets");
}
