//! Behavioral specs for `ginkgo-lens run`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn widgets_run(temp: &Project) -> LensBuilder<Text> {
    let ginkgo = temp.ginkgo();
    run("widgets_test.go")
        .pwd(temp.path())
        .env("GINKGO_LENS_GINKGO", ginkgo.to_str().unwrap())
}

/// > Running the suite attaches each result to its node
#[test]
fn passing_run_marks_specs() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    widgets_run(&temp).passes().stdout_eq(
        "+ Widgets\n  # BeforeEach\n  > It adds two numbers  PASS\n  > It subtracts  PASS\n2 passed\n",
    );
}

/// > A failing spec is marked and the run exits 1
#[test]
fn failing_run_exits_1() {
    let temp = Project::widgets();
    temp.report(FAILING_REPORT);
    temp.exit_code(1);
    widgets_run(&temp)
        .exits(1)
        .stdout_has("  > It subtracts  FAIL\n")
        .stdout_has("1 passed, 1 failed");
}

/// > The report file is consumed after the run
#[test]
fn report_is_removed_after_run() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    widgets_run(&temp).passes();
    assert!(!temp.path().join("ginkgo.report").exists());
}

/// > A test file in a subdirectory runs there and keeps its results
#[test]
fn nested_file_runs_in_its_directory() {
    let temp = Project::widgets();
    temp.file("sub/widgets_test.go", "package widgets_test\n");
    temp.report(PASSING_REPORT);
    let ginkgo = temp.ginkgo();
    run("sub/widgets_test.go")
        .pwd(temp.path())
        .env("GINKGO_LENS_GINKGO", ginkgo.to_str().unwrap())
        .passes()
        .stdout_has("> It subtracts  PASS")
        .stdout_has("2 passed");

    assert!(temp.read("bin/args.txt").trim_end().ends_with("/sub"));
    assert!(!temp.path().join("sub/ginkgo.report").exists());
    assert!(!temp.path().join("sub/sub").exists());
}

/// > --focus passes the escaped key to ginkgo
#[test]
fn focus_is_passed_to_ginkgo() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    widgets_run(&temp)
        .args(&["--focus", "Widgets subtracts"])
        .passes();

    let args = temp.read("bin/args.txt");
    assert!(args.starts_with("--json-report /"), "{args}");
    assert!(args.contains("/ginkgo.report -focus Widgets subtracts -r /"), "{args}");
}

/// > Focusing an unknown key is an argument error
#[test]
fn unknown_focus_key_fails() {
    let temp = Project::widgets();
    widgets_run(&temp)
        .args(&["--focus", "Widgets multiplies"])
        .exits(2)
        .stderr_has("no node with key");
    assert!(!temp.path().join("bin/args.txt").exists());
}

/// > Major version 1 requests a JUnit report
#[test]
fn v1_uses_junit_report_flag() {
    let temp = Project::widgets();
    temp.report(
        r#"<testsuite><testcase name="Widgets subtracts" classname="Widgets"></testcase></testsuite>"#,
    );
    widgets_run(&temp)
        .args(&["--major-version", "1"])
        .passes()
        .stdout_has("> It subtracts  PASS");
    assert!(temp.read("bin/args.txt").starts_with("-reportFile "));
}

/// > --cover requests a coverage profile
#[test]
fn cover_requests_profile() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    widgets_run(&temp).args(&["--cover"]).passes();

    let args = temp.read("bin/args.txt");
    assert!(args.contains("-cover -coverpkg=./... -coverprofile=/"), "{args}");
    assert!(args.contains("/coverage/coverage.out -r /"), "{args}");
    assert!(temp.path().join("coverage").is_dir());
}

/// > A run that writes no report clears running state and shows ginkgo's errors
#[test]
fn run_without_report_clears_state() {
    let temp = Project::widgets();
    temp.exit_code(1);
    widgets_run(&temp)
        .exits(1)
        .stdout_eq("+ Widgets\n  # BeforeEach\n  > It adds two numbers\n  > It subtracts\n0 passed\n")
        .stderr_has("build failed");
}

/// > JSON output includes the correlation summary and the outline
#[test]
fn json_output() {
    let temp = Project::widgets();
    temp.report(PASSING_REPORT);
    let json = widgets_run(&temp).json().passes();

    assert_eq!(json["passed"], true);
    assert_eq!(json["report_found"], true);
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["correlation"]["attached"], 2);
    assert_eq!(json["correlation"]["dropped"], 0);
    let specs = &json["outline"]["nodes"][0]["children"];
    assert_eq!(specs[1]["result"]["passed"], true);
    assert_eq!(specs[1]["running"], false);
}

/// > Results for specs not in the outline are dropped
#[test]
fn foreign_results_are_dropped() {
    let temp = Project::widgets();
    temp.report(
        r#"[{"SuiteDescription":"Other","SpecReports":[{"State":"passed","LeafNodeText":"works","ContainerHierarchyTexts":["Other"]}]}]"#,
    );
    let json = widgets_run(&temp).json().passes();
    assert_eq!(json["correlation"]["attached"], 0);
    assert_eq!(json["correlation"]["dropped"], 1);
}

/// > A file without Ginkgo imports cannot be run
#[test]
fn file_without_ginkgo_imports_fails() {
    let temp = Project::widgets();
    temp.without_ginkgo_imports();
    widgets_run(&temp)
        .exits(2)
        .stderr_has("does not import ginkgo");
}
