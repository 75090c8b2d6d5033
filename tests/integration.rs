use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const START: &str = "<!-- docgen-tsdoc-replacer:start -->";
const END: &str = "<!-- docgen-tsdoc-replacer:end -->";

const FOO_FRAGMENT: &str = "### Events\n\n\
- MDCFoo:change when the value changes\n\n\
### MDCFoo\n\n\
Method Signature | Description\n\
--- | ---\n\
doX | Does X \n\
size | Current size \n";

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_tsdoc-readme")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn wrapped(body: &str) -> String {
    format!("{}\n{}\n{}", START, body, END)
}

fn write_readme(packages: &Path, component: &str, content: &str) -> PathBuf {
    let dir = packages.join(component);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("README.md");
    fs::write(&path, content).unwrap();
    path
}

fn run_fixture(packages: &Path) -> assert_cmd::assert::Assert {
    cmd()
        .arg(fixture_path("typedoc.json"))
        .args(["-d", packages.to_str().unwrap()])
        .assert()
}

// -- end to end --

#[test]
fn writes_documented_module_between_markers() {
    let dir = TempDir::new().unwrap();
    let readme = write_readme(dir.path(), "mdc-foo", &wrapped("stale table"));

    run_fixture(dir.path()).success();

    let output = fs::read_to_string(readme).unwrap();
    assert_eq!(output, wrapped(FOO_FRAGMENT));
    assert!(output.contains("### MDCFoo"));
    assert!(!output.contains("### MDCBar"));
    assert!(!output.contains("layout"), "undocumented method should be skipped");
    assert!(!output.contains("root_"), "properties are not listed");
}

#[test]
fn second_run_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let readme = write_readme(dir.path(), "mdc-foo", &wrapped(""));

    run_fixture(dir.path()).success();
    let first = fs::read(&readme).unwrap();
    run_fixture(dir.path()).success();
    let second = fs::read(&readme).unwrap();

    assert_eq!(first, second);
}

#[test]
fn components_outside_filter_are_not_written() {
    let dir = TempDir::new().unwrap();
    write_readme(dir.path(), "mdc-foo", &wrapped(""));
    let shared = write_readme(dir.path(), "shared", &wrapped("keep me"));

    run_fixture(dir.path()).success();

    assert_eq!(fs::read_to_string(shared).unwrap(), wrapped("keep me"));
}

#[test]
fn component_flag_selects_other_family() {
    let dir = TempDir::new().unwrap();
    let foo = write_readme(dir.path(), "mdc-foo", &wrapped("keep me"));
    let shared = write_readme(dir.path(), "shared", &wrapped(""));

    cmd()
        .arg(fixture_path("typedoc.json"))
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["-c", "shared"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(foo).unwrap(), wrapped("keep me"));
    assert!(fs::read_to_string(shared).unwrap().contains("run | Runs \n"));
}

#[test]
fn misplaced_markers_leave_readme_unchanged() {
    let dir = TempDir::new().unwrap();
    let content = format!("# MDC Foo\n\n{}\n", wrapped("old"));
    let readme = write_readme(dir.path(), "mdc-foo", &content);

    run_fixture(dir.path())
        .success()
        .stderr(predicate::str::contains("markers are not the first and last lines"));

    assert_eq!(fs::read_to_string(readme).unwrap(), content);
}

#[test]
fn logs_progress_lines() {
    let dir = TempDir::new().unwrap();
    write_readme(dir.path(), "mdc-foo", &wrapped(""));

    run_fixture(dir.path())
        .success()
        .stderr(predicate::str::contains("-- generating docs for"))
        .stderr(predicate::str::contains("~~ generated"))
        .stderr(predicate::str::contains("mdc-foo/README.md"));
}

// -- per-key failures --

#[test]
fn missing_readme_does_not_stop_other_components() {
    let dir = TempDir::new().unwrap();
    let input = r#"{
        "children": [
            {"name": "\"mdc-absent/index\"", "kind": 1, "children": [{"name": "MDCAbsent", "kind": 128}]},
            {"name": "\"mdc-present/index\"", "kind": 1, "children": [{"name": "MDCPresent", "kind": 128}]}
        ]
    }"#;
    let present = write_readme(dir.path(), "mdc-present", &wrapped(""));

    cmd()
        .arg("-")
        .args(["-d", dir.path().to_str().unwrap()])
        .write_stdin(input)
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to read"));

    let output = fs::read_to_string(present).unwrap();
    assert!(output.contains("### MDCPresent\n"));
    assert!(!dir.path().join("mdc-absent").exists());
}

// -- dry run --

#[test]
fn dry_run_prints_without_writing() {
    let dir = TempDir::new().unwrap();
    let readme = write_readme(dir.path(), "mdc-foo", &wrapped("old"));

    let assert = run_fixture_dry(dir.path())
        .success()
        .stderr(predicate::str::contains("(dry run, not written)"))
        .stderr(predicate::str::contains("~~ generated").not());
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("mdc-foo/README.md <=="));
    assert!(stdout.contains(&wrapped(FOO_FRAGMENT)));
    assert_eq!(fs::read_to_string(readme).unwrap(), wrapped("old"));
}

fn run_fixture_dry(packages: &Path) -> assert_cmd::assert::Assert {
    cmd()
        .arg(fixture_path("typedoc.json"))
        .args(["-d", packages.to_str().unwrap()])
        .arg("--dry-run")
        .assert()
}

// -- input errors --

#[test]
fn invalid_json_fails() {
    cmd()
        .arg("-")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse reflection JSON"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("docs.json").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn no_documented_modules_is_not_an_error() {
    cmd()
        .arg("-")
        .write_stdin(r#"{"children": [{"name": "\"util/index\"", "kind": 1}]}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("no documented MDC* modules found"));
}
