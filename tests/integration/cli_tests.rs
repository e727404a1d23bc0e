//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("Failed to write fixture");
}

const CLEAN_COMPONENT: &str = r#"
import PropTypes from 'prop-types';

export function Banner(props) {
  return <div>{props.message}</div>;
}

Banner.propTypes = {
  message: PropTypes.string.isRequired,
};
"#;

const DIRTY_COMPONENT: &str = r#"
import PropTypes from 'prop-types';

export function Banner(props) {
  return <div>{props.message}</div>;
}

Banner.propTypes = {
  message: PropTypes.string,
  tone: PropTypes.string,
};
"#;

#[test]
fn test_clean_project_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "Banner.jsx", CLEAN_COMPONENT);

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("No prop issues found!"));
}

#[test]
fn test_findings_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "Banner.jsx", DIRTY_COMPONENT);

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("tone"));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "Banner.jsx", DIRTY_COMPONENT);

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"PS002\""))
        .stdout(predicate::str::contains("\"tone\""));
}

#[test]
fn test_json_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "Banner.jsx", DIRTY_COMPONENT);
    let report_path = dir.path().join("report.json");

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&report_path)
        .assert()
        .code(1);

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("\"total_issues\": 1"));
}

#[test]
fn test_no_unused_flag_disables_detector() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "Banner.jsx", DIRTY_COMPONENT);

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .arg("--quiet")
        .arg("--no-unused")
        .assert()
        .success()
        .stdout(predicate::str::contains("No prop issues found!"));
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("propscan")
        .unwrap()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No JavaScript/JSX files found."));
}
