//! Binary-level checks: exit codes and output artifacts.

use assert_cmd::Command;
use predicates::prelude::*;

const REQUEST: &str = r#"{
    "title": "Monthly",
    "periodStart": "2025-01-01",
    "periodEnd": "2025-06-30",
    "summary": {"Total": "120", "Active": "95"},
    "detailRows": [
        {"Name": "Luna", "Status": "Adopted"},
        {"Name": "Rex", "Status": "Pending"}
    ],
    "distribution": [
        {"label": "Dog", "count": "70"},
        {"label": "Cat", "count": 50}
    ]
}"#;

fn statdoc() -> Command {
    Command::cargo_bin("statdoc").unwrap()
}

#[test]
fn generate_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let out = dir.path().join("report.pdf");
    std::fs::write(&input, REQUEST).unwrap();

    statdoc()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--variant")
        .arg("general")
        .assert()
        .success()
        .stderr(predicate::str::contains("generate: wrote"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn rejections_variant_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let out = dir.path().join("rejections.pdf");
    std::fs::write(&input, REQUEST).unwrap();

    statdoc()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--variant")
        .arg("rejections")
        .arg("--title")
        .arg("Rejection Reasons")
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn malformed_json_maps_to_input_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::write(&input, "{not json").unwrap();

    statdoc()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("report.pdf"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid request"));
}

#[test]
fn missing_input_maps_to_io_exit_code() {
    let dir = tempfile::tempdir().unwrap();

    statdoc()
        .arg("generate")
        .arg("--input")
        .arg(dir.path().join("nope.json"))
        .arg("--out")
        .arg(dir.path().join("report.pdf"))
        .assert()
        .code(4);
}

#[test]
fn quiet_suppresses_the_success_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::write(&input, REQUEST).unwrap();

    statdoc()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("report.pdf"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("generate: wrote").not());
}
