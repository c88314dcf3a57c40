use std::process::Command;

use tempfile::tempdir;

const GEHEN: &str = include_str!("fixtures/flexion_gehen.html");

#[test]
fn cli_writes_csv_with_header_from_saved_page() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("gehen.html");
    let output = dir.path().join("gehen.csv");
    std::fs::write(&input, GEHEN).expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_flexion2csv"))
        .args([
            "extract",
            "gehen",
            "--input",
            &input.to_string_lossy(),
            "--output",
            &output.to_string_lossy(),
            "--format",
            "csv",
            "--header",
        ])
        .status()
        .expect("CLI should run");
    assert_eq!(status.code(), Some(0));

    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("lang,value,tags"));
    assert_eq!(lines.next(), Some("de,gehe,\"1.PERS, PRAESENS\""));
    assert_eq!(csv.lines().count(), 37);
}

#[test]
fn cli_prints_json_to_stdout() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("gehen.html");
    std::fs::write(&input, GEHEN).expect("fixture should be written");

    let output = Command::new(env!("CARGO_BIN_EXE_flexion2csv"))
        .args(["extract", "gehen", "--input", &input.to_string_lossy()])
        .output()
        .expect("CLI should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    let records: Vec<serde_json::Value> = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(records.len(), 36);
    assert_eq!(records[35]["tags"][1], "FUTURII");
}

#[test]
fn cli_exits_with_code_2_when_verb_is_missing() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("other.html");
    std::fs::write(&input, "<html><body>Flexion:laufen</body></html>")
        .expect("fixture should be written");

    let output = Command::new(env!("CARGO_BIN_EXE_flexion2csv"))
        .args(["extract", "gehen", "--input", &input.to_string_lossy()])
        .output()
        .expect("CLI should run");

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[]");
}

#[test]
fn cli_rejects_unknown_format() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("gehen.html");
    std::fs::write(&input, GEHEN).expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_flexion2csv"))
        .args([
            "extract",
            "gehen",
            "--input",
            &input.to_string_lossy(),
            "--format",
            "xml",
        ])
        .status()
        .expect("CLI should run");
    assert_eq!(status.code(), Some(1));
}
