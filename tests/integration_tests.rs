#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    fs,
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

fn commonmer_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_commonmer"))
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn cli_help_flag() {
    let output = commonmer_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("commonmer"));
    assert!(stdout.contains("--kmer-length"));
}

#[test]
fn cli_version_flag() {
    let output = commonmer_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_no_sources() {
    let output = commonmer_cmd().output().expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no sequence sources"));
}

#[test]
fn cli_invalid_k() {
    let output = commonmer_cmd()
        .args(["-k", "0"])
        .arg(fixture_path("scenario_a_1.fna"))
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 1"));
}

#[test]
fn cli_writes_tsv_to_stdout() {
    let output = commonmer_cmd()
        .arg("--quiet")
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("scenario_a_2.fna"))
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "kmer\tfrequency\nAAAAAAAAAAA\t2\n"
    );
}

#[test]
fn cli_header_only_when_nothing_is_shared() {
    let output = commonmer_cmd()
        .args(["-k", "4", "--quiet"])
        .arg(fixture_path("acgt_repeat.fna"))
        .arg(fixture_path("poly_t.fna"))
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "kmer\tfrequency\n");
}

#[test]
fn cli_unreadable_source_fails() {
    let output = commonmer_cmd()
        .arg("--quiet")
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("does_not_exist.fna"))
        .output()
        .expect("Failed to execute");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing is written on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does_not_exist.fna"));
}

#[test]
fn cli_skip_unreadable() {
    let output = commonmer_cmd()
        .args(["--quiet", "--skip-unreadable"])
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("does_not_exist.fna"))
        .arg(fixture_path("scenario_a_2.fna"))
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "kmer\tfrequency\nAAAAAAAAAAA\t2\n"
    );
}

#[test]
fn cli_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("common.tsv");

    let output = commonmer_cmd()
        .arg("--quiet")
        .arg("-o")
        .arg(&path)
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("scenario_a_2.fna"))
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "kmer\tfrequency\nAAAAAAAAAAA\t2\n"
    );
}

#[test]
fn cli_directory_sources() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.fna"), "AAAAAAAAAAAC\n").unwrap();
    fs::write(dir.path().join("b.fna"), "AAAAAAAAAAAG\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "TTTTTTTTTTTT\n").unwrap();

    let output = commonmer_cmd()
        .arg("--quiet")
        .arg("--dir")
        .arg(dir.path())
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "kmer\tfrequency\nAAAAAAAAAAA\t2\n"
    );
}

#[test]
fn cli_json_format() {
    let output = commonmer_cmd()
        .args(["--quiet", "--format", "json"])
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("scenario_a_2.fna"))
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["kmer"], "AAAAAAAAAAA");
    assert_eq!(parsed[0]["frequency"], 2);
}

#[test]
fn cli_reads_stdin_source() {
    let mut child = commonmer_cmd()
        .arg("--quiet")
        .arg(fixture_path("scenario_a_1.fna"))
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"aaaaaaaaaaag\n")
        .expect("Failed to write to stdin");

    let output = child.wait_with_output().expect("Failed to wait");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "kmer\tfrequency\nAAAAAAAAAAA\t2\n"
    );
}

#[test]
fn cli_summary_goes_to_stderr() {
    let output = commonmer_cmd()
        .arg(fixture_path("scenario_a_1.fna"))
        .arg(fixture_path("scenario_a_2.fna"))
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("common k-mers"));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("kmer\tfrequency\n"));
}
