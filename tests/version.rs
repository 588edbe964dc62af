//! Integration test: the binary starts, reports its version and rejects bad input

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_crumbtrail"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain version '{}', but got: {}",
        env!("CARGO_PKG_VERSION"),
        stdout
    );
}

#[test]
fn missing_file_fails_without_entering_the_tui() {
    let output = Command::new(env!("CARGO_BIN_EXE_crumbtrail"))
        .arg("/definitely/not/a/real/trail.jsonl")
        .env("CRUMBTRAIL_CONFIG", "/definitely/not/a/real/config.toml")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
