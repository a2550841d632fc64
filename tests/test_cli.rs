use assert_cmd::Command;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("files")
        .join(name)
}

fn symtab() -> Command {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    command
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("SYMTAB_LOG");
    command
}

#[test]
fn test_clean_listing() {
    symtab().arg(fixture("clean.sym")).assert().success();
}

#[test]
fn test_summary() {
    let output = symtab()
        .arg(fixture("clean.sym"))
        .arg("--summary")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "limit: int (1 uses)",
            "greeting: str (1 uses)",
            "either: int_or_str (1 uses)",
            "max: fn(2) -> int (1 uses)",
        ]
    );
}

#[test]
fn test_semantic_errors() {
    let output = symtab().arg(fixture("duplicate.sym")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    println!("STDERR: {stderr}");
    assert!(stderr.contains(
        "Error 2:5 (at \"foo\"):: duplicate declaration of `foo` (first declared on line 1)"
    ));
    assert!(
        stderr.contains("Error 4:5 (at \"missing\"):: use of undeclared identifier `missing`")
    );
}

#[test]
fn test_syntax_error() {
    let output = symtab().arg(fixture("bad_syntax.sym")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "Error 2:9 (at \"\\\"five\\\"\"):: cannot initialize `int` with a string literal"
    ));
}

#[test]
fn test_missing_file() {
    symtab().arg(fixture("does_not_exist.sym")).assert().failure();
}

#[test]
fn test_quiet_by_default() {
    let output = symtab().arg(fixture("duplicate.sym")).output().unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("rejected duplicate entry"));
}

#[test]
fn test_log_flag() {
    let output = symtab()
        .arg(fixture("duplicate.sym"))
        .args(["--log", "symtab=trace"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    println!("STDERR: {stderr}");
    assert!(stderr.contains("added entry"));
    assert!(stderr.contains("rejected duplicate entry"));
}

#[test]
fn test_log_env_var() {
    let output = symtab()
        .arg(fixture("duplicate.sym"))
        .env("SYMTAB_LOG", "debug")
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    println!("STDERR: {stderr}");
    assert!(stderr.contains("rejected duplicate entry"));
    assert!(!stderr.contains("added entry"));
}

#[test]
fn test_log_flag_overrides_env_var() {
    let output = symtab()
        .arg(fixture("duplicate.sym"))
        .env("SYMTAB_LOG", "trace")
        .args(["--log", "warn"])
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("rejected duplicate entry"));
}

#[test]
fn test_invalid_log_directive() {
    symtab()
        .arg(fixture("clean.sym"))
        .args(["--log", "symtab=loudest"])
        .assert()
        .failure();
}
