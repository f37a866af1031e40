//! Runs the built binary end to end.

use std::fs;
use std::path::MAIN_SEPARATOR;
use std::process::{Command, Output};
use tempfile::tempdir;

fn quick_du(args: &[&str]) -> Output
{
    Command::new(env!("CARGO_BIN_EXE_quick-du"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .env("CLICOLOR", "0")
        .output()
        .unwrap()
}

#[test]
fn prints_total_tab_and_root()
{
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), vec![0u8; 2048]).unwrap();
    let root = dir.path().to_str().unwrap();

    let output = quick_du(&[root]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("2048\t{}{}\n", root, MAIN_SEPARATOR));
}

#[test]
fn human_readable_flag()
{
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), vec![0u8; 2048]).unwrap();
    let root = dir.path().to_str().unwrap();

    let output = quick_du(&["-h", "-t", "1K", root]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("2.0K\t{}{}\n", root, MAIN_SEPARATOR));
}

#[test]
fn missing_root_exits_nonzero()
{
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let cause = fs::metadata(&missing).unwrap_err();

    let output = quick_du(&[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        format!("Error: cannot access '{}': {}\n", missing.display(), cause)
    );
}

#[test]
fn malformed_threshold_exits_with_usage()
{
    let dir = tempdir().unwrap();

    let output = quick_du(&["-t", "12Q", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid threshold"));
}

#[test]
fn zero_jobs_exits_with_usage()
{
    let dir = tempdir().unwrap();

    let output = quick_du(&["-j", "0", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be at least 1"));
}

#[test]
fn file_root_prints_zero()
{
    let dir = tempdir().unwrap();
    let file = dir.path().join("single");
    fs::write(&file, vec![0u8; 513]).unwrap();
    let root = file.to_str().unwrap();

    let output = quick_du(&[root]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("0\t{}{}\n", root, MAIN_SEPARATOR));
}
