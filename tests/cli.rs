use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_filter(exe: &str, args: &[&str], stdin: &[u8]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(exe)
        .args(args)
        .env("CGIT_FILTER_CONFIG", dir.path().join("settings.toml"))
        .env("CGIT_REPO_URL", "cgit.git")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_source_filter_plain_fallback() {
    let output = run_filter(env!("CARGO_BIN_EXE_syntax-highlighting"), &["main.unknownext"], b"hello world");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<style>\n@media (prefers-color-scheme: dark) {\n"));
    assert!(stdout.ends_with("</style>\nhello world"));
}

#[test]
fn test_source_filter_shebang() {
    let output = run_filter(env!("CARGO_BIN_EXE_syntax-highlighting"), &["script"], b"#!/bin/sh\necho hi\n");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("<span class=\"hl-"));
}

#[test]
fn test_source_filter_without_filename_still_succeeds() {
    let output = run_filter(env!("CARGO_BIN_EXE_syntax-highlighting"), &[], b"a < b");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("</style>\na &lt; b"));
}

#[test]
fn test_email_filter() {
    let output = run_filter(env!("CARGO_BIN_EXE_email-gravatar"), &["<Dev@Example.org>", "log"], b"Dev\n");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<img src='//www.gravatar.com/avatar/"));
    assert!(stdout.ends_with("alt='Gravatar' /> Dev\n"));
}
