use std::io::Write;
use std::process::{Command, Output, Stdio};

const GOOD_KEY: &str = "00101108097098101114101";

fn run_keycheck(input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_keycheck-rs"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn keycheck-rs");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("failed to write key");

    child.wait_with_output().expect("failed to wait on keycheck-rs")
}

#[test]
fn test_good_key_accepted() {
    let output = run_keycheck(format!("{GOOD_KEY}\n").as_bytes());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Please enter key: Good job.\n");
}

#[test]
fn test_good_key_without_newline_accepted() {
    let output = run_keycheck(GOOD_KEY.as_bytes());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Please enter key: Good job.\n");
}

#[test]
fn test_altered_digit_rejected() {
    let output = run_keycheck(b"00101108097098101114102\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(output.stdout, b"Please enter key: Nope.\n");
}

#[test]
fn test_missing_prefix_rejected() {
    let output = run_keycheck(b"10101108097098101114101\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(output.stdout, b"Please enter key: Nope.\n");
}

#[test]
fn test_empty_input_rejected() {
    let output = run_keycheck(b"");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(output.stdout, b"Please enter key: Nope.\n");
}

#[test]
fn test_short_keys_rejected() {
    for key in ["0\n", "00\n", "0010\n"] {
        let output = run_keycheck(key.as_bytes());
        assert_eq!(output.status.code(), Some(1), "key {key:?} should be rejected");
        assert_eq!(output.stdout, b"Please enter key: Nope.\n");
    }
}

#[test]
fn test_leading_whitespace_skipped() {
    let output = run_keycheck(format!(" \t\n{GOOD_KEY}\n").as_bytes());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Please enter key: Good job.\n");
}

#[test]
fn test_overlong_token_truncated_to_key() {
    let output = run_keycheck(format!("{GOOD_KEY}junk\n").as_bytes());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Please enter key: Good job.\n");
}

#[test]
fn test_repeat_runs_agree() {
    for _ in 0..3 {
        let output = run_keycheck(format!("{GOOD_KEY}\n").as_bytes());
        assert_eq!(output.status.code(), Some(0));
    }
}

#[test]
fn test_keygen_emits_good_key() {
    let output = Command::new(env!("CARGO_BIN_EXE_keygen"))
        .output()
        .expect("failed to run keygen");
    assert!(output.status.success());
    assert_eq!(output.stdout, format!("{GOOD_KEY}\n").as_bytes());
}

#[test]
fn test_keygen_output_passes_keycheck() {
    let generated = Command::new(env!("CARGO_BIN_EXE_keygen"))
        .output()
        .expect("failed to run keygen");
    let output = run_keycheck(&generated.stdout);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"Please enter key: Good job.\n");
}
