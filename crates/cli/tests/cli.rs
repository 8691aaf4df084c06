//! End-to-end tests for the `guess` binary.
//!
//! Every run pins the zones, skips DNS and disables color so output does not
//! depend on the machine it runs on.
//!
//! Run with: cargo test -p guess-cli --test cli

use std::process::{Command, Output};

fn guess(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_guess"))
        .args(["--no-dns", "--no-color", "--timezones", "UTC", "--local-zone", "UTC"])
        .args(args)
        .env_remove("GUESS_TIMEZONES")
        .env_remove("GUESS_LOCAL_ZONE")
        .env_remove("GUESS_UNLIKELY")
        .output()
        .expect("failed to run guess")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_integer_shows_byte_count() {
    let output = guess(&["1443346122"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("1443346122 bytes"), "{out}");
    assert!(out.contains("    1.3 GiB (1.4 GB)"), "{out}");
}

#[test]
fn test_unlikely_shows_old_timestamp() {
    let output = guess(&["--unlikely", "1443346122"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(
        out.contains("Timestamp 1443346122 is 2015-09-27 09:28:42 +0000 UTC"),
        "{out}"
    );
}

#[test]
fn test_scores_header() {
    let output = guess(&["--scores", "8TiB"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(
        out.starts_with("[goodness: 100, source: byte count with explicit unit]\n8796093022208 bytes\n"),
        "{out}"
    );
}

#[test]
fn test_unclassifiable_exits_with_failure() {
    let output = guess(&["hello"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Could not guess anything."));
}

#[test]
fn test_unknown_zone_is_a_config_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_guess"))
        .args(["--no-dns", "--timezones", "UTC,Atlantis/Capital", "1443346122"])
        .output()
        .expect("failed to run guess");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown time zone: Atlantis/Capital"));
}

#[test]
fn test_empty_input_prints_usage() {
    let output = guess(&["   "]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage: guess"));
}

#[test]
fn test_ip_without_dns() {
    let output = guess(&["127.0.0.1"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("IP address 127.0.0.1"), "{out}");
    assert!(out.contains("(address does not resolve to a host name)"), "{out}");
}

#[test]
fn test_zoned_date() {
    let output = guess(&["2015-09-27T09:28:42+02:00"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2015-09-27 09:28:42 +0200"));
}

#[test]
fn test_json_output() {
    let output = guess(&["--json", "8TiB"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let first = &json["guesses"][0];
    assert_eq!(first["source"], "byte count with explicit unit");
    assert_eq!(first["goodness"], 100);
    assert_eq!(first["value"]["type"], "Bytes");
    assert_eq!(first["value"]["value"], 8_796_093_022_208_u64);
}

#[test]
fn test_fallback_note_when_nothing_is_likely() {
    // Far too small for any unit, far too old for any timestamp.
    let output = guess(&["5"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("no good guesses, showing unlikely ones\n"), "{out}");
    assert!(out.contains("5 bytes"));
}
