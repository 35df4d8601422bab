// Integration tests for CLI commands
// Run with: cargo test --test cli_commands_test

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in `dir` with override env vars cleared.
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vapid-provision"))
        .args(args)
        .current_dir(dir)
        .env_remove("VAPID_PROVISION_ENV_FILE")
        .env_remove("VAPID_PROVISION_SUBJECT")
        .env_remove("VAPID_PROVISION_PORT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute vapid-provision")
}

/// Parse `KEY=value` lines, skipping comments and blanks.
fn parse_env(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn value<'a>(pairs: &'a [(String, String)], key: &str) -> &'a str {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("{key} missing"))
}

fn is_base64url(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

const CANONICAL_KEYS: [&str; 11] = [
    "NODE_ENV",
    "PORT",
    "VAPID_PUBLIC_KEY",
    "VAPID_PRIVATE_KEY",
    "VAPID_SUBJECT",
    "LOG_LEVEL",
    "CLEANUP_INTERVAL_HOURS",
    "BACKUP_RETENTION_DAYS",
    "MAX_SUBSCRIPTIONS_PER_USER",
    "MAX_NOTIFICATIONS_PER_MINUTE",
    "NOTIFICATION_TTL_SECONDS",
];

/// No arguments: print keys, write nothing
#[test]
fn test_no_arguments_prints_without_writing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(temp_dir.path(), &[]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Public Key:"));
    assert!(stdout.contains("Private Key:"));
    assert!(stdout.contains("VAPID_PUBLIC_KEY="));
    assert!(stdout.contains("PORT=3089"));
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).unwrap().count(),
        0,
        "Print-only mode must not touch the filesystem"
    );
}

/// --write in an empty directory creates .env
#[test]
fn test_write_creates_env_file() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(temp_dir.path(), &["generate", "--write"]);

    assert!(output.status.success(), "Command should succeed");
    let contents = std::fs::read_to_string(temp_dir.path().join(".env")).unwrap();
    let pairs = parse_env(&contents);

    let public_key = value(&pairs, "VAPID_PUBLIC_KEY");
    let private_key = value(&pairs, "VAPID_PRIVATE_KEY");
    assert!(public_key.len() >= 44 && is_base64url(public_key));
    assert!(private_key.len() >= 43 && is_base64url(private_key));
    assert_ne!(public_key, private_key);
    assert_eq!(value(&pairs, "PORT"), "3089");
    assert_eq!(value(&pairs, "MAX_SUBSCRIPTIONS_PER_USER"), "5");

    // Printed keys match the persisted ones
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(public_key));
}

/// --write over an existing file leaves exactly the canonical template
#[test]
fn test_write_replaces_existing_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join(".env");
    std::fs::write(&env_path, "PORT=1\nVAPID_PUBLIC_KEY=stale\nEXTRA=1\n").unwrap();

    let output = run_in(temp_dir.path(), &["generate", "--write"]);

    assert!(output.status.success(), "Command should succeed");
    let pairs = parse_env(&std::fs::read_to_string(&env_path).unwrap());
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, CANONICAL_KEYS);
    assert_ne!(value(&pairs, "VAPID_PUBLIC_KEY"), "stale");
    assert_eq!(value(&pairs, "PORT"), "3089");
    assert_eq!(value(&pairs, "NODE_ENV"), "production");
    assert_eq!(value(&pairs, "NOTIFICATION_TTL_SECONDS"), "86400");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Replacing existing"));
}

/// Two runs never reuse a keypair
#[test]
fn test_consecutive_runs_generate_different_keys() {
    let temp_dir = TempDir::new().unwrap();

    let first = run_in(temp_dir.path(), &["generate", "--json"]);
    let second = run_in(temp_dir.path(), &["generate", "--json"]);

    assert!(first.status.success() && second.status.success());
    let first: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&second.stdout).unwrap();
    assert!(first["publicKey"].as_str().is_some());
    assert_ne!(first["publicKey"], second["publicKey"]);
    assert_ne!(first["privateKey"], second["privateKey"]);
}

/// Flags flow into the written file
#[test]
fn test_write_honours_flags() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(
        temp_dir.path(),
        &[
            "generate",
            "--write",
            "--env-file",
            "push.env",
            "--port",
            "8080",
            "--subject",
            "mailto:ops@example.org",
        ],
    );

    assert!(output.status.success(), "Command should succeed");
    assert!(!temp_dir.path().join(".env").exists());
    let pairs = parse_env(&std::fs::read_to_string(temp_dir.path().join("push.env")).unwrap());
    assert_eq!(value(&pairs, "PORT"), "8080");
    assert_eq!(value(&pairs, "VAPID_SUBJECT"), "mailto:ops@example.org");
}

/// Writing into a missing directory exits 1 with an error on stderr and writes nothing
#[test]
fn test_write_into_missing_dir_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(
        temp_dir.path(),
        &["generate", "--write", "--env-file", "missing-dir/.env"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "stderr: {stderr}");
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

/// Invalid subject is rejected before any key is generated
#[test]
fn test_invalid_subject_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_in(
        temp_dir.path(),
        &["generate", "--write", "--subject", "admin@example.com"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join(".env").exists());
}

/// check accepts a file written by --write
#[test]
fn test_check_accepts_written_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(run_in(temp_dir.path(), &["generate", "--write"]).status.success());

    let output = run_in(temp_dir.path(), &["check"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("are valid"));
    assert!(!stdout.contains("Missing settings"));
}

/// check rejects a tampered public key
#[test]
fn test_check_rejects_tampered_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(run_in(temp_dir.path(), &["generate", "--write"]).status.success());
    let env_path = temp_dir.path().join(".env");
    let contents = std::fs::read_to_string(&env_path).unwrap();
    let pairs = parse_env(&contents);
    let public_key = value(&pairs, "VAPID_PUBLIC_KEY").to_string();

    // Swap in a different valid public key
    let other = run_in(temp_dir.path(), &["generate", "--json"]);
    let other: serde_json::Value = serde_json::from_slice(&other.stdout).unwrap();
    let tampered = contents.replace(&public_key, other["publicKey"].as_str().unwrap());
    std::fs::write(&env_path, tampered).unwrap();

    let output = run_in(temp_dir.path(), &["check"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not match"), "stderr: {stderr}");
}
