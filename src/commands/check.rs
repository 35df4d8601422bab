//! `check` command: validate the keys in an existing environment file.
//!
//! Confirms that `VAPID_PUBLIC_KEY` and `VAPID_PRIVATE_KEY` are present,
//! well-formed, and belong to the same keypair. Canonical settings that are
//! absent from the file are reported but do not fail the check.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::env_file;
use crate::notifications::VapidKeys;
use crate::template::{CANONICAL_KEYS, PRIVATE_KEY_VAR, PUBLIC_KEY_VAR};

/// Result of inspecting an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The validated public key.
    pub public_key: String,
    /// Canonical settings absent from the file, in template order.
    pub missing: Vec<&'static str>,
}

/// Reads `path` and validates its VAPID keypair.
pub fn inspect(path: &Path) -> Result<Report> {
    let vars: HashMap<String, String> = env_file::read(path)?.into_iter().collect();

    let lookup = |key: &str| {
        vars.get(key)
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{} is missing {}", path.display(), key))
    };
    let public_key = lookup(PUBLIC_KEY_VAR)?;
    let private_key = lookup(PRIVATE_KEY_VAR)?;

    let keys = VapidKeys::from_base64url(public_key, private_key)
        .with_context(|| format!("Invalid VAPID keys in {}", path.display()))?;

    let missing = CANONICAL_KEYS
        .iter()
        .copied()
        .filter(|key| !vars.contains_key(*key))
        .collect();

    Ok(Report {
        public_key: keys.public_key_base64url().to_string(),
        missing,
    })
}

/// Runs the check command, printing the outcome to stdout.
pub fn run(path: &Path) -> Result<()> {
    let report = inspect(path)?;

    println!("VAPID keys in {} are valid.", path.display());
    println!();
    println!("Public Key:");
    println!("{}", report.public_key);

    if !report.missing.is_empty() {
        log::warn!("{} lacks settings: {:?}", path.display(), report.missing);
        println!();
        println!("Missing settings: {}", report.missing.join(", "));
    }

    Ok(())
}
