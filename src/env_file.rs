//! Environment file persistence.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed over the target, so a crash mid-write leaves either the old file
//! or the complete new one, never a truncated mix.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::notifications::VapidKeys;
use crate::template::Template;

/// Outcome of a successful [`persist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    /// File that now holds the generated configuration.
    pub path: PathBuf,
    /// Whether a previous file at `path` was replaced.
    pub replaced: bool,
}

/// Writes the canonical template for `keys` to `settings.env_file`.
///
/// Any existing file is replaced wholesale. The caller is expected to have
/// told the operator; this function only logs it.
pub fn persist(keys: &VapidKeys, settings: &Settings) -> Result<Persisted> {
    let template = Template::canonical(keys, settings);
    let contents = format!("{}{}", header(), template.render());

    let path = settings.env_file.clone();
    let replaced = path.exists();
    if replaced {
        log::warn!("Replacing existing environment file {}", path.display());
    }

    write_atomic(&path, &contents)?;
    log::info!("Wrote VAPID keys to {}", path.display());

    Ok(Persisted { path, replaced })
}

fn header() -> String {
    format!(
        "# Generated by vapid-provision on {}\n\
         # Regenerating these keys invalidates every existing push subscription.\n\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Replaces `path` with `contents` via temp file + rename.
///
/// The file is owner read/write only on Unix. On error `path` is untouched
/// and the temporary file is removed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".vapid-provision")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    tmp.write_all(contents.as_bytes())
        .context("Failed to write environment file contents")?;
    tmp.as_file()
        .sync_all()
        .context("Failed to flush environment file to disk")?;

    // Set restrictive permissions (owner read/write only)
    #[cfg(unix)]
    fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
        .context("Failed to set environment file permissions")?;

    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// Reads `KEY=value` pairs from an environment file, in file order.
pub fn read(path: &Path) -> Result<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    iter.map(|item| item.with_context(|| format!("Failed to parse {}", path.display())))
        .collect()
}
