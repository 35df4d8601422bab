//! Provisioning settings.
//!
//! Defaults reproduce the zero-argument behaviour. Environment variables
//! override the defaults, and CLI flags override both (applied in `main`).

use std::ffi::OsString;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ENV_FILE, DEFAULT_PORT, DEFAULT_SUBJECT, ENV_FILE_VAR, PORT_VAR, SUBJECT_VAR,
};

/// Settings for one provisioning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Environment file written in persist mode.
    pub env_file: PathBuf,
    /// VAPID subject (`mailto:` or `https:` contact).
    pub subject: String,
    /// Server port written to the environment file.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            subject: DEFAULT_SUBJECT.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Loads defaults with environment variable overrides applied.
    pub fn load() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|name| std::env::var_os(name));
        settings
    }

    /// Applies overrides from `var`, which looks up a variable by name.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<OsString>) {
        if let Some(env_file) = var(ENV_FILE_VAR) {
            if !env_file.is_empty() {
                self.env_file = PathBuf::from(env_file);
            }
        }

        if let Some(subject) = var(SUBJECT_VAR) {
            match subject.into_string() {
                Ok(subject) if subject.is_empty() => {}
                Ok(subject) => self.subject = subject,
                Err(raw) => log::warn!("Ignoring {}={:?}: not valid UTF-8", SUBJECT_VAR, raw),
            }
        }

        if let Some(port) = var(PORT_VAR) {
            match port.to_str().map(str::parse::<u16>) {
                Some(Ok(port)) => self.port = port,
                _ => log::warn!("Ignoring {}={:?}: not a valid port", PORT_VAR, port),
            }
        }
    }

    /// Checks values the push server would otherwise reject at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.subject.starts_with("mailto:") || self.subject.starts_with("https:"),
            "VAPID subject must be a mailto: or https: URI, got {:?}",
            self.subject
        );
        anyhow::ensure!(self.port != 0, "Server port must be non-zero");
        Ok(())
    }
}
