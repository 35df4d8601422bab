//! `generate` command: create a VAPID keypair.
//!
//! # Examples
//!
//! ```bash
//! # Print keys and a suggested environment block (no files written)
//! vapid-provision
//!
//! # Replace ./.env with the canonical template and fresh keys
//! vapid-provision generate --write
//!
//! # Machine-readable output
//! vapid-provision generate --json
//! ```

use anyhow::Result;
use p256::elliptic_curve::rand_core::OsRng;

use crate::config::Settings;
use crate::notifications::VapidKeys;
use crate::provision::{provision, Mode};

/// Options for the generate command that are not part of [`Settings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Persist to the environment file instead of only printing.
    pub write: bool,
    /// Print the keypair as JSON. Never writes files.
    pub json: bool,
}

/// Runs the generate command against stdout.
pub fn run(settings: &Settings, options: Options) -> Result<()> {
    anyhow::ensure!(
        !(options.write && options.json),
        "--json prints keys only and cannot be combined with --write"
    );
    settings.validate()?;

    if options.json {
        let keys = VapidKeys::generate()?;
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    let mode = Mode::from_persist_flag(options.write);
    let stdout = std::io::stdout();
    provision(&mut OsRng, mode, settings, &mut stdout.lock())?;
    Ok(())
}
