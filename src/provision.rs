//! Key provisioning: generate one VAPID keypair and report it.
//!
//! Generation is pure; the only side effects are the lines written to
//! `out` and, in [`Mode::Persist`], the environment file. Generation
//! happens before any file is touched, so a failure leaves disk untouched.

use anyhow::Result;
use p256::elliptic_curve::rand_core::{CryptoRng, RngCore};
use std::io::Write;

use crate::config::Settings;
use crate::env_file;
use crate::notifications::VapidKeys;
use crate::template::Template;

/// What to do with a freshly generated keypair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the keys and a suggested environment block. Writes no files.
    PrintOnly,
    /// Print the keys and replace the environment file with the template.
    Persist,
}

impl Mode {
    /// Maps the `--write` flag onto a mode.
    pub fn from_persist_flag(persist: bool) -> Self {
        if persist {
            Self::Persist
        } else {
            Self::PrintOnly
        }
    }
}

/// Generates a keypair from `rng` and reports it to `out` according to `mode`.
pub fn provision<R, W>(rng: &mut R, mode: Mode, settings: &Settings, out: &mut W) -> Result<VapidKeys>
where
    R: RngCore + CryptoRng,
    W: Write,
{
    writeln!(out, "Generating VAPID keys...")?;
    let keys = VapidKeys::generate_with(rng)?;
    log::info!("Generated VAPID keypair ({:?})", mode);

    writeln!(out)?;
    writeln!(out, "Public Key:")?;
    writeln!(out, "{}", keys.public_key_base64url())?;
    writeln!(out)?;
    writeln!(out, "Private Key:")?;
    writeln!(out, "{}", keys.private_key_base64url())?;
    writeln!(out)?;

    match mode {
        Mode::PrintOnly => {
            writeln!(out, "Add the following to your environment file:")?;
            writeln!(out)?;
            write!(out, "{}", Template::canonical(&keys, settings).render())?;
        }
        Mode::Persist => {
            if settings.env_file.exists() {
                writeln!(
                    out,
                    "Replacing existing {} (previous contents will be discarded)",
                    settings.env_file.display()
                )?;
            }
            let persisted = env_file::persist(&keys, settings)?;
            if persisted.replaced {
                writeln!(out, "Wrote {}", persisted.path.display())?;
            } else {
                writeln!(out, "Created {}", persisted.path.display())?;
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Keep VAPID_PRIVATE_KEY secret. Regenerating keys invalidates all existing push subscriptions."
    )?;

    Ok(keys)
}
