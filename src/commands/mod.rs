//! CLI subcommand implementations for vapid-provision.
//!
//! - [`generate`] - Create a keypair, print it, optionally write the environment file
//! - [`check`] - Validate the keypair in an existing environment file
//!
//! # Usage
//!
//! ```ignore
//! use vapid_provision::{commands, Settings};
//!
//! commands::generate::run(&Settings::load(), commands::generate::Options::default())?;
//! commands::check::run(std::path::Path::new(".env"))?;
//! ```

pub mod check;
pub mod generate;
