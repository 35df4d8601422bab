//! vapid-provision - VAPID key bootstrap for web push servers.
//!
//! Generates a P-256 ECDSA keypair for Voluntary Application Server
//! Identification (RFC 8292) and emits it either as console output or as a
//! complete environment file for the push server.
//!
//! # Modules
//!
//! - [`notifications`] - VAPID keypair generation and validation
//! - [`template`] - Canonical environment template and its renderer
//! - [`env_file`] - Atomic environment file writes and parsing
//! - [`provision`] - The generate-then-report operation
//! - [`commands`] - CLI subcommands
//! - [`config`] - Settings with environment overrides

pub mod commands;
pub mod config;
pub mod constants;
pub mod env_file;
pub mod notifications;
pub mod provision;
pub mod template;

// Re-export commonly used types
pub use config::Settings;
pub use notifications::VapidKeys;
pub use provision::{provision, Mode};
pub use template::Template;
