//! Application-wide constants for vapid-provision.
//!
//! Centralizes the defaults baked into the generated environment file and
//! the names of the variables this tool reads for its own configuration.
//!
//! # Categories
//!
//! - **Output**: Where the environment file goes by default
//! - **Server defaults**: Values written verbatim next to the generated keys
//! - **Overrides**: Environment variables read by [`crate::config::Settings`]

// ============================================================================
// Output
// ============================================================================

/// Default environment file written in persist mode, relative to the
/// current working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

// ============================================================================
// Server defaults
// ============================================================================

/// `NODE_ENV` for the push server.
pub const DEFAULT_NODE_ENV: &str = "production";

/// HTTP port the push server listens on.
pub const DEFAULT_PORT: u16 = 3089;

/// VAPID `sub` claim (RFC 8292 §2.1).
///
/// Push services use this contact to reach the operator. It must be a
/// `mailto:` or `https:` URI.
pub const DEFAULT_SUBJECT: &str = "mailto:admin@example.com";

/// Log level for the push server.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Hours between sweeps of expired subscriptions.
pub const DEFAULT_CLEANUP_INTERVAL_HOURS: u32 = 24;

/// Days a subscription backup is kept before rotation.
pub const DEFAULT_BACKUP_RETENTION_DAYS: u32 = 30;

/// Maximum push subscriptions a single user may register.
pub const DEFAULT_MAX_SUBSCRIPTIONS_PER_USER: u32 = 5;

/// Per-user rate limit for outgoing notifications.
pub const DEFAULT_MAX_NOTIFICATIONS_PER_MINUTE: u32 = 10;

/// `TTL` header sent with each push message (24 hours).
pub const DEFAULT_NOTIFICATION_TTL_SECONDS: u32 = 86_400;

// ============================================================================
// Overrides
// ============================================================================

/// Overrides the destination of the environment file.
pub const ENV_FILE_VAR: &str = "VAPID_PROVISION_ENV_FILE";

/// Overrides the VAPID subject written to the environment file.
pub const SUBJECT_VAR: &str = "VAPID_PROVISION_SUBJECT";

/// Overrides the server port written to the environment file.
pub const PORT_VAR: &str = "VAPID_PROVISION_PORT";
