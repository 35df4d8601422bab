//! Web push notification key material.
//!
//! A push server authenticates to browser push services with a P-256
//! ECDSA keypair (VAPID, RFC 8292). Browsers subscribe against the public
//! key; the server signs every push request with the private key.
//!
//! # Key lifetime
//!
//! Keys are generated once and then kept stable. Every subscription is
//! bound to the public key it was created with, so provisioning a new pair
//! invalidates all existing subscriptions.

// Rust guideline compliant 2026-02

pub mod vapid;

pub use vapid::VapidKeys;
