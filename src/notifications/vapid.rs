//! VAPID key generation for Web Push (RFC 8292).
//!
//! Generates P-256 ECDSA keypairs in the encoding push libraries expect:
//! the raw 32-byte scalar for the private key and the uncompressed SEC1
//! point for the public key, both base64url without padding.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use p256::ecdsa::SigningKey;
use p256::elliptic_curve::rand_core::{CryptoRng, OsRng, RngCore};
use p256::FieldBytes;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Draws before giving up on an RNG that only yields invalid scalars.
///
/// A healthy CSPRNG produces an out-of-range scalar with probability
/// about 2^-32 per draw, so repeated rejections mean the source is broken.
const MAX_SCALAR_ATTEMPTS: usize = 8;

/// VAPID keypair for web push authentication.
///
/// The private key is stored as the raw 32-byte scalar (base64url) because
/// `web-push` style libraries (`VapidSignatureBuilder::from_base64()`)
/// expect exactly that. The public key is the uncompressed SEC1 point
/// (65 bytes), which browsers take as `applicationServerKey`.
///
/// Deserialization goes through [`VapidKeys::from_base64url`], so a record
/// read back from JSON is always a matching pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase", try_from = "RawVapidKeys")]
pub struct VapidKeys {
    /// Uncompressed public key bytes (base64url, 65 bytes decoded).
    public_key: String,
    /// Raw 32-byte P-256 private key scalar (base64url).
    private_key: String,
}

/// Unvalidated wire form of [`VapidKeys`].
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
struct RawVapidKeys {
    public_key: String,
    private_key: String,
}

impl TryFrom<RawVapidKeys> for VapidKeys {
    type Error = anyhow::Error;

    fn try_from(raw: RawVapidKeys) -> Result<Self> {
        Self::from_base64url(&raw.public_key, &raw.private_key)
    }
}

impl std::fmt::Debug for VapidKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidKeys")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl VapidKeys {
    /// Generate a fresh VAPID keypair from the OS entropy source.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a fresh VAPID keypair from `rng`.
    ///
    /// Entropy failures are reported instead of panicking, so the caller can
    /// abort before anything is written.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let signing_key = random_signing_key(rng).context("VAPID key generation failed")?;
        Ok(Self::from_signing_key(&signing_key))
    }

    fn from_signing_key(signing_key: &SigningKey) -> Self {
        // SEC1 uncompressed public key (65 bytes: 0x04 || x || y)
        let public_bytes = signing_key.verifying_key().to_encoded_point(false);
        let scalar = Zeroizing::new(signing_key.to_bytes());

        Self {
            public_key: BASE64URL.encode(public_bytes.as_bytes()),
            private_key: BASE64URL.encode(scalar.as_slice()),
        }
    }

    /// Base64url-encoded uncompressed public key (65 bytes decoded).
    pub fn public_key_base64url(&self) -> &str {
        &self.public_key
    }

    /// Base64url-encoded raw 32-byte private key scalar.
    ///
    /// Server-side only. Never hand this to a browser.
    pub fn private_key_base64url(&self) -> &str {
        &self.private_key
    }

    /// Reconstruct from base64url-encoded strings, e.g. read back from an
    /// environment file.
    ///
    /// Validates the public key format, the private key scalar, and that the
    /// public key really belongs to the private key.
    pub fn from_base64url(public_key_b64: &str, private_key_b64: &str) -> Result<Self> {
        let pub_bytes = BASE64URL
            .decode(public_key_b64)
            .context("Invalid base64url for VAPID public key")?;
        anyhow::ensure!(
            pub_bytes.len() == 65 && pub_bytes[0] == 0x04,
            "VAPID public key must be 65-byte uncompressed P-256 point"
        );

        let priv_bytes = Zeroizing::new(
            BASE64URL
                .decode(private_key_b64)
                .context("Invalid base64url for VAPID private key")?,
        );
        anyhow::ensure!(
            priv_bytes.len() == 32,
            "VAPID private key must be 32-byte P-256 scalar, got {} bytes",
            priv_bytes.len()
        );
        let signing_key = SigningKey::from_bytes(FieldBytes::from_slice(&priv_bytes))
            .context("VAPID private key is not a valid P-256 scalar")?;

        let derived = Self::from_signing_key(&signing_key);
        anyhow::ensure!(
            derived.public_key_bytes()? == pub_bytes,
            "VAPID public key does not match the private key"
        );

        Ok(derived)
    }

    /// Uncompressed public key bytes (65 bytes).
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        BASE64URL
            .decode(&self.public_key)
            .context("Failed to decode VAPID public key")
    }
}

/// Draw a uniformly random non-zero scalar below the curve order.
fn random_signing_key<R: RngCore + CryptoRng>(rng: &mut R) -> Result<SigningKey> {
    let mut bytes = Zeroizing::new(FieldBytes::default());
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        rng.try_fill_bytes(bytes.as_mut_slice())
            .context("Entropy source failed")?;
        if let Ok(signing_key) = SigningKey::from_bytes(&bytes) {
            return Ok(signing_key);
        }
        log::debug!("Rejected out-of-range P-256 scalar, drawing again");
    }
    anyhow::bail!(
        "Entropy source produced {} invalid P-256 scalars in a row",
        MAX_SCALAR_ATTEMPTS
    )
}
