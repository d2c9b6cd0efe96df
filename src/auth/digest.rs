//! Credential digesting.
//!
//! A deliberately minimal scheme: one fixed application-wide salt, a
//! single SHA-256 round, lowercase hex output. Same secret + same salt
//! always yields the same digest; no reversal operation exists. Kept
//! compatible with existing stored digests rather than hardened (no
//! per-user salt, no iteration count).

use sha2::{Digest, Sha256};

/// Derive the storable digest of a plaintext secret.
pub fn digest_secret(secret: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a plaintext secret against a stored digest.
///
/// Exact-match comparison; timing-safety is explicitly not a design
/// goal here.
pub fn verify_secret(secret: &str, salt: &str, stored_digest: &str) -> bool {
    digest_secret(secret, salt) == stored_digest
}
