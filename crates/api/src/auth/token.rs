//! Opaque session-token generation and legacy shared-secret verification.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a 256-bit random session token, hex-encoded (64 characters).
///
/// The token is stored verbatim and presented by the client as the sole
/// session credential; lookups hit the unique index on `session_token`.
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compare a supplied legacy password against the configured shared secret.
///
/// Both sides are run through SHA-256 and the digests compared, so the
/// comparison time does not depend on how much of the secret matched.
pub fn verify_legacy_secret(supplied: &str, configured: &str) -> bool {
    let supplied_digest = Sha256::digest(supplied.as_bytes());
    let configured_digest = Sha256::digest(configured.as_bytes());
    supplied_digest == configured_digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_hex_chars() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_secret_match() {
        assert!(verify_legacy_secret("station-secret", "station-secret"));
        assert!(!verify_legacy_secret("station-secret", "other-secret"));
        assert!(!verify_legacy_secret("", "station-secret"));
    }
}
