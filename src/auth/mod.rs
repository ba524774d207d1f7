//! Caller identity handling.
//!
//! Authentication itself is the gateway's job: every request arrives with a
//! gateway-verified user identity header, and this server only trusts that
//! identity. The optional shared gateway token guards against requests that
//! bypass the gateway.

mod extractor;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

pub use extractor::AuthenticatedUser;

/// Wrapper type for the shared gateway secret.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
///
/// # Security features
/// - `Debug` prints `[REDACTED]` instead of the actual value
/// - Memory is zeroed when dropped (via `zeroize`)
/// - Cannot be accidentally logged or printed
/// - Explicit `.expose_secret()` required to access the value
#[derive(Clone)]
pub struct GatewayToken(Option<SecretString>);

impl GatewayToken {
    /// Create a new GatewayToken from an optional string.
    pub fn new(token: Option<String>) -> Self {
        Self(token.map(SecretString::from))
    }

    /// Whether a gateway token is configured at all.
    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Securely compare the provided token with the stored one.
    ///
    /// Uses `subtle::ConstantTimeEq` which performs a constant-time
    /// byte-by-byte comparison. Unlike a manual fold, `ConstantTimeEq` also
    /// avoids leaking the token length through early-exit branching - both
    /// buffers are compared in full regardless of where they first differ.
    pub fn verify(&self, provided: &str) -> bool {
        match &self.0 {
            Some(secret) => {
                let expected = secret.expose_secret();
                // ConstantTimeEq returns 0 (false) for unequal lengths
                // without any early exit, preventing a length oracle.
                expected.as_bytes().ct_eq(provided.as_bytes()).into()
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for GatewayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "GatewayToken([REDACTED])"),
            None => write!(f, "GatewayToken(None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_matches_configured_token() {
        let token = GatewayToken::new(Some("secret-token".to_string()));
        assert!(token.verify("secret-token"));
        assert!(!token.verify("wrong-token"));
        assert!(!token.verify(""));
    }

    #[test]
    fn test_unconfigured_token_never_verifies() {
        let token = GatewayToken::new(None);
        assert!(!token.is_configured());
        assert!(!token.verify("anything"));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = GatewayToken::new(Some("secret-token".to_string()));
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-token"));
    }
}
