//! Opaque refresh tokens.
//!
//! A refresh token is `<user id>.<secret>` where the secret is
//! [`REFRESH_SECRET_BYTES`] of CSPRNG output, hex-encoded. The user id prefix
//! lets the server find the stored hash without a token index; the whole
//! string is what gets hashed and compared.
//!
//! Only the bcrypt hash of the token is persisted. bcrypt reads at most 72
//! bytes of input, so the token is first reduced to its SHA-256 hex digest
//! and every byte of the secret contributes to the stored hash.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use scpl_core::AppError;

pub const DEFAULT_OPAQUE_TOKEN_BYTES: usize = 48;
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Returns `byte_len` bytes from the OS CSPRNG as lowercase hex.
pub fn generate_opaque_token(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Malformed refresh token")]
    Malformed,
}

/// A refresh token as presented by (or issued to) a client.
///
/// `Debug` and `Display` never print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    user_id: Uuid,
    raw: String,
}

impl RefreshToken {
    /// Mints a fresh token for `user_id`.
    pub fn issue(user_id: Uuid) -> Self {
        let secret = generate_opaque_token(REFRESH_SECRET_BYTES);
        Self {
            user_id,
            raw: format!("{user_id}.{secret}"),
        }
    }

    /// Splits a presented token into its user id and secret.
    ///
    /// # Errors
    ///
    /// [`RefreshTokenError::Malformed`] when the separator is missing, either
    /// part is empty, or the user id is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, RefreshTokenError> {
        let (user_id, secret) = raw.split_once('.').ok_or(RefreshTokenError::Malformed)?;
        if user_id.is_empty() || secret.is_empty() {
            return Err(RefreshTokenError::Malformed);
        }

        let user_id = Uuid::parse_str(user_id).map_err(|_| RefreshTokenError::Malformed)?;

        Ok(Self {
            user_id,
            raw: raw.to_string(),
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The raw token string. Only for setting the cookie and hashing.
    pub fn expose(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.<redacted>", self.user_id)
    }
}

fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Salted, adaptive hash of a token for storage.
pub fn hash_token(token: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(digest(token), cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash token: {e}")))
}

/// Checks a presented token against a stored hash.
pub fn verify_token_hash(token: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(digest(token), hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify token: {e}")))
}

/// Absolute expiry `days` from now, saturating at the latest representable instant.
pub fn compute_expiry(days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_token_length_and_alphabet() {
        let token = generate_opaque_token(DEFAULT_OPAQUE_TOKEN_BYTES);
        assert_eq!(token.len(), DEFAULT_OPAQUE_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_opaque_token(DEFAULT_OPAQUE_TOKEN_BYTES));
    }

    #[test]
    fn test_issue_embeds_user_id() {
        let user_id = Uuid::new_v4();
        let token = RefreshToken::issue(user_id);
        let (prefix, secret) = token.expose().split_once('.').unwrap();
        assert_eq!(prefix, user_id.to_string());
        assert_eq!(secret.len(), REFRESH_SECRET_BYTES * 2);
    }

    #[test]
    fn test_parse_issued_token() {
        let issued = RefreshToken::issue(Uuid::new_v4());
        let parsed = RefreshToken::parse(issued.expose()).unwrap();
        assert_eq!(parsed, issued);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["garbage", "", ".", "abc.", ".abc", "not-a-uuid.deadbeef"] {
            assert_eq!(
                RefreshToken::parse(raw).unwrap_err(),
                RefreshTokenError::Malformed,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_debug_and_display_redact_secret() {
        let token = RefreshToken::issue(Uuid::new_v4());
        let secret = token.expose().split_once('.').unwrap().1.to_string();
        assert!(!format!("{token:?}").contains(&secret));
        assert!(!format!("{token}").contains(&secret));
    }

    #[test]
    fn test_hash_verifies_whole_token() {
        let token = RefreshToken::issue(Uuid::new_v4());
        let hash = hash_token(token.expose(), 4).unwrap();
        assert!(verify_token_hash(token.expose(), &hash).unwrap());

        // Only the final character differs.
        let mut tampered = token.expose().to_string();
        tampered.pop();
        tampered.push(if token.expose().ends_with('0') { '1' } else { '0' });
        assert!(!verify_token_hash(&tampered, &hash).unwrap());
    }

    #[test]
    fn test_compute_expiry() {
        let expiry = compute_expiry(7);
        let delta = expiry - Utc::now();
        assert!(delta > Duration::days(7) - Duration::seconds(5));
        assert!(delta <= Duration::days(7));
    }

    #[test]
    fn test_compute_expiry_saturates() {
        assert_eq!(compute_expiry(200_000_000), DateTime::<Utc>::MAX_UTC);
        assert_eq!(compute_expiry(i64::MAX), DateTime::<Utc>::MAX_UTC);
    }
}
