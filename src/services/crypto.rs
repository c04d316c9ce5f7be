use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 for refresh tokens and return as hexadecimal string
pub fn hmac_sha256_token(key: &str, token: &str) -> Result<String, InternalError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| InternalError::crypto("hmac_sha256", e.to_string()))?;
    mac.update(token.as_bytes());
    let result = mac.finalize();
    Ok(format!("{:x}", result.into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_is_deterministic_hex() {
        let a = hmac_sha256_token("key-one", "token").unwrap();
        let b = hmac_sha256_token("key-one", "token").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hmac_depends_on_key() {
        let a = hmac_sha256_token("key-one", "token").unwrap();
        let b = hmac_sha256_token("key-two", "token").unwrap();
        assert_ne!(a, b);
    }
}
