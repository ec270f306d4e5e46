// ABOUTME: Salted SHA-256 password hashing for stored user credentials
// ABOUTME: Hashes are stored as sha256$<salt>$<hex digest>

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SCHEME: &str = "sha256";

/// Single-round salted SHA-256. Fine for the in-memory demo store; a real
/// credential store wants a slow KDF such as argon2.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}${}", SCHEME, salt, digest(&salt, password))
}

/// False for malformed stored values as well as wrong passwords.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(salt), Some(expected)) => {
            bool::from(digest(salt, password).as_bytes().ct_eq(expected.as_bytes()))
        }
        _ => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("sha256$"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_digest_mismatch_of_any_length_fails() {
        let stored = hash_password("pw");
        let (prefix, digest) = stored.rsplit_once('$').unwrap();

        let truncated = format!("{}${}", prefix, &digest[..digest.len() - 1]);
        assert!(!verify_password("pw", &truncated));

        let extended = format!("{}0", stored);
        assert!(!verify_password("pw", &extended));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5$salt$digest"));
    }
}
