use anyhow::{Context, Result};

/// Hash a plaintext password with the configured bcrypt cost.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plaintext, cost).context("Failed to hash password")
}

/// Constant result for malformed hashes: verification simply fails.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the hashing rounds cheap in tests;
    // the crate does not export MIN_COST, so spell out its value (4)
    const COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery staple", COST).unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("hunter2", COST).unwrap();
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-input", COST).unwrap();
        let second = hash_password("same-input", COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-input", &first));
        assert!(verify_password("same-input", &second));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_unicode_passwords() {
        let hash = hash_password("パスワード🔒", COST).unwrap();
        assert!(verify_password("パスワード🔒", &hash));
        assert!(!verify_password("パスワード", &hash));
    }
}
