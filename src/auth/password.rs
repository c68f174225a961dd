use crate::error::AppError;

/// bcrypt hashing with a configured work factor.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt, which bcrypt embeds
/// in the returned digest next to the cost, so `verify` needs nothing but the digest.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    /// Returns `false` for a mismatch, an empty password or a digest bcrypt cannot parse.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        match bcrypt::verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("stored password digest could not be parsed: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_BCRYPT_COST;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_BCRYPT_COST)
    }

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hasher().hash(password).unwrap();

        assert_ne!(hashed, password);
        assert!(hasher().verify(password, &hashed));
        assert!(!hasher().verify("wrong_password", &hashed));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hasher().hash("secret").unwrap();
        let second = hasher().hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher().verify("secret", &first));
        assert!(hasher().verify("secret", &second));
    }

    #[test]
    fn test_digest_embeds_cost() {
        let hashed = hasher().hash("secret").unwrap();
        assert!(hashed.starts_with("$2b$04$"), "unexpected digest: {}", hashed);
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        assert!(!hasher().verify("test_password123", "invalidhashformat"));
        assert!(!hasher().verify("test_password123", ""));
    }

    #[test]
    fn test_verify_rejects_empty_password() {
        let hashed = hasher().hash("").unwrap();
        assert!(!hasher().verify("", &hashed));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(matches!(
            PasswordHasher::new(2).hash("secret"),
            Err(AppError::InternalServerError(_))
        ));
    }
}
