use crate::utils::AppError;

/// How submitted passwords are stored and checked.
pub trait CredentialMatcher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, AppError>;

    fn matches_credential(&self, candidate: &str, stored: &str) -> Result<bool, AppError>;
}

/// Salted bcrypt hashes.
pub struct BcryptMatcher {
    cost: u32,
}

impl BcryptMatcher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl CredentialMatcher for BcryptMatcher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(plain, self.cost)?)
    }

    fn matches_credential(&self, candidate: &str, stored: &str) -> Result<bool, AppError> {
        match bcrypt::verify(candidate, stored) {
            Ok(valid) => Ok(valid),
            // A record that isn't a bcrypt hash can never match.
            Err(bcrypt::BcryptError::InvalidHash(_)) | Err(bcrypt::BcryptError::InvalidPrefix(_)) => {
                log::warn!("⚠️ Stored credential is not a bcrypt hash");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_match() {
        let matcher = BcryptMatcher::new(TEST_COST);
        let stored = matcher.hash("pw1").unwrap();

        assert_ne!(stored, "pw1");
        assert!(matcher.matches_credential("pw1", &stored).unwrap());
        assert!(!matcher.matches_credential("pw2", &stored).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let matcher = BcryptMatcher::new(TEST_COST);
        let first = matcher.hash("same").unwrap();
        let second = matcher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(matcher.matches_credential("same", &first).unwrap());
        assert!(matcher.matches_credential("same", &second).unwrap());
    }

    #[test]
    fn test_plaintext_record_never_matches() {
        let matcher = BcryptMatcher::new(TEST_COST);
        assert!(!matcher.matches_credential("pw1", "pw1").unwrap());
    }
}
