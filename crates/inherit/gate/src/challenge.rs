use std::sync::Arc;

use inherit_types::{ContentItem, PasswordHasher};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use crate::error::GateError;

/// Accepts a submitted content password and issues the credential the
/// client presents on later requests.
///
/// A credential issued for an ancestor's password also satisfies every
/// descendant that inherits from it.
#[derive(Clone)]
pub struct PasswordChallenge {
    hasher: Arc<dyn PasswordHasher>,
}

impl PasswordChallenge {
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { hasher }
    }

    /// Check `submitted` against `item`'s own password and issue a credential.
    pub fn submit(&self, item: &ContentItem, submitted: &str) -> Result<String, GateError> {
        if !item.has_password() {
            return Err(GateError::NotProtected(item.id));
        }

        if !bool::from(item.password.as_bytes().ct_eq(submitted.as_bytes())) {
            debug!(item_id = %item.id, "Password challenge failed");
            return Err(GateError::IncorrectPassword(item.id));
        }

        let credential = self.hasher.hash(submitted)?;
        info!(item_id = %item.id, "Password challenge passed, credential issued");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Sha256PasswordHasher;
    use inherit_types::{ContentId, PasswordVerifier};

    fn challenge() -> PasswordChallenge {
        PasswordChallenge::new(Arc::new(Sha256PasswordHasher::new()))
    }

    #[test]
    fn correct_password_issues_verifiable_credential() {
        let item = ContentItem::new(ContentId(1), "page").with_password("abc123");
        let credential = challenge().submit(&item, "abc123").unwrap();

        assert!(Sha256PasswordHasher::new()
            .verify("abc123", &credential)
            .unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let item = ContentItem::new(ContentId(1), "page").with_password("abc123");
        for submitted in ["abc12", "abc124", "abc1234"] {
            assert!(matches!(
                challenge().submit(&item, submitted),
                Err(GateError::IncorrectPassword(ContentId(1)))
            ));
        }
    }

    #[test]
    fn unprotected_item_has_no_challenge() {
        let item = ContentItem::new(ContentId(1), "page");
        assert!(matches!(
            challenge().submit(&item, ""),
            Err(GateError::NotProtected(ContentId(1)))
        ));
    }
}
