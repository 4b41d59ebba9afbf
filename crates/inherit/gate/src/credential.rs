//! Salted SHA-256 content-password credentials.
//!
//! Format: `$inherit-sha256$<salt hex>$<sha256(salt || password) hex>`.
//! The client keeps the credential; the server keeps only the password and
//! re-derives the digest to check it.

use inherit_types::{HostError, HostResult, PasswordHasher, PasswordVerifier};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SCHEME: &str = "inherit-sha256";
const SALT_LEN: usize = 16;

/// Reference [`PasswordHasher`] used when the host brings none of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Issue a credential with an explicit salt.
    pub fn hash_with_salt(&self, password: &str, salt: &[u8]) -> String {
        format!(
            "${}${}${}",
            SCHEME,
            hex::encode(salt),
            hex::encode(digest(salt, password))
        )
    }
}

impl PasswordVerifier for Sha256PasswordHasher {
    fn verify(&self, password: &str, credential: &str) -> HostResult<bool> {
        let (salt, expected) = parse(credential)?;
        Ok(bool::from(digest(&salt, password)[..].ct_eq(&expected[..])))
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> HostResult<String> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Ok(self.hash_with_salt(password, &salt))
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn parse(credential: &str) -> HostResult<(Vec<u8>, Vec<u8>)> {
    let mut parts = credential.split('$');
    match (parts.next(), parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(""), Some(SCHEME), Some(salt), Some(digest), None) => {
            let salt = hex::decode(salt)
                .map_err(|e| HostError::Verification(format!("invalid salt: {}", e)))?;
            let digest = hex::decode(digest)
                .map_err(|e| HostError::Verification(format!("invalid digest: {}", e)))?;
            if salt.is_empty() || digest.len() != 32 {
                return Err(HostError::Verification("truncated credential".to_string()));
            }
            Ok((salt, digest))
        }
        _ => Err(HostError::Verification(
            "unrecognised credential format".to_string(),
        )),
    }
}
