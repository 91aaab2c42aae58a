//! Argon2id implementation of the password hashing port.
//!
//! Key derivation is CPU-bound, so both operations run on the blocking pool
//! with the caller's trace identifier carried across.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash, TraceId};

/// Password hasher producing PHC-encoded Argon2id strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| PasswordHashError::hashing(err.to_string()))
}

fn verify_blocking(password: &str, encoded: &str) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| PasswordHashError::corrupt_hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::corrupt_hash(err.to_string())),
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, task),
        None => task(),
    })
    .await
    .map_err(|err| PasswordHashError::hashing(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let password = password.clone();
        run_blocking(move || hash_blocking(password.expose())).await
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = password.clone();
        let encoded = hash.as_str().to_owned();
        run_blocking(move || verify_blocking(password.expose(), &encoded)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::for_login(raw).expect("password")
    }

    #[tokio::test]
    async fn hashes_verify_only_the_original_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher
            .hash(&password("correct horse"))
            .await
            .expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher
            .verify(&password("correct horse"), &hash)
            .await
            .expect("verify"));
        assert!(!hasher
            .verify(&password("battery staple"), &hash)
            .await
            .expect("verify"));
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash(&password("same")).await.expect("hash");
        let second = hasher.hash(&password("same")).await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[tokio::test]
    async fn unreadable_hashes_are_reported() {
        let error = Argon2PasswordHasher
            .verify(&password("whatever"), &PasswordHash::new("not-a-phc-string"))
            .await
            .expect_err("corrupt");
        assert!(matches!(error, PasswordHashError::CorruptHash { .. }));
    }
}
