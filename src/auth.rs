use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::User;
use crate::store::Store;

/// Hash a password with Argon2id and a fresh random salt, producing a PHC
/// string that embeds the salt and parameters.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string. Comparison is
/// constant-time inside argon2.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHash(e.to_string())),
    }
}

/// Create an account. Returns `false` when the email is already taken; the
/// unique index on email backs this check at the storage level.
pub fn register(store: &Store, full_name: &str, email: &str, password: &str) -> Result<bool> {
    if store.user_by_email(email)?.is_some() {
        info!(email, "registration rejected, email already exists");
        return Ok(false);
    }

    let hash = hash_password(password)?;
    let user = store.create_user(full_name, email, &hash)?;
    info!(id = user.id, "registered user");
    Ok(true)
}

/// Look up the user and check the password. Returns `None` for an unknown
/// email or a wrong password; the two cases are not distinguished.
pub fn login(store: &Store, email: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = store.user_by_email(email)? else {
        info!(email, "login failed, unknown email");
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        info!(id = user.id, "login succeeded");
        Ok(Some(user))
    } else {
        info!(id = user.id, "login failed, wrong password");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path().join("taskflow.db")).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_accepts_and_rejects() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_register_then_login_yields_stable_id() {
        let (_dir, store) = test_store();
        assert!(register(&store, "Ada Lovelace", "ada@example.com", "hunter2").unwrap());

        let first = login(&store, "ada@example.com", "hunter2").unwrap().unwrap();
        let second = login(&store, "ada@example.com", "hunter2").unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.full_name, "Ada Lovelace");
    }

    #[test]
    fn test_register_with_existing_email_fails() {
        let (_dir, store) = test_store();
        assert!(register(&store, "Ada", "ada@example.com", "hunter2").unwrap());
        assert!(!register(&store, "Imposter", "ada@example.com", "other").unwrap());
    }

    #[test]
    fn test_login_failures_return_none() {
        let (_dir, store) = test_store();
        register(&store, "Ada", "ada@example.com", "hunter2").unwrap();

        assert!(login(&store, "ada@example.com", "wrong").unwrap().is_none());
        assert!(login(&store, "nobody@example.com", "hunter2").unwrap().is_none());
    }

    #[test]
    fn test_stored_password_is_not_plaintext() {
        let (_dir, store) = test_store();
        register(&store, "Ada", "ada@example.com", "hunter2").unwrap();

        let user = store.user_by_email("ada@example.com").unwrap().unwrap();
        assert_ne!(user.password_hash, "hunter2");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }
}
