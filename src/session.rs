//! Password hashing state shared by login, seeding, and tests.
//!
//! Argon2 is peppered with the `SALT` environment variable. Without it the
//! hasher still works, but hashes are only as secret as the binary.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use once_cell::sync::OnceCell;

static ARGON2: OnceCell<Argon2<'static>> = OnceCell::new();

const DEFAULT_PEPPER: &str = "storefront-dev-pepper";

/// Initialize the hasher. Safe to call more than once; later calls are no-ops.
pub fn init() {
    if ARGON2.get().is_some() {
        return;
    }

    let pepper = match std::env::var("SALT") {
        Ok(v) => v,
        Err(_) => {
            log::warn!("SALT not set; using a built-in pepper. Do not do this in production.");
            DEFAULT_PEPPER.to_string()
        }
    };

    // OnceCell wants 'static; the pepper lives for the process anyway.
    let secret: &'static [u8] = Box::leak(pepper.into_bytes().into_boxed_slice());
    let argon2 = Argon2::new_with_secret(
        secret,
        Algorithm::Argon2id,
        Version::V0x13,
        Params::default(),
    )
    .expect("Argon2 failed to initialize.");

    ARGON2.set(argon2).ok();
}

pub fn get_argon2() -> &'static Argon2<'static> {
    ARGON2.get().expect("session::init() was not called.")
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    get_argon2()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
/// An unparseable hash counts as a failed verification, not an error.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => get_argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("verify_password: unparseable hash: {}", e);
            false
        }
    }
}
