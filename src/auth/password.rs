// src/auth/password.rs
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::errors::ServerError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with a fresh random salt. Stored as "salt$digest", both
/// base64 url-safe.
pub fn hash_password(password: &str) -> Result<String, ServerError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(format!(
            "Password is too weak (minimum {MIN_PASSWORD_LEN} characters)."
        )));
    }

    let mut salt = [0u8; 16];
    OsRng.fill_bytes(&mut salt);
    let encoder = base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let salt_b64 = encoder.encode(salt);
    let digest = Sha256::digest([&salt, password.as_bytes()].concat());
    Ok(format!("{}${}", salt_b64, encoder.encode(digest)))
}

/// Constant-shape verify against a stored "salt$digest" value. Malformed
/// stored values simply fail verification.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let encoder = base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = encoder.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = encoder.decode(digest_b64) else {
        return false;
    };

    let digest = Sha256::digest([salt.as_slice(), password.as_bytes()].concat());
    digest.as_slice() == expected.as_slice()
}
