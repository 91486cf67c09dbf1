//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! The derived key has the same length as the secret it came from, so a
//! 32-byte secret yields an AES-256 key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::random::RandomSource;
use crate::types::DEFAULT_SECRET_LENGTH;

/// Derive a key from `secret` and `salt` with PBKDF2-HMAC-SHA256.
///
/// # Arguments
/// * `secret` - Paste secret (any non-zero length)
/// * `salt` - Per-paste random salt
/// * `iterations` - PBKDF2 rounds, must be positive
///
/// # Returns
/// Key bytes, `secret.len()` long
pub fn derive_key(
    secret: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if iterations == 0 {
        return Err(CryptoError::InvalidIterations(iterations));
    }
    if secret.is_empty() {
        return Err(CryptoError::DerivationFailed(
            "zero-length output requested".into(),
        ));
    }

    tracing::debug!(
        iterations,
        key_len = secret.len(),
        salt_len = salt.len(),
        "deriving paste key"
    );

    let mut key = Zeroizing::new(vec![0u8; secret.len()]);
    pbkdf2_hmac::<Sha256>(secret, salt, iterations, &mut key);
    Ok(key)
}

/// Like [`derive_key`], but substitutes 32 fresh random bytes for an absent
/// secret. The caller cannot recover that substitute, so the result is only
/// useful where the key never needs to be shared.
pub fn derive_key_or_random(
    secret: Option<&[u8]>,
    salt: &[u8],
    iterations: u32,
    rng: &dyn RandomSource,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    match secret {
        Some(secret) => derive_key(secret, salt, iterations),
        None => {
            let mut fallback = Zeroizing::new([0u8; DEFAULT_SECRET_LENGTH]);
            rng.fill(&mut fallback[..])?;
            derive_key(&fallback[..], salt, iterations)
        }
    }
}
