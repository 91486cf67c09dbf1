//! Randomness capability.
//!
//! IVs, salts and generated secrets are drawn through [`RandomSource`] so the
//! engine never reaches for a global generator directly.

use crate::error::CryptoError;
use crate::types::Secret;

/// A source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating system CSPRNG via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::getrandom(dest).map_err(|e| CryptoError::RngFailed(e.to_string()))
    }
}

/// Draw a fixed-size random array.
pub fn random_array<const N: usize>(rng: &dyn RandomSource) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    rng.fill(&mut out)?;
    Ok(out)
}

/// Generate a random secret of `len` bytes.
pub fn generate_secret(rng: &dyn RandomSource, len: usize) -> Result<Secret, CryptoError> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)?;
    Ok(Secret::new(bytes))
}
