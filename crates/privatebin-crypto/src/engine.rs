//! AES-GCM paste encryption.
//!
//! Output layout: `ciphertext || tag`, where the tag is `tag_size / 8` bytes.
//! The IV and salt travel in the AAD, not in the output buffer.

use aes_gcm::aead::consts::{U12, U13, U14, U15, U16};
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, Payload};
use aes_gcm::aes::{Aes128, Aes256};
use aes_gcm::AesGcm;
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aad::{aad_bytes, build_aad};
use crate::error::CryptoError;
use crate::kdf::derive_key;
use crate::options::EncryptionOptions;
use crate::random::{random_array, RandomSource};
use crate::types::{KeySize, TagSize, UploadOptions, IV_LENGTH, SALT_LENGTH};

/// Per-call cipher inputs. Never reused across pastes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EncryptionParams {
    pub iv: [u8; IV_LENGTH],
    pub salt: [u8; SALT_LENGTH],
    pub key: Vec<u8>,
}

impl EncryptionParams {
    pub fn new(iv: [u8; IV_LENGTH], salt: [u8; SALT_LENGTH], key: Vec<u8>) -> Self {
        Self { iv, salt, key }
    }

    /// Draw a fresh IV and salt and derive the key from the configured secret.
    pub fn generate(
        options: &EncryptionOptions,
        rng: &dyn RandomSource,
    ) -> Result<Self, CryptoError> {
        let iv = random_array::<IV_LENGTH>(rng)?;
        let salt = random_array::<SALT_LENGTH>(rng)?;
        let mut key = derive_key(options.secret.as_bytes(), &salt, options.iterations)?;
        Ok(Self::new(iv, salt, std::mem::take(&mut *key)))
    }
}

/// Result of encrypting one paste.
#[derive(Debug, Clone)]
pub struct EncryptedPaste {
    /// AAD structure, sent as `adata`.
    pub aad: Value,
    /// `ciphertext || tag`.
    pub cipher_text: Vec<u8>,
}

/// Encrypt a serialized (and possibly compressed) message.
///
/// Unsupported mode or key size combinations are rejected before any random
/// bytes are drawn or keys derived.
pub fn encrypt(
    message: &[u8],
    options: &EncryptionOptions,
    upload: &UploadOptions,
    rng: &dyn RandomSource,
) -> Result<EncryptedPaste, CryptoError> {
    options.validate()?;

    let params = EncryptionParams::generate(options, rng)?;
    let aad = build_aad(&params, options, upload);
    let associated = aad_bytes(&aad)?;

    let cipher_text = seal_paste(
        options.key_size,
        options.tag_size,
        &params.key,
        &params.iv,
        message,
        &associated,
    )?;

    Ok(EncryptedPaste { aad, cipher_text })
}

macro_rules! seal_with_tag {
    ($aes:ty, $tag:expr, $key:expr, $iv:expr, $msg:expr, $aad:expr) => {
        match $tag {
            TagSize::Bits96 => seal::<AesGcm<$aes, U16, U12>>($key, $iv, $msg, $aad),
            TagSize::Bits104 => seal::<AesGcm<$aes, U16, U13>>($key, $iv, $msg, $aad),
            TagSize::Bits112 => seal::<AesGcm<$aes, U16, U14>>($key, $iv, $msg, $aad),
            TagSize::Bits120 => seal::<AesGcm<$aes, U16, U15>>($key, $iv, $msg, $aad),
            TagSize::Bits128 => seal::<AesGcm<$aes, U16, U16>>($key, $iv, $msg, $aad),
        }
    };
}

fn seal_paste(
    key_size: KeySize,
    tag_size: TagSize,
    key: &[u8],
    iv: &[u8; IV_LENGTH],
    msg: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    match key_size {
        KeySize::Bits128 => seal_with_tag!(Aes128, tag_size, key, iv, msg, aad),
        KeySize::Bits256 => seal_with_tag!(Aes256, tag_size, key, iv, msg, aad),
        KeySize::Bits196 => Err(CryptoError::UnsupportedKeySize(key_size.bits())),
    }
}

fn seal<C>(key: &[u8], iv: &[u8; IV_LENGTH], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    C: KeyInit + AeadCore<NonceSize = U16> + Aead,
{
    let cipher = C::new_from_slice(key).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    let nonce = Nonce::<C>::from_slice(iv);
    cipher
        .encrypt(nonce, Payload { msg, aad })
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EncryptionBuilder;
    use crate::random::OsRandom;
    use crate::types::{CipherMode, Format};
    use base64ct::{Base64, Encoding};
    use std::sync::atomic::{AtomicU8, Ordering};

    /// Fills every request with an incrementing byte value.
    struct StepRandom(AtomicU8);

    impl StepRandom {
        fn new() -> Self {
            Self(AtomicU8::new(1))
        }
    }

    impl RandomSource for StepRandom {
        fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
            let value = self.0.fetch_add(1, Ordering::SeqCst);
            dest.fill(value);
            Ok(())
        }
    }

    fn fast_options() -> EncryptionOptions {
        EncryptionBuilder::new()
            .iterations(1_000)
            .use_key_bytes(&[0x42u8; 32])
            .build_options()
            .unwrap()
    }

    fn field_bytes(aad: &Value, index: usize) -> Vec<u8> {
        Base64::decode_vec(aad[0][index].as_str().unwrap()).unwrap()
    }

    /// Test-side decryption: rebuild key and nonce from the AAD and open.
    fn open(sealed: &EncryptedPaste, options: &EncryptionOptions) -> Result<Vec<u8>, String> {
        let iv = field_bytes(&sealed.aad, 0);
        let salt = field_bytes(&sealed.aad, 1);
        let key = derive_key(options.secret.as_bytes(), &salt, options.iterations).unwrap();
        let aad = aad_bytes(&sealed.aad).unwrap();
        let payload = Payload {
            msg: &sealed.cipher_text,
            aad: &aad,
        };
        let opened = match (options.key_size, options.tag_size) {
            (KeySize::Bits256, TagSize::Bits128) => AesGcm::<Aes256, U16, U16>::new_from_slice(&key)
                .unwrap()
                .decrypt(Nonce::<AesGcm<Aes256, U16>>::from_slice(&iv), payload),
            (KeySize::Bits256, TagSize::Bits96) => AesGcm::<Aes256, U16, U12>::new_from_slice(&key)
                .unwrap()
                .decrypt(Nonce::<AesGcm<Aes256, U16, U12>>::from_slice(&iv), payload),
            (KeySize::Bits128, TagSize::Bits128) => AesGcm::<Aes128, U16, U16>::new_from_slice(&key)
                .unwrap()
                .decrypt(Nonce::<AesGcm<Aes128, U16>>::from_slice(&iv), payload),
            other => panic!("no test opener for {:?}", other),
        };
        opened.map_err(|e| e.to_string())
    }

    #[test]
    fn round_trip() {
        let options = fast_options();
        let upload = UploadOptions::default();
        let sealed = encrypt(b"Hello, paste!", &options, &upload, &OsRandom).unwrap();
        assert_eq!(open(&sealed, &options).unwrap(), b"Hello, paste!");
    }

    #[test]
    fn output_is_ciphertext_plus_full_tag() {
        let options = fast_options();
        let sealed = encrypt(&[7u8; 100], &options, &UploadOptions::default(), &OsRandom).unwrap();
        assert_eq!(sealed.cipher_text.len(), 100 + 16);
    }

    #[test]
    fn honours_short_tag_size() {
        let options = EncryptionBuilder::new()
            .iterations(1_000)
            .tag_size(TagSize::Bits96)
            .use_key_bytes(&[0x42u8; 32])
            .build_options()
            .unwrap();
        let sealed = encrypt(b"short tag", &options, &UploadOptions::default(), &OsRandom).unwrap();
        assert_eq!(sealed.cipher_text.len(), 9 + 12);
        assert_eq!(sealed.aad[0][4], serde_json::json!(96));
        assert_eq!(open(&sealed, &options).unwrap(), b"short tag");
    }

    #[test]
    fn aes_128_round_trip() {
        let options = EncryptionBuilder::new()
            .iterations(1_000)
            .key_size(KeySize::Bits128)
            .use_key("0123456789abcdef")
            .build_options()
            .unwrap();
        let sealed = encrypt(b"128-bit", &options, &UploadOptions::default(), &OsRandom).unwrap();
        assert_eq!(sealed.aad[0][3], serde_json::json!(128));
        assert_eq!(open(&sealed, &options).unwrap(), b"128-bit");
    }

    #[test]
    fn empty_message() {
        let options = fast_options();
        let sealed = encrypt(b"", &options, &UploadOptions::default(), &OsRandom).unwrap();
        assert_eq!(sealed.cipher_text.len(), 16);
        assert!(open(&sealed, &options).unwrap().is_empty());
    }

    #[test]
    fn fresh_iv_and_salt_per_call() {
        let options = fast_options();
        let upload = UploadOptions::default();
        let a = encrypt(b"same", &options, &upload, &OsRandom).unwrap();
        let b = encrypt(b"same", &options, &upload, &OsRandom).unwrap();
        assert_ne!(a.aad[0][0], b.aad[0][0]);
        assert_ne!(a.aad[0][1], b.aad[0][1]);
        assert_ne!(a.cipher_text, b.cipher_text);
    }

    #[test]
    fn deterministic_with_fixed_randomness() {
        let options = fast_options();
        let upload = UploadOptions::default();
        let a = encrypt(b"fixture", &options, &upload, &StepRandom::new()).unwrap();
        let b = encrypt(b"fixture", &options, &upload, &StepRandom::new()).unwrap();
        assert_eq!(a.aad, b.aad);
        assert_eq!(a.cipher_text, b.cipher_text);
        assert_eq!(field_bytes(&a.aad, 0), vec![1u8; IV_LENGTH]);
        assert_eq!(field_bytes(&a.aad, 1), vec![2u8; SALT_LENGTH]);
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let options = fast_options();
        let mut sealed = encrypt(b"secret", &options, &UploadOptions::default(), &OsRandom).unwrap();
        let last = sealed.cipher_text.len() - 1;
        sealed.cipher_text[last] ^= 0xff;
        assert!(open(&sealed, &options).is_err());
    }

    #[test]
    fn tampered_aad_fails() {
        let options = fast_options();
        let mut sealed = encrypt(b"secret", &options, &UploadOptions::default(), &OsRandom).unwrap();
        sealed.aad[2] = serde_json::json!(1);
        assert!(open(&sealed, &options).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let options = fast_options();
        let sealed = encrypt(b"secret", &options, &UploadOptions::default(), &OsRandom).unwrap();
        let other = EncryptionBuilder::new()
            .iterations(1_000)
            .use_key_bytes(&[0x43u8; 32])
            .build_options()
            .unwrap();
        assert!(open(&sealed, &other).is_err());
    }

    #[test]
    fn aad_carries_upload_options() {
        let options = fast_options();
        let upload = UploadOptions {
            burn_after_reading: true,
            upload_format: Format::PlainText,
            ..Default::default()
        };
        let sealed = encrypt(b"x", &options, &upload, &OsRandom).unwrap();
        assert_eq!(sealed.aad[1], serde_json::json!("plaintext"));
        assert_eq!(sealed.aad[2], serde_json::json!(1));
        assert_eq!(sealed.aad[3], serde_json::json!(0));
    }

    #[test]
    fn rejects_unsupported_mode_before_drawing_randomness() {
        struct PanickingRandom;
        impl RandomSource for PanickingRandom {
            fn fill(&self, _dest: &mut [u8]) -> Result<(), CryptoError> {
                panic!("randomness drawn for a rejected configuration");
            }
        }

        let options = EncryptionBuilder::new()
            .mode(CipherMode::Cbc)
            .use_key_bytes(&[0u8; 32])
            .build_options()
            .unwrap();
        let err = encrypt(b"x", &options, &UploadOptions::default(), &PanickingRandom).unwrap_err();
        assert!(err.to_string().contains("aes-cbc"));
    }

    #[test]
    fn rejects_mismatched_secret_length() {
        let options = EncryptionBuilder::new()
            .use_key("too short")
            .build_options()
            .unwrap();
        let err = encrypt(b"x", &options, &UploadOptions::default(), &OsRandom).unwrap_err();
        assert!(matches!(err, CryptoError::KeyLengthMismatch { .. }));
    }

    #[test]
    fn rng_failure_is_fatal() {
        struct FailingRandom;
        impl RandomSource for FailingRandom {
            fn fill(&self, _dest: &mut [u8]) -> Result<(), CryptoError> {
                Err(CryptoError::RngFailed("unavailable".into()))
            }
        }

        let err = encrypt(b"x", &fast_options(), &UploadOptions::default(), &FailingRandom)
            .unwrap_err();
        assert!(matches!(err, CryptoError::RngFailed(_)));
    }
}
