//! AES-256-GCM-SIV encryption and decryption of individual field values.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant.
//! Every encrypt call still generates a fresh random 96-bit nonce from the OS
//! CSPRNG; a nonce must never be reused with the same key, since reuse under
//! an AEAD weakens both confidentiality and authenticity guarantees.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Key, Nonce,
};
use thiserror::Error;
use tracing::warn;

use super::payload::{EncryptedPayload, NONCE_LEN, TAG_LEN};
use crate::key::KeyMaterial;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// AEAD encryption failed, or decryption failed authentication.
    #[error("aead operation failed")]
    AeadFailure,

    /// The stored string does not match the expected payload layout.
    #[error("invalid encrypted payload format")]
    InvalidFormat,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Authenticated codec for individual sensitive field values.
///
/// Holds the process-wide [`KeyMaterial`] injected at construction; one
/// instance services arbitrarily many calls and is safe to share across
/// threads. All operations are stateless transforms of `(key, input)`.
pub struct FieldCipher {
    key: KeyMaterial,
}

impl FieldCipher {
    /// Create a codec bound to the given key material.
    pub fn new(key: KeyMaterial) -> Self {
        Self { key }
    }

    /// Encrypt a plaintext field value for storage.
    ///
    /// `None` and the empty string mean "nothing to protect" and map to
    /// `Ok(None)`. Otherwise the plaintext's UTF-8 bytes are sealed under a
    /// fresh random nonce and returned as `base64(nonce ∥ tag ∥ ciphertext)`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AeadFailure`] on an internal AEAD error. The
    /// error must propagate to the caller and abort the enclosing write; a
    /// failed encryption never degrades to storing plaintext.
    pub fn encrypt(&self, plaintext: Option<&str>) -> Result<Option<String>, CipherError> {
        let plaintext = match plaintext {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };

        // Use OsRng for a cryptographically secure random nonce.
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        // The AEAD appends the 16-byte tag to the ciphertext; the stored
        // layout wants it in front, so split it back off.
        let mut ciphertext = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CipherError::AeadFailure)?;
        let tag = ciphertext.split_off(ciphertext.len() - TAG_LEN);

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(&tag);

        let payload = EncryptedPayload {
            nonce,
            tag: tag_bytes,
            ciphertext,
        };
        Ok(Some(payload.to_base64()))
    }

    /// Decrypt a stored field value. Never fails.
    ///
    /// `None` and the empty string map to `None`. On malformed input or an
    /// authentication failure this logs a warning and returns the original
    /// input **unchanged**: stored values written before encryption was
    /// introduced remain readable in place. The flip side is that callers
    /// cannot distinguish legacy plaintext from corrupted ciphertext; both
    /// come back as the stored string.
    pub fn decrypt(&self, stored: Option<&str>) -> Option<String> {
        let stored = match stored {
            Some(s) if !s.is_empty() => s,
            _ => return None,
        };

        match self.try_decrypt(stored) {
            Ok(plaintext) => Some(plaintext),
            Err(e) => {
                warn!(error = %e, "field decryption failed, returning stored value unchanged");
                Some(stored.to_owned())
            }
        }
    }

    fn try_decrypt(&self, stored: &str) -> Result<String, CipherError> {
        let payload = EncryptedPayload::from_base64(stored)?;

        // Reassemble ciphertext ∥ tag, the order the AEAD verifies in.
        let mut ct_and_tag = payload.ciphertext;
        ct_and_tag.extend_from_slice(&payload.tag);

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&payload.nonce), ct_and_tag.as_ref())
            .map_err(|_| CipherError::AeadFailure)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }

    fn cipher(&self) -> Aes256GcmSiv {
        Aes256GcmSiv::new(Key::<Aes256GcmSiv>::from_slice(self.key.as_bytes()))
    }
}
