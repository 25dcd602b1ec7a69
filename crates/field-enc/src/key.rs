//! [`KeyMaterial`]: the 32-byte field-encryption key and its loader.
//!
//! The key is constructed exactly once at process startup from the configured
//! secret and passed into [`FieldCipher`](crate::FieldCipher) by value. Two
//! loading paths exist:
//!
//! - A 64-character all-hex secret is decoded and used **verbatim** as the 32
//!   raw key bytes (operator-supplied high-entropy key).
//! - Any other secret is digested with SHA-256, so the same passphrase always
//!   derives the same key and a restarted process can read existing data.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Byte length of the field-encryption key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Errors produced while loading key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The configured secret is empty. The process must not start without one.
    #[error("encryption secret is required and must not be empty")]
    EmptySecret,

    /// A 64-character secret passed the hex-digit check but failed to decode.
    #[error("encryption secret is not valid hex")]
    InvalidHex,

    /// The loaded key material has an unexpected length.
    #[error("key material has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
#[derive(Clone)]
pub struct KeyMaterial(Box<[u8; KEY_LEN]>);

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}

impl KeyMaterial {
    /// Load key material from the configured secret.
    ///
    /// A secret that is exactly 64 hexadecimal characters is decoded directly
    /// into the 32 raw key bytes. Anything else is hashed with SHA-256, which
    /// also yields exactly 32 bytes. Entropy on the passphrase path is the
    /// operator's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::EmptySecret`] for an empty secret and
    /// [`KeyError::InvalidLength`] if either path produces anything other
    /// than [`KEY_LEN`] bytes.
    pub fn from_secret(secret: &str) -> Result<Self, KeyError> {
        if secret.is_empty() {
            return Err(KeyError::EmptySecret);
        }

        let bytes = if is_raw_hex_key(secret) {
            hex::decode(secret).map_err(|_| KeyError::InvalidHex)?
        } else {
            Sha256::digest(secret.as_bytes()).to_vec()
        };

        // Both paths are constructed to yield 32 bytes; check anyway.
        if bytes.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(&bytes);
        Ok(Self(buf))
    }

    /// Borrow the raw key bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Returns `true` if `secret` is exactly 64 hexadecimal characters and should
/// therefore be used as a raw key rather than a passphrase.
fn is_raw_hex_key(secret: &str) -> bool {
    secret.len() == KEY_LEN * 2 && secret.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(
            KeyMaterial::from_secret(""),
            Err(KeyError::EmptySecret)
        ));
    }

    #[test]
    fn hex_secret_used_verbatim() {
        let key = KeyMaterial::from_secret(&"aa".repeat(32)).unwrap();
        assert_eq!(key.as_bytes(), &[0xAA; KEY_LEN]);
    }

    #[test]
    fn hex_secret_accepts_uppercase() {
        let key = KeyMaterial::from_secret(&"AB".repeat(32)).unwrap();
        assert_eq!(key.as_bytes(), &[0xAB; KEY_LEN]);
    }

    #[test]
    fn passphrase_derivation_is_deterministic() {
        let a = KeyMaterial::from_secret("correct horse battery staple").unwrap();
        let b = KeyMaterial::from_secret("correct horse battery staple").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_passphrases_derive_different_keys() {
        let a = KeyMaterial::from_secret("passphrase one").unwrap();
        let b = KeyMaterial::from_secret("passphrase two").unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn sixty_four_chars_with_non_hex_is_hashed() {
        // 64 characters, but 'z' is not a hex digit — passphrase path.
        let secret = "z".repeat(64);
        let key = KeyMaterial::from_secret(&secret).unwrap();
        let expected = Sha256::digest(secret.as_bytes());
        assert_eq!(&key.as_bytes()[..], &expected[..]);
    }

    #[test]
    fn sixty_three_hex_chars_is_hashed() {
        // One character short of the raw-key length — passphrase path.
        let secret = "a".repeat(63);
        let key = KeyMaterial::from_secret(&secret).unwrap();
        let expected = Sha256::digest(secret.as_bytes());
        assert_eq!(&key.as_bytes()[..], &expected[..]);
    }

    #[test]
    fn key_material_redacted_in_debug() {
        let key = KeyMaterial::from_secret("some secret").unwrap();
        assert!(format!("{key:?}").contains("REDACTED"));
        assert!(!format!("{key:?}").contains("some secret"));
    }
}
