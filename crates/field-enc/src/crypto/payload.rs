//! Stored-payload layout: assembly, parsing, and the `is_encrypted` heuristic.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::cipher::CipherError;

/// Byte length of the AEAD nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Minimum decoded payload length: nonce + tag with an empty ciphertext.
pub const MIN_PAYLOAD_LEN: usize = NONCE_LEN + TAG_LEN;

/// A parsed, encrypted field value.
///
/// The stored representation is `base64(nonce ∥ tag ∥ ciphertext)`, where the
/// ciphertext has the same byte length as the original plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext bytes, tag excluded.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Encode this payload to its stored base64 representation.
    pub fn to_base64(&self) -> String {
        let mut buf = Vec::with_capacity(MIN_PAYLOAD_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.tag);
        buf.extend_from_slice(&self.ciphertext);
        STANDARD.encode(buf)
    }

    /// Parse a stored base64 string back into an [`EncryptedPayload`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string is not valid
    /// base64 or decodes to fewer than [`MIN_PAYLOAD_LEN`] bytes.
    pub fn from_base64(stored: &str) -> Result<Self, CipherError> {
        let decoded = STANDARD
            .decode(stored)
            .map_err(|_| CipherError::InvalidFormat)?;
        if decoded.len() < MIN_PAYLOAD_LEN {
            return Err(CipherError::InvalidFormat);
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&decoded[..NONCE_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&decoded[NONCE_LEN..MIN_PAYLOAD_LEN]);

        Ok(Self {
            nonce,
            tag,
            ciphertext: decoded[MIN_PAYLOAD_LEN..].to_vec(),
        })
    }
}

/// Best-effort check for whether a stored value looks like an encrypted
/// payload: valid base64 decoding to at least [`MIN_PAYLOAD_LEN`] bytes.
///
/// This is a heuristic for migration and inspection tooling only. Any base64
/// string whose decoded form happens to be 28 bytes or longer is classified
/// as encrypted, even if it is unrelated data. It must never gate a security
/// decision.
pub fn is_encrypted(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match STANDARD.decode(value) {
        Ok(decoded) => decoded.len() >= MIN_PAYLOAD_LEN,
        Err(_) => false,
    }
}
