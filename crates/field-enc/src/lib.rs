//! Field-level encryption for sensitive entity columns.
//!
//! Persistence code calls [`FieldCipher::encrypt`] immediately before writing
//! a protected column and [`FieldCipher::decrypt`] immediately after reading
//! it back; [`is_encrypted`] lets migration and inspection tooling tell
//! already-protected values from legacy plaintext. All three operations are
//! stateless transforms safe to call concurrently from any number of threads.
//!
//! Startup sequence for a host process:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Turn the configured secret into [`KeyMaterial`] (exactly 32 bytes).
//! 3. Construct a [`FieldCipher`] and hand it to the persistence layer.
//!
//! ```
//! use field_enc::{is_encrypted, FieldCipher, KeyMaterial};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = KeyMaterial::from_secret("correct horse battery staple")?;
//! let cipher = FieldCipher::new(key);
//!
//! let stored = cipher.encrypt(Some("123-45-6789"))?.expect("input was non-empty");
//! assert!(is_encrypted(Some(&stored)));
//! assert_eq!(cipher.decrypt(Some(&stored)).as_deref(), Some("123-45-6789"));
//! # Ok(())
//! # }
//! ```
//!
//! # Failure policy
//!
//! `encrypt` either returns a complete opaque ciphertext or a hard error;
//! a failed encryption never degrades to storing plaintext. `decrypt` never
//! fails: on malformed input or an authentication failure it logs a warning
//! and returns the stored value unchanged, so rows written before encryption
//! was introduced stay readable in place. See [`FieldCipher::decrypt`] for
//! the sharp edge this implies.

pub mod config;
pub mod crypto;
pub mod key;

pub use config::Config;
pub use crypto::cipher::{CipherError, FieldCipher};
pub use crypto::payload::{is_encrypted, EncryptedPayload, MIN_PAYLOAD_LEN, NONCE_LEN, TAG_LEN};
pub use key::{KeyError, KeyMaterial, KEY_LEN};
