//! Authenticated field encryption primitives.
//!
//! This module is free of configuration and environment dependencies. It
//! provides the codec and wire-format operations used around individual
//! sensitive columns.
//!
//! # Stored format
//!
//! ```text
//! base64(nonce ∥ tag ∥ ciphertext)
//!
//! [0:12]  nonce     96-bit random value, fresh per encrypt call
//! [12:28] tag       128-bit authentication tag
//! [28:]   ciphertext same byte length as the UTF-8 plaintext
//! ```
//!
//! The decoded form is therefore always at least 28 bytes, which is also the
//! floor used by the `is_encrypted` heuristic.

pub mod cipher;
pub mod payload;

pub use cipher::FieldCipher;
pub use payload::is_encrypted;
