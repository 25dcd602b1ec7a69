//! Configuration loading and validation.
//!
//! The one required value is read from the environment at startup. The host
//! process must exit with a clear error message if it is missing or empty;
//! serving traffic without a usable encryption key is not an option.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::key::KeyMaterial;

/// Validated field-encryption configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Secret the field-encryption key is loaded from. **Required.**
    ///
    /// Either a 64-character hex string used verbatim as the raw 32-byte key,
    /// or an arbitrary passphrase that is hashed down to one.
    pub encryption_key: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret must never appear in logs or error output.
        f.debug_struct("Config")
            .field("encryption_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ENCRYPTION_KEY` is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_key, "ENCRYPTION_KEY")?;
        Ok(())
    }

    /// Turn the configured secret into ready-to-use [`KeyMaterial`].
    ///
    /// # Errors
    ///
    /// Returns an error if the secret does not yield exactly 32 key bytes.
    pub fn key_material(&self) -> Result<KeyMaterial> {
        KeyMaterial::from_secret(&self.encryption_key)
            .context("failed to load field-encryption key material")
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
