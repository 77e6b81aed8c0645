//! Symmetric cipher for configuration secrets.
//!
//! Values are protected with a passphrase: every encryption draws a fresh
//! random salt and nonce, derives a 256-bit key with Argon2id and seals the
//! plaintext with AES-256-GCM. The wire form is
//! `base64(salt || nonce || ciphertext+tag)`; configuration files carry it
//! wrapped as `ENC(...)`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use serde::Deserialize;
use thiserror::Error;

pub const ALGORITHM: &str = "argon2id-aes256gcm";
pub const PASSPHRASE_ENV: &str = "CATALOG_SECRET_PASSPHRASE";

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("passphrase must not be empty")]
    EmptyPassphrase,
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid cipher parameters: {0}")]
    InvalidParams(String),
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
    #[error("decryption failed (wrong passphrase or tampered value)")]
    Decrypt,
    #[error("encryption failed")]
    Encrypt,
}

/// Cipher tuning. `iterations` and `memory_kib` drive the key derivation
/// cost, `lanes` is the Argon2 parallelism degree.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CipherConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_lanes")]
    pub lanes: u32,
}

fn default_algorithm() -> String { ALGORITHM.to_string() }
fn default_iterations() -> u32 { 3 }
fn default_memory_kib() -> u32 { 19 * 1024 }
fn default_lanes() -> u32 { 1 }

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            iterations: default_iterations(),
            memory_kib: default_memory_kib(),
            lanes: default_lanes(),
        }
    }
}

/// Encrypts and decrypts configuration values with a fixed passphrase.
///
/// Built once at startup and only read afterwards.
///
/// # Examples
/// ```
/// use common::crypto::{CipherConfig, SecretProvider};
/// let cfg = CipherConfig { iterations: 1, memory_kib: 64, ..CipherConfig::default() };
/// let provider = SecretProvider::new("master-key", cfg).unwrap();
/// let sealed = provider.encrypt("db-password").unwrap();
/// assert_ne!(sealed, "db-password");
/// assert_eq!(provider.decrypt(&sealed).unwrap(), "db-password");
/// ```
pub struct SecretProvider {
    passphrase: Vec<u8>,
    kdf: Argon2<'static>,
}

impl std::fmt::Debug for SecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretProvider").field("passphrase", &"***").finish()
    }
}

impl SecretProvider {
    pub fn new(passphrase: &str, config: CipherConfig) -> Result<Self, CryptoError> {
        if passphrase.is_empty() {
            return Err(CryptoError::EmptyPassphrase);
        }
        if config.algorithm != ALGORITHM {
            return Err(CryptoError::UnsupportedAlgorithm(config.algorithm));
        }
        let params = Params::new(config.memory_kib, config.iterations, config.lanes, Some(KEY_LEN))
            .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
        Ok(Self {
            passphrase: passphrase.as_bytes().to_vec(),
            kdf: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    fn cipher(&self, salt: &[u8]) -> Result<Aes256Gcm, CryptoError> {
        let mut key = [0u8; KEY_LEN];
        self.kdf
            .hash_password_into(&self.passphrase, salt, &mut key)
            .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
        Aes256Gcm::new_from_slice(&key).map_err(|e| CryptoError::InvalidParams(e.to_string()))
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);

        let sealed = self
            .cipher(&salt)?
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + sealed.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(STANDARD.encode(out))
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let raw = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| CryptoError::Malformed(e.to_string()))?;
        if raw.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            return Err(CryptoError::Malformed(format!("{} bytes is too short", raw.len())));
        }
        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce, sealed) = rest.split_at(NONCE_LEN);

        let plain = self
            .cipher(salt)?
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CryptoError::Decrypt)?;
        String::from_utf8(plain).map_err(|e| CryptoError::Malformed(e.to_string()))
    }

    /// Decrypt `ENC(...)` values; anything else is returned as is.
    pub fn resolve(&self, value: &str) -> Result<String, CryptoError> {
        match unwrap_enc(value) {
            Some(inner) => self.decrypt(inner),
            None => Ok(value.to_string()),
        }
    }
}

/// Inner text of an `ENC(...)` wrapper.
pub fn unwrap_enc(value: &str) -> Option<&str> {
    value.trim().strip_prefix("ENC(")?.strip_suffix(')')
}

pub fn is_encrypted(value: &str) -> bool {
    unwrap_enc(value).is_some()
}

pub fn wrap_enc(ciphertext: &str) -> String {
    format!("ENC({ciphertext})")
}
