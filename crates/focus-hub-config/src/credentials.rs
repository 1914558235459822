//! Encrypted token persistence
//!
//! The token is stored under `github_token` as `{ "iv": [..12 bytes..],
//! "data": [..ciphertext + tag..] }`, encrypted with AES-256-GCM. The key is
//! derived with PBKDF2-HMAC-SHA256 from a passphrase compiled into the
//! binary, so this only keeps the token out of plain sight on disk.

use crate::error::StorageError;
use crate::json_store::JsonStore;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const TOKEN_KEY: &str = "github_token";
const PASSPHRASE: &[u8] = b"focushub-internal-secret-material-v1";
const SALT: &[u8] = b"focushub-salt";
const PBKDF2_ROUNDS: u32 = 100_000;
const IV_LEN: usize = 12;

/// Persisted personal access token
pub trait CredentialStore: Send + Sync {
    /// The stored token, or `None` when absent or unreadable
    fn load_token(&mut self) -> Option<String>;

    fn save_token(&mut self, token: &str) -> Result<(), StorageError>;

    fn clear_token(&mut self) -> Result<(), StorageError>;
}

/// On-disk shape of the encrypted token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    pub iv: Vec<u8>,
    pub data: Vec<u8>,
}

/// AES-256-GCM with the derived application key
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    pub fn new() -> Self {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(PASSPHRASE, SALT, PBKDF2_ROUNDS, &mut key);
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        }
    }

    /// Encrypt with a fresh random IV
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedRecord, StorageError> {
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill(&mut iv);

        let data = self
            .cipher
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|_| StorageError::Encrypt)?;

        Ok(EncryptedRecord {
            iv: iv.to_vec(),
            data,
        })
    }

    pub fn decrypt(&self, record: &EncryptedRecord) -> Result<String, StorageError> {
        if record.iv.len() != IV_LEN {
            return Err(StorageError::Decrypt);
        }

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&record.iv), record.data.as_slice())
            .map_err(|_| StorageError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_| StorageError::Decrypt)
    }
}

impl Default for TokenCipher {
    fn default() -> Self {
        Self::new()
    }
}

/// Token stored encrypted in `secrets.json`
pub struct EncryptedCredentialStore {
    store: JsonStore,
    cipher: Option<TokenCipher>,
}

impl EncryptedCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
            cipher: None,
        }
    }

    /// Key derivation is slow, so it runs once on first use
    fn cipher(&mut self) -> &TokenCipher {
        self.cipher.get_or_insert_with(TokenCipher::new)
    }

    fn read_token(&mut self) -> Result<Option<String>, StorageError> {
        let Some(value) = self.store.get(TOKEN_KEY)? else {
            return Ok(None);
        };
        let record: EncryptedRecord =
            serde_json::from_value(value).map_err(|_| StorageError::Decrypt)?;
        self.cipher().decrypt(&record).map(Some)
    }
}

impl CredentialStore for EncryptedCredentialStore {
    fn load_token(&mut self) -> Option<String> {
        match self.read_token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Ignoring stored token: {}", e);
                None
            }
        }
    }

    fn save_token(&mut self, token: &str) -> Result<(), StorageError> {
        let record = self.cipher().encrypt(token)?;
        self.store.set(TOKEN_KEY, serde_json::to_value(record)?)?;
        log::info!("Stored encrypted token");
        Ok(())
    }

    fn clear_token(&mut self) -> Result<(), StorageError> {
        self.store.delete(TOKEN_KEY)?;
        log::info!("Removed stored token");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryCredentials {
    token: Option<String>,
    clears: usize,
}

/// In-memory credential store; clones share contents
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<Mutex<MemoryCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().token = Some(token.into());
        store
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// How many times the token was cleared
    pub fn clears(&self) -> usize {
        self.lock().clears
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryCredentials> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_token(&mut self) -> Option<String> {
        self.token()
    }

    fn save_token(&mut self, token: &str) -> Result<(), StorageError> {
        self.lock().token = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&mut self) -> Result<(), StorageError> {
        let mut inner = self.lock();
        inner.token = None;
        inner.clears += 1;
        Ok(())
    }
}
