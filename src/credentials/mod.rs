//! API credential lifecycle
//!
//! At most one credential, kept in a fixed store slot. `Absent` ⇄ `Present`
//! through explicit `save` / `clear`; the state is re-read from the store
//! after every transition.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreBackend, StoreError};

use tracing::info;

/// Store slot holding the API key
pub const CREDENTIAL_KEY: &str = "openai_api_key";

/// Credential errors
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Please enter a valid API key.")]
    Empty,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Credential presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Absent,
    Present,
}

/// Credential manager over a key/value store
#[derive(Debug)]
pub struct Credentials<S> {
    store: S,
}

impl<S: KeyValueStore> Credentials<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored credential, if any (empty values count as absent)
    pub fn value(&self) -> Result<Option<String>, CredentialError> {
        Ok(self
            .store
            .get(CREDENTIAL_KEY)?
            .filter(|value| !value.is_empty()))
    }

    pub fn state(&self) -> Result<CredentialState, CredentialError> {
        Ok(match self.value()? {
            Some(_) => CredentialState::Present,
            None => CredentialState::Absent,
        })
    }

    /// Persist `value`, replacing any existing credential
    ///
    /// An empty value is rejected and leaves the state unchanged.
    pub fn save(&self, value: &str) -> Result<CredentialState, CredentialError> {
        if value.is_empty() {
            return Err(CredentialError::Empty);
        }
        self.store.set(CREDENTIAL_KEY, value)?;
        info!("api key saved");
        self.state()
    }

    /// Erase the stored credential
    pub fn clear(&self) -> Result<CredentialState, CredentialError> {
        self.store.remove(CREDENTIAL_KEY)?;
        info!("api key removed");
        self.state()
    }
}
