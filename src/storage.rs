/// Token persistence in chrome.storage.local

use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Storage key holding the API token
pub const TOKEN_KEY: &str = "apiToken";

/// Shape of `chrome.storage.local.get("apiToken")`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    #[serde(rename = "apiToken", default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl StorageRecord {
    /// An empty string is treated as no token
    pub fn token(self) -> Option<String> {
        self.api_token.filter(|token| !token.is_empty())
    }
}

/// Single-slot store for the bearer token
#[async_trait(?Send)]
pub trait TokenStore {
    async fn load(&self) -> Result<Option<String>, StorageError>;
    async fn store(&self, token: &str) -> Result<(), StorageError>;
    /// Removing an absent token is not an error
    async fn remove(&self) -> Result<(), StorageError>;
}

/// In-memory store, for tests and non-browser hosts
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        MemoryTokenStore {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.borrow().clone())
    }

    async fn store(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        self.token.borrow_mut().take();
        Ok(())
    }
}
