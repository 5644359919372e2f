use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::storage::{
    KeyValueStorage, MemoryStorage, SHOP_TOKEN_KEY, StorageError, StorageResult,
};

/// The single durable token slot shared by the HTTP layer and the session
/// controller.
///
/// Reads are served from memory; every write goes to storage first so the
/// cache never claims a token the next process start would not see.
#[derive(Clone)]
pub struct TokenCell {
    inner: Arc<TokenCellInner>,
}

struct TokenCellInner {
    storage: Arc<dyn KeyValueStorage>,
    cached: RwLock<Option<String>>,
}

impl fmt::Debug for TokenCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCell")
            .field("storage", &self.inner.storage)
            .field("has_token", &self.is_present())
            .finish()
    }
}

impl TokenCell {
    /// Open the cell, reading any token persisted by a previous run.
    ///
    /// A corrupted store is discarded and the cell starts empty, so the user
    /// can still log in again.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> StorageResult<Self> {
        let stored = match storage.get_item(SHOP_TOKEN_KEY) {
            Ok(stored) => stored.filter(|token| !token.is_empty()),
            Err(err @ StorageError::Corrupted { .. }) => {
                log::warn!("[TokenCell] Discarding unreadable session: {}", err);
                storage.remove_item(SHOP_TOKEN_KEY)?;
                None
            }
            Err(err) => return Err(err),
        };
        if stored.is_some() {
            log::debug!("[TokenCell] Found persisted token");
        }
        Ok(Self {
            inner: Arc::new(TokenCellInner {
                storage,
                cached: RwLock::new(stored),
            }),
        })
    }

    /// Empty cell backed by memory only.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(TokenCellInner {
                storage: Arc::new(MemoryStorage::new()),
                cached: RwLock::new(None),
            }),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner.cached.read().clone()
    }

    pub fn is_present(&self) -> bool {
        self.inner.cached.read().is_some()
    }

    pub fn set(&self, token: &str) -> StorageResult<()> {
        let mut cached = self.inner.cached.write();
        self.inner.storage.set_item(SHOP_TOKEN_KEY, token)?;
        *cached = Some(token.to_string());
        Ok(())
    }

    /// Forget the token. Memory is cleared even when storage fails.
    pub fn clear(&self) -> StorageResult<()> {
        let mut cached = self.inner.cached.write();
        *cached = None;
        self.inner.storage.remove_item(SHOP_TOKEN_KEY)
    }

    /// Clear only if the cell still holds `token`.
    ///
    /// Returns whether anything was cleared. Used when a rejection arrives
    /// for a token that may already have been replaced.
    pub fn clear_if(&self, token: &str) -> StorageResult<bool> {
        let mut cached = self.inner.cached.write();
        if cached.as_deref() != Some(token) {
            return Ok(false);
        }
        *cached = None;
        self.inner.storage.remove_item(SHOP_TOKEN_KEY)?;
        Ok(true)
    }
}
