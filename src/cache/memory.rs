//! In-process token cache
//!
//! Keeps the token in memory for the lifetime of the value. Handy for
//! callers that want the [`TokenCache`] behaviour without touching disk.

use std::sync::{Mutex, PoisonError};

use super::error::Result;
use super::token::{Token, TokenCache};

/// Holds a single token behind a mutex
#[derive(Debug, Default)]
pub struct MemoryTokenCache {
    token: Mutex<Option<Token>>,
}

impl MemoryTokenCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenCache for MemoryTokenCache {
    fn save_token(&self, data: &Token) -> Result<()> {
        let mut slot = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(data.clone());
        Ok(())
    }

    fn get_token(&self) -> Result<Option<Token>> {
        let slot = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.as_ref().filter(|token| !token.is_empty()).cloned())
    }
}
