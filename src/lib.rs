//! tokenstash library
//!
//! Persists a single authentication token across process runs. The cache
//! module holds the contract and its backends; the cli and commands modules
//! back the `tokenstash` binary and are exposed for integration tests.

pub mod cache;
pub mod cli;
pub mod commands;

pub use cache::{FileTokenCache, MemoryTokenCache, Token, TokenCache, TokenCacheError};
