//! Token cache for persisting authentication tokens across runs
//!
//! [`TokenCache`] is the contract every backend implements: save one token,
//! get it back later. [`FileTokenCache`] stores it as a JSON file on disk and
//! [`MemoryTokenCache`] keeps it in process memory. A token that was never
//! saved, or that is empty, comes back as `Ok(None)` rather than an error.

mod error;
mod file;
mod memory;
mod token;

pub use error::{Result, TokenCacheError};
pub use file::FileTokenCache;
pub use memory::MemoryTokenCache;
pub use token::{is_empty_value, json_kind, Token, TokenCache};
