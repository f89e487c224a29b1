//! Command-line interface parsing for tokenstash
//!
//! This module handles parsing of CLI arguments using clap and resolves the
//! token file location, falling back to an XDG-compliant cache directory
//! when no `--file` is given.

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::cache::TokenCacheError;

/// File name used inside the default cache directory
pub const DEFAULT_FILE_NAME: &str = "token.json";

/// Error types for the command-line tool
#[derive(Debug, Error)]
pub enum CliError {
    /// No `--file` was given and the platform cache directory is unknown
    #[error("Could not determine a cache directory; pass --file or set TOKENSTASH_FILE")]
    NoCacheDir,

    /// The token supplied to `save` is not a JSON object
    #[error("Invalid token input: {0}")]
    InvalidInput(String),

    /// Filesystem operation outside the cache itself failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to stdout or reading stdin failed
    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),

    /// The token cache reported an error
    #[error(transparent)]
    Cache(#[from] TokenCacheError),
}

/// tokenstash - inspect and seed a cached authentication token
#[derive(Parser, Debug)]
#[command(name = "tokenstash")]
#[command(about = "Inspect and seed a cached authentication token")]
#[command(version)]
pub struct Cli {
    /// Token file to use instead of the default cache location
    #[arg(long, global = true, env = "TOKENSTASH_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Actions the tool can perform on the token file
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the token file path
    Path,
    /// Print the cached token as JSON
    Show,
    /// Report whether a token is cached
    Status,
    /// Save a JSON object as the cached token
    ///
    /// Examples:
    ///   tokenstash save token.json      # Read from a file
    ///   echo '{"access_token":"abc"}' | tokenstash save
    Save {
        /// File to read the token from; `-` or omitted reads stdin
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },
    /// Delete the token file
    Clear,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Where the token lives
    pub token_path: PathBuf,
    /// Whether the parent directory should be created before saving
    ///
    /// Only set for the default location; an explicit path is used as-is.
    pub create_parent: bool,
}

/// Returns the default token file path
///
/// Uses `~/.cache/tokenstash/token.json` on Linux, or the equivalent platform
/// cache directory elsewhere. Returns `None` if there is no home directory.
pub fn default_token_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "tokenstash")?;
    Some(project_dirs.cache_dir().join(DEFAULT_FILE_NAME))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` pointing at `--file` or the default location
    /// * `Err(CliError::NoCacheDir)` if neither is available
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        match &cli.file {
            Some(path) => Ok(StartupConfig {
                token_path: path.clone(),
                create_parent: false,
            }),
            None => {
                let token_path = default_token_path().ok_or(CliError::NoCacheDir)?;
                Ok(StartupConfig {
                    token_path,
                    create_parent: true,
                })
            }
        }
    }
}
