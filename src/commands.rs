//! Implementations of the tokenstash subcommands
//!
//! Each command works through [`FileTokenCache`] and writes its report to
//! the supplied writer, so the binary and the tests share one code path.

use chrono::{DateTime, Local};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

use crate::cache::{json_kind, FileTokenCache, Token, TokenCache, TokenCacheError};
use crate::cli::{CliError, Command, StartupConfig};

/// Runs `command` against the token file named in `config`
///
/// # Arguments
/// * `command` - The parsed subcommand
/// * `config` - Resolved startup configuration
/// * `out` - Where the report is written (stdout in the binary)
/// * `stdin` - Source for `save` when no input file is given
pub fn run<W: Write, R: Read>(
    command: &Command,
    config: &StartupConfig,
    out: &mut W,
    stdin: R,
) -> Result<(), CliError> {
    let cache = FileTokenCache::new(&config.token_path);

    match command {
        Command::Path => {
            writeln!(out, "{}", cache.path().display())?;
        }
        Command::Show => match cache.get_token()? {
            Some(token) => {
                let json =
                    serde_json::to_string_pretty(&token).map_err(TokenCacheError::Encode)?;
                writeln!(out, "{}", json)?;
            }
            None => writeln!(out, "No token cached at {}", cache.path().display())?,
        },
        Command::Status => match cache.get_token()? {
            Some(token) => {
                let saved_at = modified_time(cache.path())?;
                writeln!(
                    out,
                    "present: {} keys, saved {}",
                    token.len(),
                    saved_at.format("%Y-%m-%d %H:%M:%S")
                )?;
            }
            None => writeln!(out, "absent")?,
        },
        Command::Save { input } => {
            let text = read_input(input.as_deref(), stdin)?;
            let token = parse_token_input(&text)?;

            if config.create_parent {
                ensure_parent_dir(cache.path())?;
            }
            cache.save_token(&token)?;
            writeln!(
                out,
                "Saved token with {} keys to {}",
                token.len(),
                cache.path().display()
            )?;
        }
        Command::Clear => match fs::remove_file(cache.path()) {
            Ok(()) => {
                debug!(path = %cache.path().display(), "Removed token file");
                writeln!(out, "Removed {}", cache.path().display())?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                writeln!(out, "No token file at {}", cache.path().display())?;
            }
            Err(source) => {
                return Err(CliError::Io {
                    path: cache.path().to_path_buf(),
                    source,
                })
            }
        },
    }

    Ok(())
}

/// Parses user-supplied text into a token
///
/// # Returns
/// * `Ok(Token)` if the text is a JSON object
/// * `Err(CliError::InvalidInput)` if it is not JSON or not an object
pub fn parse_token_input(text: &str) -> Result<Token, CliError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CliError::InvalidInput(format!("not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::InvalidInput(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Reads the `save` input from a file, or from stdin for `None` and `-`
fn read_input<R: Read>(input: Option<&Path>, mut stdin: R) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Creates the directory holding `path` if it is missing
fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| CliError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Last-modified time of the token file in local time
fn modified_time(path: &Path) -> Result<DateTime<Local>, CliError> {
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(DateTime::<Local>::from(modified))
}
