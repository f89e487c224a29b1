//! File-backed token cache
//!
//! Stores the token as a pretty-printed JSON object in a single file. Every
//! read goes to disk, so the result always reflects what is currently stored.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{Result, TokenCacheError};
use super::token::{is_empty_value, json_kind, Token, TokenCache};

/// Persists a token to a JSON file at a fixed path
///
/// The path is used exactly as given. The cache never creates directories,
/// so saving into a missing directory fails with [`TokenCacheError::Write`].
#[derive(Debug, Clone)]
pub struct FileTokenCache {
    /// Location of the token file
    path: PathBuf,
}

impl FileTokenCache {
    /// Creates a cache backed by the file at `path`
    ///
    /// Nothing is touched on disk until the first save or read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turns a parsed document into a token, treating empty values as absent
    fn token_from_value(&self, value: Value) -> Result<Option<Token>> {
        match value {
            value if is_empty_value(&value) => Ok(None),
            Value::Object(map) => Ok(Some(map)),
            other => Err(TokenCacheError::NotAnObject {
                path: self.path.clone(),
                found: json_kind(&other),
            }),
        }
    }
}

impl TokenCache for FileTokenCache {
    /// Writes the token to disk, truncating any previous contents
    fn save_token(&self, data: &Token) -> Result<()> {
        let json = serde_json::to_string_pretty(data).map_err(TokenCacheError::Encode)?;

        fs::write(&self.path, json).map_err(|source| TokenCacheError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), keys = data.len(), "Saved token");
        Ok(())
    }

    /// Reads the token back from disk
    ///
    /// A missing file, or a path running through a regular file, is reported
    /// as `Ok(None)`. Malformed JSON is an error.
    fn get_token(&self) -> Result<Option<Token>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                debug!(path = %self.path.display(), "No token file");
                return Ok(None);
            }
            Err(source) => {
                return Err(TokenCacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value: Value =
            serde_json::from_str(&content).map_err(|source| TokenCacheError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let token = self.token_from_value(value)?;
        debug!(
            path = %self.path.display(),
            present = token.is_some(),
            "Loaded token file"
        );
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn token(value: Value) -> Token {
        value.as_object().cloned().expect("test token must be an object")
    }

    fn create_test_cache() -> (FileTokenCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileTokenCache::new(temp_dir.path().join("token.json"));
        (cache, temp_dir)
    }

    #[test]
    fn test_get_token_returns_none_for_missing_file() {
        let (cache, _temp_dir) = create_test_cache();

        let result = cache.get_token().expect("Missing file should not be an error");

        assert!(result.is_none(), "Should return None for missing file");
    }

    #[test]
    fn test_save_then_get_roundtrip() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(cache.get_token().unwrap().is_none());

        let data = token(json!({"access_token": "abc", "expires": 3600}));
        cache.save_token(&data).expect("Save should succeed");

        let result = cache.get_token().expect("Get should succeed");
        assert_eq!(result, Some(data));
    }

    #[test]
    fn test_save_writes_readable_json_file() {
        let (cache, temp_dir) = create_test_cache();
        let data = token(json!({"access_token": "abc", "refresh_token": "def"}));

        cache.save_token(&data).expect("Save should succeed");

        let content = fs::read_to_string(temp_dir.path().join("token.json"))
            .expect("Should read file");
        assert!(content.contains("\"access_token\""));
        assert!(content.contains("\"abc\""));
        let parsed: Value = serde_json::from_str(&content).expect("File should hold valid JSON");
        assert_eq!(parsed, Value::Object(data));
    }

    #[test]
    fn test_nested_values_survive_roundtrip() {
        let (cache, _temp_dir) = create_test_cache();
        let data = token(json!({
            "access_token": "abc",
            "expires": 1767225600.5,
            "scopes": ["read", "write"],
            "client": {"id": "xyz", "secret": null},
            "offline": true
        }));

        cache.save_token(&data).expect("Save should succeed");

        assert_eq!(cache.get_token().unwrap(), Some(data));
    }

    #[test]
    fn test_floats_survive_roundtrip_exactly() {
        let (cache, _temp_dir) = create_test_cache();
        let mut samples = vec![
            1.0715660391465826e-75,
            0.1,
            1.0 / 3.0,
            f64::MIN_POSITIVE,
            f64::MAX,
            -2.2250738585072011e-308,
            5e-324,
        ];

        // Deterministic xorshift over the bit patterns, skipping NaN and infinity
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        while samples.len() < 2000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let value = f64::from_bits(state);
            if value.is_finite() {
                samples.push(value);
            }
        }

        for value in samples {
            let data = token(json!({"expires": value}));
            cache.save_token(&data).expect("Save should succeed");

            let result = cache.get_token().unwrap().expect("Token should be present");
            assert_eq!(
                result["expires"].as_f64().map(f64::to_bits),
                Some(value.to_bits()),
                "{:e} did not survive the roundtrip",
                value
            );
            assert_eq!(result, data);
        }
    }

    #[test]
    fn test_second_save_overwrites_instead_of_merging() {
        let (cache, _temp_dir) = create_test_cache();
        let first = token(json!({"access_token": "first", "refresh_token": "keep-me?"}));
        let second = token(json!({"access_token": "second"}));

        cache.save_token(&first).expect("First save should succeed");
        cache.save_token(&second).expect("Second save should succeed");

        let result = cache.get_token().unwrap().expect("Token should be present");
        assert_eq!(result, second);
        assert!(!result.contains_key("refresh_token"), "Old keys must not survive");
    }

    #[test]
    fn test_empty_token_reads_back_as_none() {
        let (cache, _temp_dir) = create_test_cache();

        cache.save_token(&Token::new()).expect("Save should succeed");

        assert!(cache.path().exists(), "Empty token is still written to disk");
        assert!(cache.get_token().unwrap().is_none());
    }

    #[test]
    fn test_repeated_reads_return_same_value() {
        let (cache, _temp_dir) = create_test_cache();
        cache
            .save_token(&token(json!({"access_token": "abc"})))
            .expect("Save should succeed");

        let first = cache.get_token().unwrap();
        let second = cache.get_token().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reads_reflect_external_changes() {
        let (cache, _temp_dir) = create_test_cache();
        cache
            .save_token(&token(json!({"access_token": "old"})))
            .expect("Save should succeed");

        fs::write(cache.path(), r#"{"access_token": "new"}"#).expect("Should write file");

        assert_eq!(
            cache.get_token().unwrap(),
            Some(token(json!({"access_token": "new"})))
        );
    }

    #[test]
    fn test_malformed_file_returns_error() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), r#"{"access_token": "ab"#).expect("Should write file");

        let result = cache.get_token();

        assert!(
            matches!(result, Err(TokenCacheError::Malformed { .. })),
            "Truncated JSON should be a parse error, got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), "").expect("Should write file");

        assert!(matches!(
            cache.get_token(),
            Err(TokenCacheError::Malformed { .. })
        ));
    }

    #[test]
    fn test_falsy_documents_read_as_none() {
        let (cache, _temp_dir) = create_test_cache();

        for document in ["null", "{}", "[]", "false", "0", "\"\""] {
            fs::write(cache.path(), document).expect("Should write file");
            assert!(
                cache.get_token().unwrap().is_none(),
                "{} should read as no token",
                document
            );
        }
    }

    #[test]
    fn test_non_object_document_returns_error() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), r#"["access_token", "abc"]"#).expect("Should write file");

        match cache.get_token() {
            Err(TokenCacheError::NotAnObject { found, .. }) => assert_eq!(found, "an array"),
            other => panic!("Expected NotAnObject, got {:?}", other),
        }
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing").join("token.json");
        let cache = FileTokenCache::new(&path);

        let result = cache.save_token(&token(json!({"access_token": "abc"})));

        assert!(matches!(result, Err(TokenCacheError::Write { .. })));
        assert!(!path.parent().unwrap().exists(), "Directory must not be created");
    }

    #[test]
    fn test_get_from_missing_directory_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileTokenCache::new(temp_dir.path().join("missing").join("token.json"));

        assert!(cache.get_token().unwrap().is_none());
    }

    #[test]
    fn test_get_through_regular_file_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "plain file").expect("Should write file");
        let cache = FileTokenCache::new(blocker.join("token.json"));

        assert!(cache.get_token().unwrap().is_none());
    }

    #[test]
    fn test_path_is_a_directory_returns_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = FileTokenCache::new(temp_dir.path());

        assert!(matches!(cache.get_token(), Err(TokenCacheError::Read { .. })));
    }

    #[test]
    fn test_new_keeps_path_verbatim() {
        let cache = FileTokenCache::new("relative/dir/token.json");

        assert_eq!(cache.path(), Path::new("relative/dir/token.json"));
        assert!(!Path::new("relative").exists(), "Construction must not touch disk");
    }
}
