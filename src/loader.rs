//! Loading raw translation structures.
//!
//! The translation core never touches the filesystem itself; everything
//! goes through a [`Loader`], which turns a file reference into a raw
//! `{ "lang": ..., "message": { ... } }` object.

use std::collections::HashMap;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use crate::error::{
    Result,
    TranslationError,
};

/// Raw key/value structure produced by a loader.
pub type RawTranslation = Map<String, Value>;

/// Turns a file reference into a raw translation structure.
pub trait Loader: fmt::Debug + Send + Sync {
    /// Loads `file`, searching `directories` in order for relative paths.
    ///
    /// # Errors
    /// Lookup, I/O or parse failures specific to the loader.
    fn load(&self, file: &str, directories: &[PathBuf]) -> Result<RawTranslation>;
}

/// Reads JSON translation files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileLoader;

impl JsonFileLoader {
    /// Finds `file` on disk.
    ///
    /// Absolute paths are used as-is. Relative paths are tried against each
    /// directory in order, then against the working directory.
    fn resolve(file: &str, directories: &[PathBuf]) -> Result<PathBuf> {
        let path = Path::new(file);

        if path.is_absolute() {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
        } else if let Some(found) =
            directories.iter().map(|dir| dir.join(path)).find(|candidate| candidate.is_file())
        {
            return Ok(found);
        } else if path.is_file() {
            return Ok(path.to_path_buf());
        }

        Err(TranslationError::FileNotFound {
            file: file.to_string(),
            directories: directories.to_vec(),
        })
    }
}

impl Loader for JsonFileLoader {
    fn load(&self, file: &str, directories: &[PathBuf]) -> Result<RawTranslation> {
        let path = Self::resolve(file, directories)?;
        tracing::debug!(path = %path.display(), "Loading translation file");

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(TranslationError::Import {
                file: file.to_string(),
                reason: "top-level value is not an object".to_string(),
            }),
        }
    }
}

/// Serves pre-built structures from memory, keyed by file name.
///
/// Useful for embedded translations and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    /// file name -> raw structure
    files: HashMap<String, Value>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `raw` under `file`; non-object values are rejected at load time.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>, raw: Value) -> Self {
        self.files.insert(file.into(), raw);
        self
    }
}

impl Loader for MemoryLoader {
    fn load(&self, file: &str, directories: &[PathBuf]) -> Result<RawTranslation> {
        match self.files.get(file) {
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(TranslationError::Import {
                file: file.to_string(),
                reason: "top-level value is not an object".to_string(),
            }),
            None => Err(TranslationError::FileNotFound {
                file: file.to_string(),
                directories: directories.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn loads_from_first_matching_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join("en.json"), r#"{"lang": "en", "message": {"a": "second"}}"#)
            .unwrap();

        let directories = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let raw = JsonFileLoader.load("en.json", &directories).unwrap();

        expect_that!(raw.get("lang"), some(eq(&json!("en"))));

        fs::write(first.path().join("en.json"), r#"{"lang": "en", "message": {"a": "first"}}"#)
            .unwrap();
        let raw = JsonFileLoader.load("en.json", &directories).unwrap();
        expect_that!(raw.get("message"), some(eq(&json!({"a": "first"}))));
    }

    #[googletest::test]
    fn loads_absolute_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("de.json");
        fs::write(&file, r#"{"lang": "de"}"#).unwrap();

        let raw = JsonFileLoader.load(&file.to_string_lossy(), &[]).unwrap();

        expect_that!(raw.get("lang"), some(eq(&json!("de"))));
    }

    #[googletest::test]
    fn missing_file_reports_searched_directories() {
        let dir = TempDir::new().unwrap();
        let directories = vec![dir.path().to_path_buf()];

        let result = JsonFileLoader.load("missing.json", &directories);

        assert!(matches!(
            result,
            Err(TranslationError::FileNotFound { ref file, ref directories })
                if file == "missing.json" && directories.len() == 1
        ));
    }

    #[googletest::test]
    fn invalid_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "invalid json").unwrap();

        let result = JsonFileLoader.load("bad.json", &[dir.path().to_path_buf()]);

        assert!(matches!(result, Err(TranslationError::Parse(_))));
    }

    #[googletest::test]
    fn non_object_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("list.json"), "[1, 2]").unwrap();

        let result = JsonFileLoader.load("list.json", &[dir.path().to_path_buf()]);

        assert!(matches!(result, Err(TranslationError::Import { .. })));
    }

    #[googletest::test]
    fn memory_loader_serves_registered_files() {
        let loader = MemoryLoader::new().with_file("en", json!({"lang": "en"}));

        expect_that!(loader.load("en", &[]).unwrap().get("lang"), some(eq(&json!("en"))));
        assert!(matches!(loader.load("fr", &[]), Err(TranslationError::FileNotFound { .. })));

        let loader = MemoryLoader::new().with_file("list", json!([1, 2]));
        assert!(matches!(loader.load("list", &[]), Err(TranslationError::Import { .. })));
    }
}
