use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::is_valid_locale;
use crate::translator::MissingKeyPolicy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "files[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// Locale used when no explicit locale is requested.
    pub locale: String,

    /// Search directories for relative file names, in priority order.
    pub directories: Vec<String>,

    /// Translation files imported in order; later files replace earlier
    /// translators for the same locale.
    pub files: Vec<String>,

    pub missing_key_policy: MissingKeyPolicy,

    /// File loaded as the global fallback catalogue.
    pub default_fallback: Option<String>,

    /// Locale -> file loaded as that locale's fallback catalogue.
    /// Takes precedence over `default_fallback`.
    pub language_fallbacks: BTreeMap<String, String>,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            directories: Vec::new(),
            files: Vec::new(),
            missing_key_policy: MissingKeyPolicy::default(),
            default_fallback: None,
            language_fallbacks: BTreeMap::new(),
        }
    }
}

impl TranslationSettings {
    /// # Errors
    /// - Invalid locale
    /// - Empty file or directory entry
    /// - Invalid locale key in `languageFallbacks`
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !is_valid_locale(&self.locale) {
            errors.push(ValidationError::new(
                "locale",
                format!(
                    "Invalid locale '{}'. Use letters, digits, '_' or '-', for example: \"en\" or \"de_AT\"",
                    self.locale
                ),
            ));
        }

        for (index, directory) in self.directories.iter().enumerate() {
            if directory.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("directories[{index}]"),
                    "The directory cannot be empty",
                ));
            }
        }

        for (index, file) in self.files.iter().enumerate() {
            if file.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("files[{index}]"),
                    "The file cannot be empty. Example: \"en.json\"",
                ));
            }
        }

        if let Some(file) = &self.default_fallback
            && file.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "defaultFallback",
                "The file cannot be empty. Specify a file, or remove this field",
            ));
        }

        for (locale, file) in &self.language_fallbacks {
            if !is_valid_locale(locale) {
                errors.push(ValidationError::new(
                    format!("languageFallbacks.{locale}"),
                    format!("Invalid locale '{locale}'"),
                ));
            }
            if file.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languageFallbacks.{locale}"),
                    "The file cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
