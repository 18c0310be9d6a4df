//! Error types shared by the translation core.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while configuring the manager or resolving messages.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Locale string does not match the accepted character set.
    #[error("Invalid locale '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidLocale(String),

    /// Imported structure could not be turned into a catalogue.
    #[error("File [{file}] can't be imported: {reason}")]
    Import {
        /// File passed to `import`
        file: String,
        /// What was wrong with the loaded structure
        reason: String,
    },

    /// No translator has been registered for the locale.
    #[error("Translator for [{0}] doesn't exist")]
    TranslatorNotFound(String),

    /// Key is absent from the catalogue and its whole fallback chain.
    #[error("Missing translation for '{key}' in domain '{domain}' ({locale})")]
    MissingTranslation {
        /// Requested message key
        key: String,
        /// Requested domain
        domain: String,
        /// Locale of the translator that was asked
        locale: String,
    },

    /// Loader could not find the file in any search directory.
    #[error("File [{file}] not found in {directories:?}")]
    FileNotFound {
        /// Requested file
        file: String,
        /// Directories that were searched
        directories: Vec<PathBuf>,
    },

    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse translation file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate.
pub type Result<T, E = TranslationError> = std::result::Result<T, E>;
