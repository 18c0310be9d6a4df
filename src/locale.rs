//! Validated locale identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::TranslationError;

/// Locale identifier such as `en`, `de_AT` or `sr-Cyrl-BA`.
///
/// Non-empty and restricted to ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Validates `locale` and wraps it.
    ///
    /// # Errors
    /// `TranslationError::InvalidLocale` if the string is empty or contains
    /// characters outside the allowed set.
    pub fn new(locale: impl Into<String>) -> Result<Self, TranslationError> {
        let locale = locale.into();
        if !is_valid_locale(&locale) {
            return Err(TranslationError::InvalidLocale(locale));
        }
        Ok(Self(locale))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`de_AT` -> `de`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split(['_', '-']).next().unwrap_or(&self.0)
    }
}

/// Returns true if `locale` is acceptable as a locale identifier.
#[must_use]
pub fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty() && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Default for Locale {
    fn default() -> Self {
        Self(String::from("en"))
    }
}

impl FromStr for Locale {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Locale {
    type Error = TranslationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
