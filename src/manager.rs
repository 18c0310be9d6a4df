//! Registry of translators and fallback wiring.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::catalogue::{
    Catalogue,
    LANG_FIELD,
    MessageCatalogue,
};
use crate::config::{
    ConfigError,
    TranslationSettings,
};
use crate::error::{
    Result,
    TranslationError,
};
use crate::loader::Loader;
use crate::locale::Locale;
use crate::log::LogSink;
use crate::path::normalize_directory_separator;
use crate::plural::PluralizationRules;
use crate::selector::MessageSelector;
use crate::translator::{
    MissingKeyPolicy,
    Translator,
};

/// Owns every translator plus the shared selector and fallback catalogues.
///
/// Catalogues and translators are immutable once registered. Importing a
/// locale again builds a fresh translator and replaces the map entry. To
/// reload while readers are active, build a new manager and swap the
/// `Arc<TranslationManager>` they share.
#[derive(Debug)]
pub struct TranslationManager {
    /// Plural rules shared with the selector
    pluralization: Arc<PluralizationRules>,
    /// Selector handed to every translator
    selector: Arc<MessageSelector>,
    /// Locale used by `translator(None)`
    locale: Locale,
    /// Normalized, deduplicated search directories
    directories: Vec<PathBuf>,
    /// Fallback attached when a locale has no specific one
    default_fallback: Option<Arc<dyn Catalogue>>,
    /// Per-locale fallbacks, preferred over `default_fallback`
    language_fallbacks: HashMap<Locale, Arc<dyn Catalogue>>,
    /// Registered translators by locale
    translators: HashMap<Locale, Translator>,
    /// Turns file references into raw structures
    loader: Arc<dyn Loader>,
    /// Propagated to translators created after it is set
    logger: Option<Arc<dyn LogSink>>,
    /// Applied to translators created after it is set
    missing_key_policy: MissingKeyPolicy,
}

impl TranslationManager {
    /// Creates an empty manager with `en` as the default locale.
    #[must_use]
    pub fn new(pluralization: PluralizationRules, loader: Arc<dyn Loader>) -> Self {
        let pluralization = Arc::new(pluralization);
        let rules = Arc::clone(&pluralization);
        let selector = Arc::new(MessageSelector::new(rules));

        Self {
            pluralization,
            selector,
            locale: Locale::default(),
            directories: Vec::new(),
            default_fallback: None,
            language_fallbacks: HashMap::new(),
            translators: HashMap::new(),
            loader,
            logger: None,
            missing_key_policy: MissingKeyPolicy::default(),
        }
    }

    /// Builds a manager from settings.
    ///
    /// # Errors
    /// See [`Self::configure`].
    pub fn from_settings(
        settings: &TranslationSettings,
        pluralization: PluralizationRules,
        loader: Arc<dyn Loader>,
    ) -> Result<Self> {
        let mut manager = Self::new(pluralization, loader);
        manager.configure(settings)?;
        Ok(manager)
    }

    /// Applies settings: locale, directories and fallbacks first, then every
    /// file in `files` is imported in order.
    ///
    /// Set the logger beforehand; it is handed to translators at import time.
    /// On error the manager is left partially configured and should be dropped.
    ///
    /// # Errors
    /// - Settings validation errors
    /// - Failures loading a fallback or translation file
    pub fn configure(&mut self, settings: &TranslationSettings) -> Result<&mut Self> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.set_locale(&settings.locale)?;
        self.set_directories(&settings.directories);
        self.set_missing_key_policy(settings.missing_key_policy);

        if let Some(file) = &settings.default_fallback {
            let fallback = self.load_catalogue(file)?;
            self.set_default_fallback(Arc::new(fallback));
        }

        for (lang, file) in &settings.language_fallbacks {
            let fallback = self.load_catalogue(file)?;
            self.set_language_fallback(lang, Arc::new(fallback))?;
        }

        for file in &settings.files {
            self.import(file)?;
        }

        tracing::debug!(
            locale = %self.locale,
            translators = self.translators.len(),
            "Translation manager configured"
        );

        Ok(self)
    }

    /// Adds every directory in order; see [`Self::add_directory`].
    pub fn set_directories<S: AsRef<str>>(&mut self, directories: &[S]) -> &mut Self {
        for directory in directories {
            self.add_directory(directory.as_ref());
        }
        self
    }

    /// Adds a search directory unless its normalized form is already known.
    pub fn add_directory(&mut self, directory: &str) -> &mut Self {
        let normalized = PathBuf::from(normalize_directory_separator(directory));

        if self.directories.contains(&normalized) {
            tracing::debug!(directory = %normalized.display(), "Directory already registered");
        } else {
            tracing::debug!(directory = %normalized.display(), "Adding translation directory");
            self.directories.push(normalized);
        }
        self
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Loads `file` and builds its catalogue without registering a translator.
    ///
    /// # Errors
    /// - Loader failures
    /// - `TranslationError::Import` if `lang` is missing or not a string
    /// - `TranslationError::InvalidLocale` if `lang` is not a valid locale
    pub fn load_catalogue(&self, file: &str) -> Result<MessageCatalogue> {
        let raw = self.loader.load(file, &self.directories)?;

        let lang = match raw.get(LANG_FIELD) {
            Some(Value::String(lang)) => lang,
            Some(_) => {
                return Err(TranslationError::Import {
                    file: file.to_string(),
                    reason: "Key for language must be a string.".to_string(),
                });
            }
            None => {
                return Err(TranslationError::Import {
                    file: file.to_string(),
                    reason: "Key for language is missing.".to_string(),
                });
            }
        };
        let locale = Locale::new(lang.as_str())?;

        Ok(MessageCatalogue::from_raw(locale, &raw))
    }

    /// Imports `file` and registers a translator for its declared locale.
    ///
    /// Nothing is registered or replaced when loading fails.
    ///
    /// # Errors
    /// See [`Self::load_catalogue`].
    pub fn import(&mut self, file: &str) -> Result<&mut Self> {
        tracing::debug!(file, "Importing translation file");
        let catalogue = self.load_catalogue(file)?;
        Ok(self.add_message_catalogue(catalogue))
    }

    /// Wires fallbacks into `catalogue` and registers a translator for it.
    ///
    /// A language-specific fallback wins over the default fallback. Any
    /// translator already registered for the locale is replaced.
    pub fn add_message_catalogue(&mut self, mut catalogue: MessageCatalogue) -> &mut Self {
        let locale = catalogue.locale().clone();

        if let Some(fallback) = self.language_fallbacks.get(&locale) {
            catalogue.add_fallback_catalogue(Arc::clone(fallback));
        } else if let Some(fallback) = &self.default_fallback {
            catalogue.add_fallback_catalogue(Arc::clone(fallback));
        }

        let selector = Arc::clone(&self.selector);
        let mut translator =
            Translator::new(catalogue, selector).with_policy(self.missing_key_policy);
        if let Some(logger) = &self.logger {
            translator = translator.with_logger(Arc::clone(logger));
        }

        if self.translators.insert(locale.clone(), translator).is_some() {
            tracing::debug!(locale = %locale, "Replaced translator");
        } else {
            tracing::debug!(locale = %locale, "Registered translator");
        }
        self
    }

    pub fn set_default_fallback(&mut self, fallback: Arc<dyn Catalogue>) -> &mut Self {
        self.default_fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn default_fallback(&self) -> Option<&Arc<dyn Catalogue>> {
        self.default_fallback.as_ref()
    }

    /// Registers the fallback catalogue consulted for `lang`.
    ///
    /// Only affects catalogues added afterwards.
    ///
    /// # Errors
    /// `TranslationError::InvalidLocale` if `lang` is not a valid locale.
    pub fn set_language_fallback(
        &mut self,
        lang: &str,
        fallback: Arc<dyn Catalogue>,
    ) -> Result<&mut Self> {
        self.language_fallbacks.insert(Locale::new(lang)?, fallback);
        Ok(self)
    }

    #[must_use]
    pub fn language_fallback(&self, lang: &str) -> Option<&Arc<dyn Catalogue>> {
        self.language_fallbacks.get(lang)
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Sets the manager-wide default locale.
    ///
    /// # Errors
    /// `TranslationError::InvalidLocale` if `locale` fails validation.
    pub fn set_locale(&mut self, locale: &str) -> Result<&mut Self> {
        self.locale = Locale::new(locale)?;
        Ok(self)
    }

    /// Returns the translator for `locale`, or for the default locale.
    ///
    /// # Errors
    /// `TranslationError::TranslatorNotFound` if none is registered.
    pub fn translator(&self, locale: Option<&str>) -> Result<&Translator> {
        let locale = locale.unwrap_or_else(|| self.locale.as_str());
        self.translators
            .get(locale)
            .ok_or_else(|| TranslationError::TranslatorNotFound(locale.to_string()))
    }

    #[must_use]
    pub fn has_translator(&self, locale: &str) -> bool {
        self.translators.contains_key(locale)
    }

    /// Locales with a registered translator, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.translators.keys().collect();
        locales.sort();
        locales
    }

    #[must_use]
    pub fn pluralization(&self) -> &PluralizationRules {
        &self.pluralization
    }

    #[must_use]
    pub const fn selector(&self) -> &Arc<MessageSelector> {
        &self.selector
    }

    /// Sets the logger handed to translators created afterwards.
    pub fn set_logger(&mut self, logger: Arc<dyn LogSink>) -> &mut Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the missing-key policy for translators created afterwards.
    pub const fn set_missing_key_policy(&mut self, policy: MissingKeyPolicy) -> &mut Self {
        self.missing_key_policy = policy;
        self
    }
}
