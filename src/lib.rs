//! i18n-translator
//!
//! Resolves localized messages at runtime: per-locale catalogues with
//! fallback chains, plural-aware variant selection and placeholder
//! interpolation, all owned by an explicitly passed [`TranslationManager`].

pub mod catalogue;
pub mod config;
pub mod error;
pub mod loader;
pub mod locale;
pub mod log;
pub mod manager;
pub mod path;
pub mod plural;
pub mod selector;
pub mod translator;

pub use catalogue::{
    Catalogue,
    DEFAULT_DOMAIN,
    MessageCatalogue,
};
pub use error::{
    Result,
    TranslationError,
};
pub use loader::{
    JsonFileLoader,
    Loader,
    MemoryLoader,
};
pub use locale::Locale;
pub use log::{
    LogSink,
    TracingSink,
};
pub use manager::TranslationManager;
pub use plural::{
    PluralizationRules,
    Pluralize,
};
pub use selector::{
    MessageSelector,
    Select,
};
pub use translator::{
    MissingKeyPolicy,
    Translate,
    Translator,
};
