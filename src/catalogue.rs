//! Per-locale message storage with fallback chains.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{
    Map,
    Value,
};

use crate::locale::Locale;

/// Domain used when a caller does not name one.
pub const DEFAULT_DOMAIN: &str = "messages";

/// Field of an imported structure that holds the default domain.
pub const MESSAGE_FIELD: &str = "message";

/// Field of an imported structure that declares the locale.
pub const LANG_FIELD: &str = "lang";

/// Read access to a locale's messages and its fallback chain.
pub trait Catalogue: fmt::Debug + Send + Sync {
    fn locale(&self) -> &Locale;

    /// Looks `key` up in this catalogue only, ignoring fallbacks.
    fn get_own(&self, key: &str, domain: &str) -> Option<&str>;

    /// Catalogues consulted, in order, when a key is missing locally.
    fn fallbacks(&self) -> &[Arc<dyn Catalogue>];

    /// Resolves `key` through this catalogue and then its fallbacks.
    ///
    /// Resolution is depth-first in attachment order, so a fallback's own
    /// fallbacks are exhausted before the next sibling is consulted.
    fn get(&self, key: &str, domain: &str) -> Option<&str> {
        self.get_own(key, domain)
            .or_else(|| self.fallbacks().iter().find_map(|fallback| fallback.get(key, domain)))
    }

    fn has(&self, key: &str, domain: &str) -> bool {
        self.get(key, domain).is_some()
    }
}

/// Message store for one locale.
///
/// Built during configuration and shared behind an `Arc` afterwards. Since a
/// catalogue can only gain fallbacks before it is shared, a chain can never
/// loop back onto itself.
#[derive(Debug, Clone)]
pub struct MessageCatalogue {
    /// Locale the messages are written in
    locale: Locale,
    /// domain -> key -> raw message
    messages: HashMap<String, HashMap<String, String>>,
    /// Consulted in order on a local miss
    fallbacks: Vec<Arc<dyn Catalogue>>,
}

impl MessageCatalogue {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale, messages: HashMap::new(), fallbacks: Vec::new() }
    }

    /// Builds a catalogue from an imported structure.
    ///
    /// The `message` field fills [`DEFAULT_DOMAIN`]; every other object field
    /// becomes a domain of the same name. `lang` and scalar fields are skipped.
    #[must_use]
    pub fn from_raw(locale: Locale, raw: &Map<String, Value>) -> Self {
        let mut catalogue = Self::new(locale);

        for (field, value) in raw {
            if field == LANG_FIELD {
                continue;
            }
            if !value.is_object() {
                tracing::debug!(field = %field, "Skipping non-object field in translation data");
                continue;
            }

            let domain = if field == MESSAGE_FIELD { DEFAULT_DOMAIN } else { field.as_str() };
            catalogue.add_messages(domain, flatten_messages(value, "."));
        }

        catalogue
    }

    /// Adds (or overrides) messages in `domain`.
    pub fn add_messages(&mut self, domain: &str, messages: HashMap<String, String>) {
        self.messages.entry(domain.to_string()).or_default().extend(messages);
    }

    /// Builder form of [`Self::add_messages`].
    #[must_use]
    pub fn with_messages<K, V>(
        mut self,
        domain: &str,
        messages: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_messages(domain, messages.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Appends a fallback catalogue; earlier fallbacks take priority.
    ///
    /// Attaching the same catalogue twice is a no-op.
    pub fn add_fallback_catalogue(&mut self, fallback: Arc<dyn Catalogue>) {
        if self.fallbacks.iter().any(|existing| Arc::ptr_eq(existing, &fallback)) {
            tracing::debug!(locale = %self.locale, "Fallback catalogue already attached");
            return;
        }
        tracing::debug!(
            locale = %self.locale,
            fallback = %fallback.locale(),
            "Attaching fallback catalogue"
        );
        self.fallbacks.push(fallback);
    }

    /// Builder form of [`Self::add_fallback_catalogue`].
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn Catalogue>) -> Self {
        self.add_fallback_catalogue(fallback);
        self
    }

    /// Domains defined in this catalogue (not its fallbacks), sorted.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }

    /// All messages of `domain` defined in this catalogue.
    #[must_use]
    pub fn all(&self, domain: &str) -> Option<&HashMap<String, String>> {
        self.messages.get(domain)
    }
}

impl Catalogue for MessageCatalogue {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn get_own(&self, key: &str, domain: &str) -> Option<&str> {
        self.messages.get(domain)?.get(key).map(String::as_str)
    }

    fn fallbacks(&self) -> &[Arc<dyn Catalogue>] {
        &self.fallbacks
    }
}

/// Flattens a nested message document into a key → template map.
///
/// Object members are joined with `separator`, array items are addressed
/// as `key[i]`. Strings are stored verbatim, numbers and booleans are
/// stored as their JSON text. `null` marks an untranslated entry and is
/// left out so lookups fall through to the fallback chain.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_translator::catalogue::flatten_messages;
///
/// let json = json!({
///     "user": {
///         "login": "Log in",
///         "logout": null
///     }
/// });
///
/// let flattened = flatten_messages(&json, ".");
/// assert_eq!(flattened.get("user.login"), Some(&"Log in".to_string()));
/// assert!(!flattened.contains_key("user.logout"));
/// ```
#[must_use]
pub fn flatten_messages(json: &Value, separator: &str) -> HashMap<String, String> {
    let mut templates = HashMap::new();
    let mut pending: Vec<(String, &Value)> = match json {
        Value::Object(map) => map.iter().map(|(key, value)| (key.clone(), value)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("[{index}]"), value))
            .collect(),
        _ => return templates,
    };

    while let Some((key, value)) = pending.pop() {
        match value {
            Value::Object(map) => pending.extend(
                map.iter()
                    .map(|(child, value)| (format!("{key}{separator}{child}"), value)),
            ),
            Value::Array(items) => pending.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (format!("{key}[{index}]"), value)),
            ),
            Value::String(template) => {
                templates.insert(key, template.clone());
            }
            Value::Null => {}
            Value::Bool(_) | Value::Number(_) => {
                templates.insert(key, value.to_string());
            }
        }
    }

    templates
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn locale(s: &str) -> Locale {
        Locale::new(s).unwrap()
    }

    fn catalogue(loc: &str, pairs: &[(&str, &str)]) -> MessageCatalogue {
        MessageCatalogue::new(locale(loc)).with_messages(DEFAULT_DOMAIN, pairs.iter().copied())
    }

    #[googletest::test]
    fn own_value_wins_over_fallbacks() {
        let b: Arc<dyn Catalogue> = Arc::new(catalogue("b", &[("k", "from b"), ("only_b", "b")]));
        let c: Arc<dyn Catalogue> =
            Arc::new(catalogue("c", &[("k", "from c"), ("only_b", "c"), ("only_c", "c")]));
        let a = catalogue("a", &[("k", "from a")]).with_fallback(b).with_fallback(c);

        expect_that!(a.get("k", DEFAULT_DOMAIN), some(eq("from a")));
        expect_that!(a.get("only_b", DEFAULT_DOMAIN), some(eq("b")));
        expect_that!(a.get("only_c", DEFAULT_DOMAIN), some(eq("c")));
        expect_that!(a.get("nowhere", DEFAULT_DOMAIN), none());
    }

    #[googletest::test]
    fn resolution_is_depth_first() {
        let deep: Arc<dyn Catalogue> = Arc::new(catalogue("deep", &[("k", "deep")]));
        let b: Arc<dyn Catalogue> = Arc::new(catalogue("b", &[]).with_fallback(deep));
        let c: Arc<dyn Catalogue> = Arc::new(catalogue("c", &[("k", "sibling")]));
        let a = catalogue("a", &[]).with_fallback(b).with_fallback(c);

        expect_that!(a.get("k", DEFAULT_DOMAIN), some(eq("deep")));
    }

    #[googletest::test]
    fn get_own_ignores_fallbacks() {
        let b: Arc<dyn Catalogue> = Arc::new(catalogue("b", &[("k", "b")]));
        let a = catalogue("a", &[]).with_fallback(b);

        expect_that!(a.get_own("k", DEFAULT_DOMAIN), none());
        expect_that!(a.has("k", DEFAULT_DOMAIN), eq(true));
    }

    #[googletest::test]
    fn domains_are_separate() {
        let a = catalogue("a", &[("title", "Messages title")])
            .with_messages("validation", [("title", "Validation title")]);

        expect_that!(a.get("title", DEFAULT_DOMAIN), some(eq("Messages title")));
        expect_that!(a.get("title", "validation"), some(eq("Validation title")));
        expect_that!(a.get("title", "unknown"), none());
        assert_eq!(a.domains(), vec!["messages", "validation"]);
    }

    #[googletest::test]
    fn duplicate_fallback_is_ignored() {
        let b: Arc<dyn Catalogue> = Arc::new(catalogue("b", &[]));
        let a = catalogue("a", &[]).with_fallback(Arc::clone(&b)).with_fallback(b);

        expect_that!(a.fallbacks().len(), eq(1));
    }

    #[googletest::test]
    fn from_raw_maps_fields_to_domains() {
        let raw = json!({
            "lang": "en",
            "message": { "Hallo": "hallo", "user": { "login": "Log in" } },
            "validation": { "required": "Required" },
            "version": 3
        });

        let a = MessageCatalogue::from_raw(locale("en"), raw.as_object().unwrap());

        expect_that!(a.get("Hallo", DEFAULT_DOMAIN), some(eq("hallo")));
        expect_that!(a.get("user.login", DEFAULT_DOMAIN), some(eq("Log in")));
        expect_that!(a.get("required", "validation"), some(eq("Required")));
        assert_eq!(a.domains(), vec!["messages", "validation"]);
        expect_that!(a.all("lang"), none());
    }

    #[googletest::test]
    fn from_raw_null_message_falls_through_to_fallback() {
        let en: Arc<dyn Catalogue> = Arc::new(MessageCatalogue::from_raw(
            locale("en"),
            json!({ "message": { "Bye": "Goodbye" } }).as_object().unwrap(),
        ));
        let de = MessageCatalogue::from_raw(
            locale("de"),
            json!({ "message": { "Bye": null, "Hi": "Hallo" } }).as_object().unwrap(),
        )
        .with_fallback(en);

        expect_that!(de.get_own("Bye", DEFAULT_DOMAIN), none());
        expect_that!(de.get("Bye", DEFAULT_DOMAIN), some(eq("Goodbye")));
        expect_that!(de.get("Hi", DEFAULT_DOMAIN), some(eq("Hallo")));
    }

    #[googletest::test]
    fn test_flatten_messages_nested_and_scalars() {
        let json = json!({
            "a": { "b": { "c": "Deep" } },
            "count": 42,
            "flag": true,
            "list": ["x", "y"],
            "pending": null,
            "nested": { "todo": null }
        });

        let result = flatten_messages(&json, ".");

        expect_that!(result.get("a.b.c"), some(eq(&"Deep".to_string())));
        expect_that!(result.get("count"), some(eq(&"42".to_string())));
        expect_that!(result.get("flag"), some(eq(&"true".to_string())));
        expect_that!(result.get("list[1]"), some(eq(&"y".to_string())));
        expect_that!(result.contains_key("pending"), eq(false));
        expect_that!(result.contains_key("nested.todo"), eq(false));
        expect_that!(result.len(), eq(5));
    }

    #[googletest::test]
    fn test_flatten_messages_ignores_scalar_document() {
        expect_that!(flatten_messages(&json!("hello"), ".").is_empty(), eq(true));
        expect_that!(flatten_messages(&Value::Null, ".").is_empty(), eq(true));
    }
}
