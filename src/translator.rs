//! Key resolution and parameter interpolation for one locale.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use crate::catalogue::{
    Catalogue,
    DEFAULT_DOMAIN,
};
use crate::error::{
    Result,
    TranslationError,
};
use crate::locale::Locale;
use crate::log::LogSink;
use crate::selector::Select;

/// Placeholder filled with the count when the caller does not supply it.
pub const COUNT_PLACEHOLDER: &str = "%count%";

/// What `translate` does with a key missing from the whole chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingKeyPolicy {
    /// Fail with [`TranslationError::MissingTranslation`].
    Strict,
    /// Echo the key back and report a warning to the logger, if any.
    #[default]
    Lenient,
}

/// Resolves message keys into final strings.
pub trait Translate: fmt::Debug + Send + Sync {
    fn locale(&self) -> &Locale;

    /// Resolves `key` in `domain` (default domain if `None`).
    ///
    /// With a `count`, the raw message goes through plural selection before
    /// `parameters` are interpolated.
    ///
    /// # Errors
    /// `TranslationError::MissingTranslation` when the key is unresolved and
    /// the policy is [`MissingKeyPolicy::Strict`].
    fn translate(
        &self,
        key: &str,
        parameters: &HashMap<String, String>,
        count: Option<u64>,
        domain: Option<&str>,
    ) -> Result<String>;

    /// Shorthand for a default-domain lookup without a count.
    fn trans(&self, key: &str, parameters: &HashMap<String, String>) -> Result<String> {
        self.translate(key, parameters, None, None)
    }

    /// Shorthand for a default-domain plural lookup.
    fn trans_choice(
        &self,
        key: &str,
        count: u64,
        parameters: &HashMap<String, String>,
    ) -> Result<String> {
        self.translate(key, parameters, Some(count), None)
    }
}

/// Translator bound to one catalogue (and, through it, its fallback chain).
#[derive(Debug)]
pub struct Translator {
    /// Exclusively owned catalogue; fallbacks inside it are shared
    catalogue: Box<dyn Catalogue>,
    /// Shared plural selector
    selector: Arc<dyn Select>,
    /// Receives missing-key warnings in lenient mode
    logger: Option<Arc<dyn LogSink>>,
    /// Applied when a key is missing from the whole chain
    policy: MissingKeyPolicy,
}

impl Translator {
    #[must_use]
    pub fn new(catalogue: impl Catalogue + 'static, selector: Arc<dyn Select>) -> Self {
        Self {
            catalogue: Box::new(catalogue),
            selector,
            logger: None,
            policy: MissingKeyPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn catalogue(&self) -> &dyn Catalogue {
        self.catalogue.as_ref()
    }

    #[must_use]
    pub const fn policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// Applies the missing-key policy.
    fn missing(&self, key: &str, domain: &str) -> Result<String> {
        match self.policy {
            MissingKeyPolicy::Strict => Err(TranslationError::MissingTranslation {
                key: key.to_string(),
                domain: domain.to_string(),
                locale: self.catalogue.locale().to_string(),
            }),
            MissingKeyPolicy::Lenient => {
                if let Some(logger) = &self.logger {
                    logger.warning(&format!(
                        "Translation for '{key}' in domain '{domain}' is missing for locale '{}'",
                        self.catalogue.locale()
                    ));
                }
                Ok(key.to_string())
            }
        }
    }
}

impl Translate for Translator {
    fn locale(&self) -> &Locale {
        self.catalogue.locale()
    }

    fn translate(
        &self,
        key: &str,
        parameters: &HashMap<String, String>,
        count: Option<u64>,
        domain: Option<&str>,
    ) -> Result<String> {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);

        let Some(raw) = self.catalogue.get(key, domain) else {
            return self.missing(key, domain);
        };

        let Some(count) = count else {
            return Ok(interpolate(raw, parameters));
        };

        let selected = self.selector.select(raw, count, self.catalogue.locale().as_str());
        let count_text = count.to_string();
        let mut tokens = tokens_of(parameters);
        if !parameters.contains_key(COUNT_PLACEHOLDER) {
            tokens.push((COUNT_PLACEHOLDER, count_text.as_str()));
        }

        Ok(replace_tokens(&selected, tokens))
    }
}

/// Substitutes every placeholder token found in `parameters`.
///
/// Keys are matched literally (`%name%`, `:name`, `{name}`, whatever the
/// messages use); tokens without a parameter stay as they are. Substituted
/// values are never rescanned, and at each position the longest matching
/// token wins.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use i18n_translator::translator::interpolate;
///
/// let params = HashMap::from([("%name%".to_string(), "Ada".to_string())]);
/// assert_eq!(interpolate("Hello %name%, %unknown%", &params), "Hello Ada, %unknown%");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn interpolate(template: &str, parameters: &HashMap<String, String>) -> String {
    replace_tokens(template, tokens_of(parameters))
}

/// Borrows the non-empty parameter keys and values as token pairs.
#[allow(clippy::implicit_hasher)]
fn tokens_of(parameters: &HashMap<String, String>) -> Vec<(&str, &str)> {
    parameters
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, value)| (token.as_str(), value.as_str()))
        .collect()
}

/// Single left-to-right pass replacing the longest token at each position.
fn replace_tokens(template: &str, mut tokens: Vec<(&str, &str)>) -> String {
    if tokens.is_empty() {
        return template.to_string();
    }
    tokens.sort_by_key(|(token, _)| Reverse(token.len()));

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while !rest.is_empty() {
        for (token, value) in &tokens {
            if let Some(after) = rest.strip_prefix(token) {
                output.push_str(value);
                rest = after;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            output.push(c);
        }
        rest = chars.as_str();
    }

    output
}
