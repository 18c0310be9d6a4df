//! Plural variant selection for pipe-delimited messages.
//!
//! A raw message is either a plain string or a list of variants separated
//! by `|`. Variants come in two shapes:
//!
//! - explicit intervals: `{0} No apples`, `{1,2} A few`, `]2,Inf] Many`
//! - standard variants, optionally labelled: `one: %count% apple`
//!
//! An explicit interval containing the count always wins. Otherwise the
//! standard variants are indexed with the locale's plural rule. `||` is a
//! literal pipe.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::plural::{
    PluralizationRules,
    Pluralize,
};

/// Picks the message variant for a count.
pub trait Select: fmt::Debug + Send + Sync {
    /// Returns the variant of `message` matching `count` in `locale`.
    ///
    /// Messages without a variant delimiter are returned unchanged.
    fn select<'a>(&self, message: &'a str, count: u64, locale: &str) -> Cow<'a, str>;
}

/// Bound of an explicit interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// `-Inf`
    NegInf,
    /// Finite bound
    Value(i64),
    /// `Inf` / `+Inf`
    PosInf,
}

impl Bound {
    /// Parses `Inf`, `+Inf`, `-Inf` or an integer.
    fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "Inf" | "+Inf" => Some(Self::PosInf),
            "-Inf" => Some(Self::NegInf),
            other => other.parse().ok().map(Self::Value),
        }
    }

    /// Compares the bound against a count.
    fn cmp_count(self, count: u64) -> std::cmp::Ordering {
        match self {
            Self::NegInf => std::cmp::Ordering::Less,
            Self::PosInf => std::cmp::Ordering::Greater,
            Self::Value(v) => i128::from(v).cmp(&i128::from(count)),
        }
    }
}

/// Explicit interval prefix of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Interval {
    /// `{1,2,3}`
    Set(Vec<i64>),
    /// `[a,b]` with either side open (`]a,b[`)
    Range {
        /// Lower bound
        start: Bound,
        /// `[` vs `]`
        start_inclusive: bool,
        /// Upper bound
        end: Bound,
        /// `]` vs `[`
        end_inclusive: bool,
    },
}

impl Interval {
    /// Returns true if `count` falls into the interval.
    fn contains(&self, count: u64) -> bool {
        match self {
            Self::Set(values) => values.iter().any(|v| i128::from(*v) == i128::from(count)),
            Self::Range { start, start_inclusive, end, end_inclusive } => {
                use std::cmp::Ordering::{
                    Equal,
                    Greater,
                    Less,
                };

                let above_start = match start.cmp_count(count) {
                    Less => true,
                    Equal => *start_inclusive,
                    Greater => false,
                };
                let below_end = match end.cmp_count(count) {
                    Greater => true,
                    Equal => *end_inclusive,
                    Less => false,
                };
                above_start && below_end
            }
        }
    }
}

/// Splits an explicit interval prefix off `part`.
fn parse_interval(part: &str) -> Option<(Interval, &str)> {
    if let Some(rest) = part.strip_prefix('{') {
        let (inner, message) = rest.split_once('}')?;
        let values =
            inner.split(',').map(|v| v.trim().parse::<i64>().ok()).collect::<Option<Vec<_>>>()?;
        return Some((Interval::Set(values), message.trim_start()));
    }

    let open = part.chars().next()?;
    if open != '[' && open != ']' {
        return None;
    }
    let rest = part.get(1..)?;
    let close_at = rest.find(['[', ']'])?;
    let inner = rest.get(..close_at)?;
    let close = rest.get(close_at..)?.chars().next()?;
    let message = rest.get(close_at + 1..)?;

    let (low, high) = inner.split_once(',')?;
    let interval = Interval::Range {
        start: Bound::parse(low)?,
        start_inclusive: open == '[',
        end: Bound::parse(high)?,
        end_inclusive: close == ']',
    };
    Some((interval, message.trim_start()))
}

/// Removes a `label:` prefix such as `one:` or `other:`.
///
/// Labels are ASCII identifiers, so translated text like `Важно: ...` is kept.
fn strip_label(part: &str) -> &str {
    match part.split_once(':') {
        Some((label, rest))
            if !label.is_empty()
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            rest.trim_start()
        }
        _ => part,
    }
}

/// Splits on single `|`, turning `||` into a literal pipe.
fn split_variants(message: &str) -> Vec<String> {
    let mut variants = Vec::new();
    let mut current = String::new();
    let mut chars = message.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '|' {
            current.push(c);
        } else if chars.peek() == Some(&'|') {
            chars.next();
            current.push('|');
        } else {
            variants.push(std::mem::take(&mut current));
        }
    }
    variants.push(current);

    variants
}

/// Returns true if `message` contains a `|` that is not part of `||`.
fn has_variant_delimiter(message: &str) -> bool {
    let mut chars = message.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '|' {
            if chars.peek() == Some(&'|') {
                chars.next();
            } else {
                return true;
            }
        }
    }
    false
}

/// Default selector backed by [`PluralizationRules`].
#[derive(Debug, Clone)]
pub struct MessageSelector {
    /// Rules used to index standard variants.
    pluralization: Arc<dyn Pluralize>,
}

impl Default for MessageSelector {
    fn default() -> Self {
        Self::new(Arc::new(PluralizationRules::new()))
    }
}

impl MessageSelector {
    #[must_use]
    pub fn new(pluralization: Arc<dyn Pluralize>) -> Self {
        Self { pluralization }
    }

    #[must_use]
    pub fn pluralization(&self) -> &Arc<dyn Pluralize> {
        &self.pluralization
    }
}

impl Select for MessageSelector {
    fn select<'a>(&self, message: &'a str, count: u64, locale: &str) -> Cow<'a, str> {
        if !has_variant_delimiter(message) {
            return Cow::Borrowed(message);
        }

        let mut standard: Vec<String> = Vec::new();
        let mut explicit_fallback: Option<String> = None;

        for variant in split_variants(message) {
            let part = variant.trim();
            if let Some((interval, text)) = parse_interval(part) {
                if interval.contains(count) {
                    return Cow::Owned(text.to_string());
                }
                explicit_fallback = Some(text.to_string());
            } else {
                standard.push(strip_label(part).to_string());
            }
        }

        let index = self.pluralization.form_index(locale, count);
        let chosen = match standard.len() {
            0 => explicit_fallback.unwrap_or_default(),
            len => standard.swap_remove(index.min(len - 1)),
        };

        Cow::Owned(chosen)
    }
}
