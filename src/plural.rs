//! Locale-aware plural form selection.
//!
//! Each language family maps a non-negative count to a zero-based form
//! index. The index addresses the variants of a pipe-delimited message in
//! the order translators write them (`"one|other"`, `"one|few|many"`, ...).

use std::collections::HashMap;
use std::fmt;

/// Maps `(locale, count)` to a plural form index.
pub trait Pluralize: fmt::Debug + Send + Sync {
    /// Returns the zero-based form index for `count` in `locale`.
    ///
    /// Total over all counts; unknown locales yield `0`.
    fn form_index(&self, locale: &str, count: u64) -> usize;
}

/// Custom rule registered for a single locale.
pub type PluralRuleFn = fn(u64) -> usize;

/// Counting rule shared by a group of languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralFamily {
    /// No plural distinction (Chinese, Japanese, Turkish, ...).
    Single,
    /// `1` vs everything else (English, German, ...).
    OneOther,
    /// `0` and `1` share the singular (French, Hindi, ...).
    ZeroOneOther,
    /// Zero, one-ish, other (Latvian).
    ZeroOneMany,
    /// one / few / many by last digits (Russian, Ukrainian, Croatian, ...).
    EastSlavic,
    /// `1`, `2..=4`, rest (Czech, Slovak).
    CzechSlovak,
    /// `1`, `2`, rest (Irish).
    Irish,
    /// Lithuanian last-digit rule.
    Lithuanian,
    /// `n % 100` is 1, 2, 3-4, rest (Slovenian).
    Slovenian,
    /// Last digit is 1 or not (Macedonian).
    Macedonian,
    /// Maltese four-form rule.
    Maltese,
    /// Polish three-form rule.
    Polish,
    /// Welsh four-form rule.
    Welsh,
    /// Romanian three-form rule.
    Romanian,
    /// Arabic six-form rule.
    Arabic,
}

impl PluralFamily {
    /// Looks up the family for a (normalized) language code.
    #[must_use]
    pub fn for_language(language: &str) -> Option<Self> {
        let family = match language {
            "az" | "bo" | "dz" | "id" | "ja" | "jv" | "ka" | "km" | "kn" | "ko" | "ms" | "th"
            | "tr" | "vi" | "zh" => Self::Single,
            "af" | "bn" | "bg" | "ca" | "da" | "de" | "el" | "en" | "eo" | "es" | "et" | "eu"
            | "fa" | "fi" | "fo" | "fur" | "fy" | "gl" | "gu" | "ha" | "he" | "hu" | "is" | "it"
            | "ku" | "lb" | "ml" | "mn" | "mr" | "nah" | "nb" | "ne" | "nl" | "nn" | "no"
            | "om" | "or" | "pa" | "pap" | "ps" | "pt" | "so" | "sq" | "sv" | "sw" | "ta"
            | "te" | "tk" | "ur" | "zu" => Self::OneOther,
            "am" | "bh" | "fil" | "fr" | "gun" | "hi" | "hy" | "ln" | "mg" | "nso" | "xbr"
            | "ti" | "wa" => Self::ZeroOneOther,
            "lv" => Self::ZeroOneMany,
            "be" | "bs" | "hr" | "ru" | "sr" | "uk" => Self::EastSlavic,
            "cs" | "sk" => Self::CzechSlovak,
            "ga" => Self::Irish,
            "lt" => Self::Lithuanian,
            "sl" => Self::Slovenian,
            "mk" => Self::Macedonian,
            "mt" => Self::Maltese,
            "pl" => Self::Polish,
            "cy" => Self::Welsh,
            "ro" => Self::Romanian,
            "ar" => Self::Arabic,
            _ => return None,
        };
        Some(family)
    }

    /// Number of distinct forms this family produces.
    #[must_use]
    pub const fn form_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther | Self::Macedonian => 2,
            Self::ZeroOneMany
            | Self::EastSlavic
            | Self::CzechSlovak
            | Self::Irish
            | Self::Lithuanian
            | Self::Polish
            | Self::Romanian => 3,
            Self::Slovenian | Self::Maltese | Self::Welsh => 4,
            Self::Arabic => 6,
        }
    }

    /// Applies the counting rule.
    #[must_use]
    pub fn index(self, n: u64) -> usize {
        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOneOther => usize::from(n > 1),
            Self::ZeroOneMany => zero_one_many(n),
            Self::EastSlavic => east_slavic(n),
            Self::CzechSlovak => czech_slovak(n),
            Self::Irish => irish(n),
            Self::Lithuanian => lithuanian(n),
            Self::Slovenian => slovenian(n),
            Self::Macedonian => usize::from(n % 10 != 1),
            Self::Maltese => maltese(n),
            Self::Polish => polish(n),
            Self::Welsh => welsh(n),
            Self::Romanian => romanian(n),
            Self::Arabic => arabic(n),
        }
    }
}

// ── Family rules ────────────────────────────────────────────────────

/// Latvian: zero, ends in 1 (not 11), other.
const fn zero_one_many(n: u64) -> usize {
    if n == 0 {
        0
    } else if n % 10 == 1 && n % 100 != 11 {
        1
    } else {
        2
    }
}

/// Russian and friends: ends in 1, ends in 2-4 outside the teens, other.
fn east_slavic(n: u64) -> usize {
    let (mod10, mod100) = (n % 10, n % 100);
    if mod10 == 1 && mod100 != 11 {
        0
    } else if (2..=4).contains(&mod10) && !(10..20).contains(&mod100) {
        1
    } else {
        2
    }
}

/// Czech and Slovak: one, two to four, other.
const fn czech_slovak(n: u64) -> usize {
    match n {
        1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// Irish: one, two, other.
const fn irish(n: u64) -> usize {
    match n {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

/// Lithuanian: ends in 1 (not 11), ends in 2-9 outside the teens, other.
fn lithuanian(n: u64) -> usize {
    let (mod10, mod100) = (n % 10, n % 100);
    if mod10 == 1 && mod100 != 11 {
        0
    } else if mod10 >= 2 && !(10..20).contains(&mod100) {
        1
    } else {
        2
    }
}

/// Slovenian: by `n % 100` being 1, 2, 3-4, other.
const fn slovenian(n: u64) -> usize {
    match n % 100 {
        1 => 0,
        2 => 1,
        3 | 4 => 2,
        _ => 3,
    }
}

/// Maltese: one, zero or 2-10, 11-19, other by `n % 100`.
const fn maltese(n: u64) -> usize {
    match (n, n % 100) {
        (1, _) => 0,
        (0, _) | (_, 2..=10) => 1,
        (_, 11..=19) => 2,
        _ => 3,
    }
}

/// Polish: one, ends in 2-4 outside 12-14, other.
fn polish(n: u64) -> usize {
    let (mod10, mod100) = (n % 10, n % 100);
    if n == 1 {
        0
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        1
    } else {
        2
    }
}

/// Welsh: one, two, eight or eleven, other.
const fn welsh(n: u64) -> usize {
    match n {
        1 => 0,
        2 => 1,
        8 | 11 => 2,
        _ => 3,
    }
}

/// Romanian: one, zero or 1-19 by `n % 100`, other.
const fn romanian(n: u64) -> usize {
    match (n, n % 100) {
        (1, _) => 0,
        (0, _) | (_, 1..=19) => 1,
        _ => 2,
    }
}

/// Arabic: zero, one, two, few (3-10), many (11-99), other by `n % 100`.
const fn arabic(n: u64) -> usize {
    match (n, n % 100) {
        (0, _) => 0,
        (1, _) => 1,
        (2, _) => 2,
        (_, 3..=10) => 3,
        (_, 11..=99) => 4,
        _ => 5,
    }
}

/// Reduces a locale to the key used by the family table.
///
/// `pt_BR` is special-cased (it counts like French); otherwise anything
/// longer than three characters keeps only its primary subtag.
#[must_use]
pub fn normalize_plural_locale(locale: &str) -> String {
    if locale.eq_ignore_ascii_case("pt_BR") || locale.eq_ignore_ascii_case("pt-BR") {
        return "xbr".to_string();
    }

    let primary = if locale.len() > 3 {
        locale.split(['_', '-']).next().unwrap_or(locale)
    } else {
        locale
    };

    primary.to_ascii_lowercase()
}

/// Built-in plural rules with optional per-locale overrides.
#[derive(Debug, Clone, Default)]
pub struct PluralizationRules {
    /// Overrides keyed by normalized locale; consulted before the family table.
    custom: HashMap<String, PluralRuleFn>,
}

impl PluralizationRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule for `locale`, replacing the built-in family.
    ///
    /// Intended for the configuration phase; the rules are read-only once
    /// handed to a selector.
    pub fn set_rule(&mut self, locale: &str, rule: PluralRuleFn) {
        self.custom.insert(normalize_plural_locale(locale), rule);
    }

    /// Builder form of [`Self::set_rule`].
    #[must_use]
    pub fn with_rule(mut self, locale: &str, rule: PluralRuleFn) -> Self {
        self.set_rule(locale, rule);
        self
    }

    /// Returns the family used for `locale`, if it has a built-in one.
    #[must_use]
    pub fn family(locale: &str) -> Option<PluralFamily> {
        PluralFamily::for_language(&normalize_plural_locale(locale))
    }
}

impl Pluralize for PluralizationRules {
    fn form_index(&self, locale: &str, count: u64) -> usize {
        let key = normalize_plural_locale(locale);

        if let Some(rule) = self.custom.get(&key) {
            return rule(count);
        }

        PluralFamily::for_language(&key).map_or(0, |family| family.index(count))
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("en", 0, 1)]
    #[case("en", 1, 0)]
    #[case("en", 2, 1)]
    #[case("de_AT", 1, 0)]
    #[case("de_AT", 5, 1)]
    #[case("fr", 0, 0)]
    #[case("fr", 1, 0)]
    #[case("fr", 2, 1)]
    #[case("pt_BR", 0, 0)]
    #[case("pt", 0, 1)]
    #[case("ja", 1, 0)]
    #[case("ja", 100, 0)]
    fn test_two_form_and_single_rules(
        #[case] locale: &str,
        #[case] count: u64,
        #[case] expected: usize,
    ) {
        let rules = PluralizationRules::new();
        assert_that!(rules.form_index(locale, count), eq(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(11, 2)]
    #[case(21, 1)]
    #[case(5, 2)]
    fn test_latvian_zero_form(#[case] count: u64, #[case] expected: usize) {
        assert_that!(PluralizationRules::new().form_index("lv", count), eq(expected));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(21, 0)]
    #[case(11, 2)]
    #[case(2, 1)]
    #[case(4, 1)]
    #[case(12, 2)]
    #[case(22, 1)]
    #[case(5, 2)]
    #[case(0, 2)]
    #[case(111, 2)]
    fn test_russian(#[case] count: u64, #[case] expected: usize) {
        assert_that!(PluralizationRules::new().form_index("ru", count), eq(expected));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(13, 2)]
    #[case(22, 1)]
    #[case(21, 2)]
    fn test_polish(#[case] count: u64, #[case] expected: usize) {
        assert_that!(PluralizationRules::new().form_index("pl", count), eq(expected));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(11, 4)]
    #[case(100, 5)]
    #[case(102, 5)]
    #[case(103, 3)]
    fn test_arabic(#[case] count: u64, #[case] expected: usize) {
        assert_that!(PluralizationRules::new().form_index("ar", count), eq(expected));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(101, 0)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[case(104, 2)]
    #[case(5, 3)]
    fn test_slovenian(#[case] count: u64, #[case] expected: usize) {
        assert_that!(PluralizationRules::new().form_index("sl", count), eq(expected));
    }

    #[rstest]
    #[case("cs", 1, 0)]
    #[case("cs", 4, 1)]
    #[case("cs", 5, 2)]
    #[case("ga", 2, 1)]
    #[case("ga", 3, 2)]
    #[case("lt", 21, 0)]
    #[case("lt", 12, 2)]
    #[case("lt", 29, 1)]
    #[case("mk", 11, 0)]
    #[case("mk", 12, 1)]
    #[case("mt", 0, 1)]
    #[case("mt", 110, 1)]
    #[case("mt", 15, 2)]
    #[case("mt", 20, 3)]
    #[case("cy", 8, 2)]
    #[case("cy", 3, 3)]
    #[case("ro", 0, 1)]
    #[case("ro", 119, 1)]
    #[case("ro", 20, 2)]
    fn test_remaining_families(
        #[case] locale: &str,
        #[case] count: u64,
        #[case] expected: usize,
    ) {
        assert_that!(PluralizationRules::new().form_index(locale, count), eq(expected));
    }

    #[googletest::test]
    fn unknown_locale_uses_single_form() {
        let rules = PluralizationRules::new();
        for count in [0, 1, 2, 5, 1000] {
            expect_that!(rules.form_index("tlh", count), eq(0));
        }
        expect_that!(PluralizationRules::family("tlh"), none());
    }

    #[googletest::test]
    fn custom_rule_overrides_family() {
        let rules = PluralizationRules::new().with_rule("en", |n| usize::from(n != 0));

        expect_that!(rules.form_index("en", 0), eq(0));
        expect_that!(rules.form_index("en", 1), eq(1));
        expect_that!(rules.form_index("en_GB", 0), eq(0));
        expect_that!(rules.form_index("de", 0), eq(1));
    }

    #[googletest::test]
    fn indices_stay_below_form_count() {
        let families = [
            PluralFamily::Single,
            PluralFamily::OneOther,
            PluralFamily::ZeroOneOther,
            PluralFamily::ZeroOneMany,
            PluralFamily::EastSlavic,
            PluralFamily::CzechSlovak,
            PluralFamily::Irish,
            PluralFamily::Lithuanian,
            PluralFamily::Slovenian,
            PluralFamily::Macedonian,
            PluralFamily::Maltese,
            PluralFamily::Polish,
            PluralFamily::Welsh,
            PluralFamily::Romanian,
            PluralFamily::Arabic,
        ];
        for family in families {
            for n in 0..250 {
                expect_that!(family.index(n), lt(family.form_count()));
            }
        }
    }

    #[rstest]
    #[case("pt_BR", "xbr")]
    #[case("pt-br", "xbr")]
    #[case("de_AT", "de")]
    #[case("fil", "fil")]
    #[case("sr-Cyrl-BA", "sr")]
    #[case("EN", "en")]
    fn test_normalize_plural_locale(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_plural_locale(input), expected);
    }
}
