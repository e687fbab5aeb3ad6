//! Core types used throughout the project.

use std::fmt;

/// A locale code such as `de`, `en` or `en-US`.
///
/// Codes are kept verbatim. Only [`LocaleSet`] decides whether a code is
/// supported or default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Wraps `code` as is.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`de-AT` → `de`, `en_US` → `en`).
    #[must_use]
    pub fn primary_subtag(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The supported locales of a site plus the designated default.
///
/// The default is always a member of the supported list; constructing a set
/// with an unknown default puts it at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    /// Supported codes in configured order, default included.
    supported: Vec<Locale>,
    /// Locale served when a requested code is not supported.
    default: Locale,
    /// Whether [`normalize`](Self::normalize) maps `de-AT` onto `de`.
    primary_subtag_fallback: bool,
}

impl LocaleSet {
    /// Set of `supported` locales with `default`.
    #[must_use]
    pub fn new(supported: impl IntoIterator<Item = Locale>, default: Locale) -> Self {
        let mut supported: Vec<Locale> = supported.into_iter().collect();
        if !supported.contains(&default) {
            supported.insert(0, default.clone());
        }
        Self { supported, default, primary_subtag_fallback: false }
    }

    /// Enables or disables mapping region tags onto their primary subtag.
    #[must_use]
    pub const fn with_primary_subtag_fallback(mut self, enabled: bool) -> Self {
        self.primary_subtag_fallback = enabled;
        self
    }

    /// Supported locales, default included.
    #[must_use]
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// The default locale.
    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Whether `code` is exactly a supported code.
    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|l| l.as_str() == code)
    }

    /// Whether `code` is exactly the default code.
    #[must_use]
    pub fn is_default(&self, code: &str) -> bool {
        self.default.as_str() == code
    }

    /// Maps an arbitrary code onto a supported locale.
    ///
    /// Exact matches are kept; anything else becomes the default locale.
    /// With [`with_primary_subtag_fallback`](Self::with_primary_subtag_fallback)
    /// a supported primary subtag (`de-AT` → `de`) is tried first.
    #[must_use]
    pub fn normalize(&self, code: &str) -> Locale {
        if self.is_supported(code) {
            return Locale::new(code);
        }
        if self.primary_subtag_fallback {
            let primary = Locale::new(code).primary_subtag().to_string();
            if self.is_supported(&primary) {
                return Locale::new(primary);
            }
        }
        tracing::debug!(requested = code, fallback = %self.default, "Unknown locale, using default");
        self.default.clone()
    }

    /// Order in which locale variants are tried when the requested one is
    /// missing: default first, then the remaining supported codes.
    pub fn fallback_order(&self) -> impl Iterator<Item = &Locale> {
        std::iter::once(&self.default).chain(self.supported.iter().filter(|l| **l != self.default))
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        Self::new([Locale::from("de"), Locale::from("en")], Locale::from("de"))
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::exact("en", "en")]
    #[case::default_exact("de", "de")]
    #[case::region("en-GB", "de")]
    #[case::underscore("en_US", "de")]
    #[case::unknown("fr", "de")]
    #[case::empty("", "de")]
    fn normalize_maps_onto_supported(#[case] input: &str, #[case] expected: &str) {
        let set = LocaleSet::default();

        assert_that!(set.normalize(input).as_str(), eq(expected));
    }

    #[rstest]
    #[case::exact("en", "en")]
    #[case::region("en-GB", "en")]
    #[case::underscore("de_AT", "de")]
    #[case::unknown_primary("fr-CA", "de")]
    fn normalize_with_primary_subtag_fallback(#[case] input: &str, #[case] expected: &str) {
        let set = LocaleSet::default().with_primary_subtag_fallback(true);

        assert_that!(set.normalize(input).as_str(), eq(expected));
    }

    #[rstest]
    fn default_is_inserted_when_missing() {
        let set = LocaleSet::new([Locale::from("en")], Locale::from("de"));

        assert_eq!(set.supported(), &[Locale::from("de"), Locale::from("en")]);
    }

    #[rstest]
    fn fallback_order_starts_with_default() {
        let set = LocaleSet::new(
            [Locale::from("en"), Locale::from("fr"), Locale::from("de")],
            Locale::from("de"),
        );
        let order: Vec<&str> = set.fallback_order().map(Locale::as_str).collect();

        assert_eq!(order, vec!["de", "en", "fr"]);
    }
}
