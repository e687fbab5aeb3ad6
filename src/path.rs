//! Locale-prefixed URL paths under the "as-needed" policy: the default
//! locale is served unprefixed, every other locale under `/<locale>`.

use crate::types::{
    Locale,
    LocaleSet,
};

/// Builds the URL path of `path` for `locale`.
///
/// Only exact equality with `default_locale` suppresses the prefix; `locale`
/// itself is inserted verbatim (`en-US` → `/en-US/...`). No slash collapsing
/// happens, so the root of a prefixed locale is `/en/`.
#[must_use]
pub fn build_locale_path(default_locale: &str, locale: &str, path: &str) -> String {
    let normalized =
        if path.starts_with('/') { path.to_string() } else { format!("/{path}") };

    if locale == default_locale { normalized } else { format!("/{locale}{normalized}") }
}

/// [`build_locale_path`] bound to a site's locales.
#[derive(Debug, Clone)]
pub struct LocalePathBuilder {
    /// Site locales; the default is never prefixed.
    locales: LocaleSet,
}

impl LocalePathBuilder {
    /// Builder for `locales`.
    #[must_use]
    pub const fn new(locales: LocaleSet) -> Self {
        Self { locales }
    }

    /// [`build_locale_path`] with the site default.
    #[must_use]
    pub fn build(&self, locale: &str, path: &str) -> String {
        build_locale_path(self.locales.default_locale().as_str(), locale, path)
    }

    /// The path in every supported locale, for sitemap and `hreflang` links.
    #[must_use]
    pub fn alternates(&self, path: &str) -> Vec<(Locale, String)> {
        self.locales
            .supported()
            .iter()
            .map(|locale| (locale.clone(), self.build(locale.as_str(), path)))
            .collect()
    }

    /// Splits a request path into its locale and the unprefixed path.
    ///
    /// A leading segment naming a supported non-default locale is removed;
    /// anything else belongs to the default locale.
    ///
    /// Only inverts [`build`](Self::build) for paths whose first segment is not
    /// a locale code. Unprefixed default-locale paths such as `/en` are
    /// indistinguishable from the `en` root and are read as the latter.
    #[must_use]
    pub fn strip_locale(&self, path: &str) -> (Locale, String) {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        if self.locales.is_supported(first) && !self.locales.is_default(first) {
            return (Locale::new(first), format!("/{rest}"));
        }
        let normalized =
            if path.starts_with('/') { path.to_string() } else { format!("/{path}") };
        (self.locales.default_locale().clone(), normalized)
    }
}
