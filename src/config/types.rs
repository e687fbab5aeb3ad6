//! Settings read from `.plan-i18n.json` and their validation.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::localize::LeafDetection;
use crate::types::{
    Locale,
    LocaleSet,
};

/// One invalid setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[1]")
    pub field_path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file parsed but some settings are invalid.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The file exists but could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid JSON for [`SiteSettings`].
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How localized leaves are recognized in authored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LeafDetectionMode {
    /// Only `{ "<tag>": { "de": .., "en": .. } }` wrappers are leaves.
    #[default]
    Tagged,
    /// Any object whose keys are all supported locale codes is a leaf.
    Structural,
}

/// Site-wide localization settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Supported locale codes, in fallback order.
    pub locales: Vec<String>,
    /// Locale used for unknown codes and unprefixed paths.
    pub default_locale: String,
    /// Map region tags (`en-GB`) onto a supported primary subtag (`en`)
    /// instead of the default locale.
    pub primary_subtag_fallback: bool,

    /// Separator for dotted message keys (`content.market.title`).
    pub key_separator: String,

    /// How localized leaves are recognized.
    pub leaf_detection: LeafDetectionMode,
    /// Wrapper key used by [`LeafDetectionMode::Tagged`].
    pub localized_tag: String,

    /// Which files under the content root are loaded.
    pub content_files: ContentFilesConfig,
}

/// Glob patterns relative to the content root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFilesConfig {
    /// Per-locale content files (`messages/de.json`, `messages/en/market.json`).
    pub include_patterns: Vec<String>,
    /// Files skipped even when another pattern matches.
    pub exclude_patterns: Vec<String>,
    /// Dual-locale files that are picked once for every supported locale.
    pub shared_patterns: Vec<String>,
}

impl Default for ContentFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["messages/**/*.json".to_string()],
            exclude_patterns: Vec::new(),
            shared_patterns: vec!["shared/**/*.json".to_string()],
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            locales: vec!["de".to_string(), "en".to_string()],
            default_locale: "de".to_string(),
            primary_subtag_fallback: false,
            key_separator: ".".to_string(),
            leaf_detection: LeafDetectionMode::default(),
            localized_tag: "$l10n".to_string(),
            content_files: ContentFilesConfig::default(),
        }
    }
}

impl SiteSettings {
    /// The supported locales as a [`LocaleSet`].
    #[must_use]
    pub fn locale_set(&self) -> LocaleSet {
        LocaleSet::new(
            self.locales.iter().map(|code| Locale::new(code.as_str())),
            Locale::new(self.default_locale.as_str()),
        )
        .with_primary_subtag_fallback(self.primary_subtag_fallback)
    }

    /// The leaf detection rule for content files.
    #[must_use]
    pub fn leaf_detection(&self) -> LeafDetection {
        match self.leaf_detection {
            LeafDetectionMode::Tagged => LeafDetection::tagged(self.localized_tag.clone()),
            LeafDetectionMode::Structural => LeafDetection::structural(self.locale_set()),
        }
    }

    /// # Errors
    /// - Empty or duplicate locale codes
    /// - Default locale not among `locales`
    /// - Empty separator or tag
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [\"de\", \"en\"]",
            ));
        }

        for (index, code) in self.locales.iter().enumerate() {
            if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    "The locale code cannot be empty",
                ));
            } else if self.locales.iter().take(index).any(|earlier| earlier == code) {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Duplicate locale code '{code}'"),
                ));
            }
        }

        if !self.locales.is_empty() && !self.locales.contains(&self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The default locale '{}' must be one of the configured locales",
                    self.default_locale
                ),
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.leaf_detection == LeafDetectionMode::Tagged && self.localized_tag.is_empty() {
            errors.push(ValidationError::new(
                "localizedTag",
                "The tag cannot be empty when leafDetection is \"tagged\"",
            ));
        }

        let pattern_groups = [
            ("contentFiles.includePatterns", &self.content_files.include_patterns),
            ("contentFiles.excludePatterns", &self.content_files.exclude_patterns),
            ("contentFiles.sharedPatterns", &self.content_files.shared_patterns),
        ];
        for (field, patterns) in pattern_groups {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if self.content_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "contentFiles.includePatterns",
                "At least one pattern is required. Example: [\"messages/**/*.json\"]",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
