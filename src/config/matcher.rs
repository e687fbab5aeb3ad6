//! File pattern matcher for content files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::SiteSettings;

/// Errors raised while compiling `contentFiles` patterns.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// An `includePatterns` entry is not a valid glob.
    #[error("Invalid content include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        /// The offending pattern.
        pattern: String,
        /// Why the glob was rejected.
        #[source]
        source: globset::Error,
    },

    /// An `excludePatterns` entry is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        /// The offending pattern.
        pattern: String,
        /// Why the glob was rejected.
        #[source]
        source: globset::Error,
    },

    /// A `sharedPatterns` entry is not a valid glob.
    #[error("Invalid shared content pattern '{pattern}': {source}")]
    InvalidSharedPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the glob was rejected.
        #[source]
        source: globset::Error,
    },

    /// The compiled set could not be built.
    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// What a matched file contributes to the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFileKind {
    /// Belongs to a single locale, detected from its path.
    PerLocale,
    /// Carries localized leaves for every locale.
    Shared,
}

/// Matches files against `contentFiles` patterns.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    /// Directory the patterns are relative to.
    content_root: PathBuf,
    /// Per-locale files.
    include_set: GlobSet,
    /// Checked first; a match excludes the file.
    exclude_set: GlobSet,
    /// Dual-locale files.
    shared_set: GlobSet,
}

impl ContentMatcher {
    /// Compiles the patterns of `settings`.
    ///
    /// # Errors
    /// - A pattern is not a valid glob
    pub fn new(content_root: PathBuf, settings: &SiteSettings) -> Result<Self, MatcherError> {
        let files = &settings.content_files;
        let include_set = Self::build_glob_set(&files.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&files.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let shared_set = Self::build_glob_set(&files.shared_patterns, |pattern, source| {
            MatcherError::InvalidSharedPattern { pattern, source }
        })?;

        Ok(Self { content_root, include_set, exclude_set, shared_set })
    }

    /// Compiles `patterns`, wrapping a bad one with `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Directory the matcher walks.
    #[must_use]
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Classifies a path under the content root.
    ///
    /// Excluded paths and paths outside the root yield `None`. Shared
    /// patterns take precedence over include patterns.
    #[must_use]
    pub fn classify(&self, absolute_path: &Path) -> Option<ContentFileKind> {
        let relative_path = absolute_path.strip_prefix(&self.content_root).ok()?;
        self.classify_relative(relative_path)
    }

    /// Like [`Self::classify`], for a path already relative to the root.
    #[must_use]
    pub fn classify_relative(&self, relative_path: &Path) -> Option<ContentFileKind> {
        if self.exclude_set.is_match(relative_path) {
            return None;
        }
        if self.shared_set.is_match(relative_path) {
            return Some(ContentFileKind::Shared);
        }
        self.include_set.is_match(relative_path).then_some(ContentFileKind::PerLocale)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn matcher_with(include: &[&str], exclude: &[&str], shared: &[&str]) -> ContentMatcher {
        let mut settings = SiteSettings::default();
        settings.content_files.include_patterns =
            include.iter().copied().map(String::from).collect();
        settings.content_files.exclude_patterns =
            exclude.iter().copied().map(String::from).collect();
        settings.content_files.shared_patterns =
            shared.iter().copied().map(String::from).collect();
        ContentMatcher::new(PathBuf::from("/site"), &settings).expect("valid patterns")
    }

    #[rstest]
    fn classify_with_default_patterns() {
        let matcher =
            ContentMatcher::new(PathBuf::from("/site"), &SiteSettings::default()).expect("valid");

        assert_eq!(
            matcher.classify(Path::new("/site/messages/de.json")),
            Some(ContentFileKind::PerLocale)
        );
        assert_eq!(
            matcher.classify(Path::new("/site/messages/en/market.json")),
            Some(ContentFileKind::PerLocale)
        );
        assert_eq!(
            matcher.classify(Path::new("/site/shared/team.json")),
            Some(ContentFileKind::Shared)
        );
        assert_eq!(matcher.classify(Path::new("/site/package.json")), None);
    }

    #[rstest]
    fn classify_outside_root() {
        let matcher =
            ContentMatcher::new(PathBuf::from("/site"), &SiteSettings::default()).expect("valid");

        assert_eq!(matcher.classify(Path::new("/other/messages/de.json")), None);
    }

    #[rstest]
    fn exclude_wins_over_include_and_shared() {
        let matcher = matcher_with(&["**/*.json"], &["**/draft/**"], &["shared/**/*.json"]);

        assert_eq!(matcher.classify_relative(Path::new("messages/draft/de.json")), None);
        assert_eq!(matcher.classify_relative(Path::new("shared/draft/x.json")), None);
        assert_eq!(
            matcher.classify_relative(Path::new("shared/x.json")),
            Some(ContentFileKind::Shared)
        );
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let mut settings = SiteSettings::default();
        settings.content_files.include_patterns = vec!["**/*.{json".to_string()];

        let result = ContentMatcher::new(PathBuf::from("/site"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_shared_pattern() {
        let mut settings = SiteSettings::default();
        settings.content_files.shared_patterns = vec!["[invalid".to_string()];

        let result = ContentMatcher::new(PathBuf::from("/site"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidSharedPattern { .. })));
    }
}
