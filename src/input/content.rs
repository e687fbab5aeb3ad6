//! Content file discovery and path heuristics.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use super::ContentError;
use crate::config::{
    ContentFileKind,
    ContentMatcher,
    SiteSettings,
};
use crate::types::{
    Locale,
    LocaleSet,
};

/// Directory names that group content files without naming a namespace.
const COMMON_PARENTS: &[&str] = &["locales", "messages", "translations", "i18n", "lang", "content"];

/// Lowercase and replace `_` with `-`.
fn normalize_code(code: &str) -> String {
    code.to_lowercase().replace('_', "-")
}

/// The supported locale `part` names, ignoring case and `_`/`-`.
fn as_supported_locale(part: &str, locales: &LocaleSet) -> Option<Locale> {
    let normalized = normalize_code(part);
    locales
        .supported()
        .iter()
        .find(|locale| normalize_code(locale.as_str()) == normalized)
        .cloned()
}

/// Detects the locale of a per-locale content file from its path.
///
/// Splits the path by `/` and `.`, then searches backwards for a part naming
/// a supported locale.
///
/// # Examples
/// - `messages/de.json` → `de`
/// - `messages/en/market.json` → `en`
/// - `messages/market/EN.json` → `en`
#[must_use]
pub fn detect_locale_from_path(file_path: &Path, locales: &LocaleSet) -> Option<Locale> {
    let path_str = file_path.to_string_lossy();
    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find_map(|part| as_supported_locale(part, locales))
}

/// Detects the namespace of a content file.
///
/// A namespace file is merged into the locale root under its namespace key.
/// Locale codes and common parent directories are not namespaces.
///
/// # Examples
/// - `messages/en/market.json` → `Some("market")`
/// - `messages/market/en.json` → `Some("market")`
/// - `messages/en.json` → `None` (root file)
#[must_use]
pub fn detect_namespace_from_path(file_path: &Path, locales: &LocaleSet) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy().to_string();
    if as_supported_locale(&file_stem, locales).is_none() {
        return Some(file_stem);
    }

    let parent_name = file_path.parent()?.file_name()?.to_string_lossy().to_string();
    if as_supported_locale(&parent_name, locales).is_none()
        && !COMMON_PARENTS.contains(&parent_name.to_lowercase().as_str())
    {
        return Some(parent_name);
    }

    None
}

/// Walks `content_root` and returns the content files, sorted by path.
///
/// # Errors
/// - A configured glob pattern is invalid
pub fn find_content_files(
    content_root: &Path,
    settings: &SiteSettings,
) -> Result<Vec<(PathBuf, ContentFileKind)>, ContentError> {
    let matcher = ContentMatcher::new(content_root.to_path_buf(), settings)?;
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(matcher.content_root())
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if let Some(kind) = matcher.classify(entry.path()) {
            found_files.push((entry.path().to_path_buf(), kind));
        }
    }

    found_files.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(count = found_files.len(), root = ?content_root, "Found content files");
    Ok(found_files)
}
