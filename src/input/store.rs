//! Immutable per-locale content trees.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::OnceLock;

use futures::future::join_all;
use serde_json::{
    Map,
    Value,
};

use super::ContentError;
use super::content::{
    detect_locale_from_path,
    detect_namespace_from_path,
    find_content_files,
};
use crate::config::{
    ContentFileKind,
    SiteSettings,
};
use crate::localize::{
    LeafDetection,
    pick_json,
};
use crate::types::{
    Locale,
    LocaleSet,
};

/// Store installed by [`install_global`].
static GLOBAL: OnceLock<ContentStore> = OnceLock::new();

/// Root message trees, one per locale, already picked for that locale.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    /// Locales the trees were picked for.
    locales: LocaleSet,
    /// Picked root tree per locale.
    roots: HashMap<Locale, Value>,
}

/// A parsed content file awaiting placement.
struct ContentFile {
    /// Absolute path, for logs and errors.
    path: PathBuf,
    /// Path below the content root; locale and namespace come from here.
    relative: PathBuf,
    /// How the matcher classified the file.
    kind: ContentFileKind,
    /// Parsed JSON, not yet picked.
    value: Value,
}

impl ContentStore {
    /// Builds a store from trees that are already picked.
    #[must_use]
    pub fn from_trees(
        locales: LocaleSet,
        trees: impl IntoIterator<Item = (Locale, Value)>,
    ) -> Self {
        Self { locales, roots: trees.into_iter().collect() }
    }

    /// Loads every content file under `content_root`.
    ///
    /// Root files (`messages/de.json`) are placed first, namespace files
    /// (`messages/de/market.json`) next, shared dual-locale files last. A
    /// later file never replaces a key an earlier one already set.
    ///
    /// # Errors
    /// - A configured glob pattern is invalid
    /// - A content file cannot be read or is not valid JSON
    pub async fn load(content_root: &Path, settings: &SiteSettings) -> Result<Self, ContentError> {
        let locales = settings.locale_set();
        let detection = settings.leaf_detection();
        let files = read_all(content_root, find_content_files(content_root, settings)?).await?;

        let mut roots: HashMap<Locale, Map<String, Value>> = HashMap::new();
        let (shared, per_locale): (Vec<_>, Vec<_>) =
            files.into_iter().partition(|file| file.kind == ContentFileKind::Shared);
        let (namespaced, root_files): (Vec<_>, Vec<_>) = per_locale
            .into_iter()
            .partition(|file| detect_namespace_from_path(&file.relative, &locales).is_some());

        for file in &root_files {
            let Some(locale) = detect_locale_from_path(&file.relative, &locales) else {
                tracing::warn!(path = ?file.path, "Skipping content file without locale");
                continue;
            };
            let Value::Object(entries) = pick_json(locale.as_str(), &file.value, &detection, &locales)
            else {
                tracing::warn!(path = ?file.path, "Skipping root content file that is not an object");
                continue;
            };
            let root = roots.entry(locale).or_default();
            for (key, value) in entries {
                insert_absent(root, key, value, &file.path);
            }
        }

        for file in &namespaced {
            let (Some(locale), Some(namespace)) = (
                detect_locale_from_path(&file.relative, &locales),
                detect_namespace_from_path(&file.relative, &locales),
            ) else {
                tracing::warn!(path = ?file.path, "Skipping content file without locale");
                continue;
            };
            let picked = pick_json(locale.as_str(), &file.value, &detection, &locales);
            insert_absent(roots.entry(locale).or_default(), namespace, picked, &file.path);
        }

        for file in &shared {
            place_shared(&mut roots, file, &detection, &locales);
        }

        tracing::info!(locales = roots.len(), "Loaded content store");
        Ok(Self {
            locales,
            roots: roots.into_iter().map(|(locale, root)| (locale, Value::Object(root))).collect(),
        })
    }

    /// The root tree of `locale`, if any file provided one.
    #[must_use]
    pub fn root(&self, locale: &Locale) -> Option<&Value> {
        self.roots.get(locale)
    }

    /// Supported locales and the default.
    #[must_use]
    pub const fn locales(&self) -> &LocaleSet {
        &self.locales
    }
}

/// Reads and parses `files` concurrently, failing on the first bad file.
async fn read_all(
    content_root: &Path,
    files: Vec<(PathBuf, ContentFileKind)>,
) -> Result<Vec<ContentFile>, ContentError> {
    let reads = files.into_iter().map(|(path, kind)| async move {
        let relative = path.strip_prefix(content_root).unwrap_or(path.as_path()).to_path_buf();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Io { path: path.clone(), source })?;
        let value = serde_json::from_str(&text)
            .map_err(|source| ContentError::Parse { path: path.clone(), source })?;
        Ok::<_, ContentError>(ContentFile { path, relative, kind, value })
    });

    join_all(reads).await.into_iter().collect()
}

/// Picks a shared file once per supported locale, under its file stem.
fn place_shared(
    roots: &mut HashMap<Locale, Map<String, Value>>,
    file: &ContentFile,
    detection: &LeafDetection,
    locales: &LocaleSet,
) {
    let Some(key) = file.relative.file_stem().map(|stem| stem.to_string_lossy().to_string()) else {
        return;
    };
    for locale in locales.supported() {
        let picked = pick_json(locale.as_str(), &file.value, detection, locales);
        insert_absent(roots.entry(locale.clone()).or_default(), key.clone(), picked, &file.path);
    }
}

/// Inserts `key` unless `root` already has it; conflicts are logged.
fn insert_absent(root: &mut Map<String, Value>, key: String, value: Value, source: &Path) {
    if root.contains_key(&key) {
        tracing::warn!(%key, path = ?source, "Ignoring content key that is already defined");
        return;
    }
    root.insert(key, value);
}

/// Installs the process-wide store.
///
/// # Errors
/// - A store was already installed
pub fn install_global(store: ContentStore) -> Result<&'static ContentStore, ContentError> {
    GLOBAL.set(store).map_err(|_| ContentError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(ContentError::AlreadyInitialized)
}

/// The process-wide store, once installed.
#[must_use]
pub fn global() -> Option<&'static ContentStore> {
    GLOBAL.get()
}
