//! Per-locale message trees for page rendering.

use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::OnceCell;

use super::chapters::ChapterBundle;
use super::merge::{
    CONTENT_KEY,
    merge_content,
};
use crate::config::SiteSettings;
use crate::input::{
    ContentError,
    ContentStore,
};
use crate::translate::Translator;
use crate::types::{
    Locale,
    LocaleSet,
};

/// A locale's root tree with chapter fields mirrored under `content`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMessageTree {
    /// Normalized locale the tree was built for.
    locale: Locale,
    /// Root tree with `content` merged in.
    tree: Value,
}

impl MergedMessageTree {
    /// Locale of the tree.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The whole merged tree.
    #[must_use]
    pub const fn tree(&self) -> &Value {
        &self.tree
    }

    /// The merged `content` subtree.
    #[must_use]
    pub fn content(&self) -> Option<&Value> {
        self.tree.get(CONTENT_KEY)
    }

    /// Consumes the wrapper, returning the tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.tree
    }

    /// Dotted-key lookup over the tree.
    #[must_use]
    pub fn translator<'a>(&'a self, separator: &'a str) -> Translator<'a> {
        Translator::new(&self.tree, separator)
    }
}

/// Builds the merged tree for an already normalized locale.
#[must_use]
pub fn resolve_messages(locale: Locale, root: &Value) -> MergedMessageTree {
    let bundle = ChapterBundle::from_root(root);
    MergedMessageTree { locale, tree: merge_content(root, &bundle) }
}

/// Serves [`MergedMessageTree`]s, loading the content store on first use.
#[derive(Debug)]
pub struct MessageResolver {
    /// Settings the resolver was built with.
    settings: SiteSettings,
    /// Derived from `settings`.
    locales: LocaleSet,
    /// Where to load content from; `None` when built from a store.
    content_root: Option<PathBuf>,
    /// Filled on first successful load.
    store: OnceCell<ContentStore>,
}

impl MessageResolver {
    /// Resolver that reads `content_root` the first time messages are requested.
    #[must_use]
    pub fn new(settings: SiteSettings, content_root: PathBuf) -> Self {
        let locales = settings.locale_set();
        Self { settings, locales, content_root: Some(content_root), store: OnceCell::new() }
    }

    /// Resolver over an already loaded store.
    #[must_use]
    pub fn from_store(settings: SiteSettings, store: ContentStore) -> Self {
        let locales = settings.locale_set();
        Self { settings, locales, content_root: None, store: OnceCell::new_with(Some(store)) }
    }

    /// Supported locales and the default.
    #[must_use]
    pub const fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// The content store, loading it if this is the first request.
    ///
    /// A failed load leaves the cell empty so the next call retries.
    async fn store(&self) -> Result<&ContentStore, ContentError> {
        self.store
            .get_or_try_init(|| async {
                match &self.content_root {
                    Some(root) => ContentStore::load(root, &self.settings).await,
                    None => Ok(ContentStore::from_trees(self.locales.clone(), [])),
                }
            })
            .await
    }

    /// Returns the merged message tree for `locale`.
    ///
    /// Codes that are not supported exactly are normalized to the default
    /// locale before any merging (see [`LocaleSet::normalize`]).
    ///
    /// # Errors
    /// - Loading the content store failed
    /// - A supported locale has no root tree
    pub async fn get_messages(&self, locale: &str) -> Result<MergedMessageTree, ContentError> {
        let locale = self.locales.normalize(locale);
        let store = self.store().await?;
        let root = store.root(&locale).ok_or_else(|| ContentError::MissingLocale(locale.clone()))?;

        tracing::debug!(%locale, "Resolving messages");
        Ok(resolve_messages(locale, root))
    }
}
