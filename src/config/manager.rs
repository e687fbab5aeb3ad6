//! Holds the validated settings for one content root.

use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
    loader,
};
use crate::types::LocaleSet;

/// Current site settings, replaced as a whole on every successful load.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Last successfully loaded settings, defaults until then.
    current_settings: SiteSettings,
}

impl ConfigManager {
    /// Manager holding the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SiteSettings::default() }
    }

    /// Loads settings for `content_root`, or the defaults without a root.
    ///
    /// On error the previous settings stay in place.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, content_root: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!(root = ?content_root, "Loading settings");

        self.current_settings = match content_root {
            Some(root) => loader::load_from_root(root)?,
            None => SiteSettings::default(),
        };
        Ok(())
    }

    /// The active settings.
    #[must_use]
    pub const fn get_settings(&self) -> &SiteSettings {
        &self.current_settings
    }

    /// Locale set derived from the active settings.
    #[must_use]
    pub fn locale_set(&self) -> LocaleSet {
        self.current_settings.locale_set()
    }
}
