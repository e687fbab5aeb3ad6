//! Reads and validates `.plan-i18n.json` from a content root.

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    SiteSettings,
};

/// File name looked up at the content root.
pub(super) const CONFIG_FILE_NAME: &str = ".plan-i18n.json";

/// Loads the settings of `content_root`.
///
/// A missing file yields the defaults. A present file must parse and pass
/// [`SiteSettings::validate`]; there is no partial fallback.
///
/// # Errors
/// - The file exists but cannot be read
/// - JSON parse error
/// - Validation error
pub(super) fn load_from_root(content_root: &Path) -> Result<SiteSettings, ConfigError> {
    let config_path = content_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = ?config_path, "No configuration file, using defaults");
            return Ok(SiteSettings::default());
        }
        Err(err) => return Err(err.into()),
    };

    let settings: SiteSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    tracing::debug!(path = ?config_path, "Loaded configuration");
    Ok(settings)
}
