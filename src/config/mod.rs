//! Site configuration: supported locales, key separator and content file patterns.
mod loader;
mod manager;
mod matcher;
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    ContentFileKind,
    ContentMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    ContentFilesConfig,
    LeafDetectionMode,
    SiteSettings,
    ValidationError,
};
