//! plan-i18n
//!
//! Bilingual content resolution for the business-plan site: localized leaf
//! picking, chapter message bundles, magnitude normalization and
//! locale-prefixed paths.

pub mod config;
pub mod input;
pub mod localize;
pub mod magnitude;
pub mod messages;
pub mod path;
pub mod translate;
pub mod types;

pub use localize::{
    DualLocaleValue,
    pick,
};
pub use magnitude::{
    format_billion,
    parse_to_billion,
};
pub use messages::{
    MergedMessageTree,
    MessageResolver,
};
pub use path::build_locale_path;
pub use types::{
    Locale,
    LocaleSet,
};
