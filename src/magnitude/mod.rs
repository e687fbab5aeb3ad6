//! Market and monetary figures: parsing into canonical billions and
//! rendering back for a locale.
mod format;
mod parse;
mod unit;

pub use format::format_billion;
pub use parse::parse_to_billion;
pub use unit::{
    MagnitudeUnit,
    MagnitudeUnitError,
};

/// A figure normalized to billions, with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMagnitude {
    /// Value in canonical billions.
    pub value: f64,
    /// The source carried an approximation marker such as `~`.
    pub approximate: bool,
    /// Locale-formatted text, prefixed with `~` when approximate.
    pub display: String,
}

/// Parses `raw` and formats it for `locale` in one step.
///
/// `None` means "no figure available"; the caller should omit it.
#[must_use]
pub fn normalize(raw: &str, fallback_unit: MagnitudeUnit, locale: &str) -> Option<NormalizedMagnitude> {
    let Some(parsed) = parse::parse_magnitude(raw, fallback_unit) else {
        tracing::debug!(raw, "Magnitude could not be parsed");
        return None;
    };
    let formatted = format_billion(parsed.value, locale);
    let display = if parsed.approximate { format!("~{formatted}") } else { formatted };
    Some(NormalizedMagnitude { value: parsed.value, approximate: parsed.approximate, display })
}
