//! Locale-aware rendering of canonical billions.

use crate::types::Locale;

/// Decimal mark and unit word for one locale family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberStyle {
    /// `,` or `.`.
    decimal_mark: char,
    /// Word for billions.
    unit: &'static str,
}

/// `15,5 Mrd.`
const GERMAN: NumberStyle = NumberStyle { decimal_mark: ',', unit: "Mrd." };
/// `15.5 bn`
const ENGLISH: NumberStyle = NumberStyle { decimal_mark: '.', unit: "bn" };

impl NumberStyle {
    /// German for any `de` locale, English otherwise.
    fn for_locale(locale: &str) -> Self {
        if Locale::new(locale).primary_subtag().eq_ignore_ascii_case("de") { GERMAN } else { ENGLISH }
    }
}

/// Renders `value` (in billions) for `locale`.
///
/// Values below 10 keep at most one fractional digit (`0,9 Mrd.`, `3 Mrd.`),
/// larger values none (`15 Mrd.`). German locales use a decimal comma and
/// `Mrd.`, all others a decimal point and `bn`.
#[must_use]
pub fn format_billion(value: f64, locale: &str) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let style = NumberStyle::for_locale(locale);

    let number = if value.abs() < 10.0 {
        let rounded = non_negative_zero((value * 10.0).round() / 10.0);
        let text = format!("{rounded:.1}");
        text.strip_suffix(".0").map_or_else(|| text.clone(), str::to_string)
    } else {
        format!("{:.0}", value.round())
    };

    let number =
        if style.decimal_mark == '.' { number } else { number.replace('.', &style.decimal_mark.to_string()) };
    format!("{number} {}", style.unit)
}

/// Maps `-0.0` to `0.0` so tiny negative values do not render as `-0`.
fn non_negative_zero(value: f64) -> f64 {
    if value.abs() < f64::EPSILON { 0.0 } else { value }
}
