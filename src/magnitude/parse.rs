//! Tolerant parsing of hand-written magnitude strings.
//!
//! Rules, applied in order:
//!
//! 1. A leading approximation marker (`~`, `≈`, `ca.`, ...) is recorded and
//!    removed. It never changes the value.
//! 2. Currency symbols and ISO codes at either end are removed. A marker
//!    behind the currency (`€~15B`) counts as well.
//! 3. A trailing unit token selects the scale. Without one, the caller's
//!    fallback unit applies: a bare `"30"` with fallback `Mrd` is 30 billion.
//! 4. The literal may use `.` or `,` as decimal point. A separator followed
//!    by exactly three digits groups thousands, unless the integer part is
//!    zero (`0,125`).

use super::unit::MagnitudeUnit;

/// Prefixes that mark a figure as approximate.
const APPROXIMATION_MARKERS: &[&str] = &["~", "≈", "ca.", "approx.", "circa"];
/// Dropped wherever they occur.
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥'];
/// Dropped at either end of the input.
const CURRENCY_CODES: &[&str] = &["EUR", "USD", "CHF", "GBP"];
/// Characters that may only group thousands, never mark decimals.
const GROUPING_ONLY: &[char] = &[' ', '\u{a0}', '\u{202f}', '\''];

/// A parsed figure before formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParsedMagnitude {
    /// Value in canonical billions.
    pub(crate) value: f64,
    /// Whether an approximation marker was present.
    pub(crate) approximate: bool,
}

/// Parses `raw` into canonical billions.
///
/// `fallback_unit` is the scale of inputs without a unit suffix; the same
/// bare numeral means different things in different document fields, so the
/// caller must always state it. Returns `None` when no number can be read.
#[must_use]
pub fn parse_to_billion(raw: &str, fallback_unit: MagnitudeUnit) -> Option<f64> {
    parse_magnitude(raw, fallback_unit).map(|parsed| parsed.value)
}

/// Like [`parse_to_billion`], also reporting approximation markers.
pub(crate) fn parse_magnitude(raw: &str, fallback_unit: MagnitudeUnit) -> Option<ParsedMagnitude> {
    let (marked_first, rest) = strip_approximation(raw);
    let without_currency = strip_currency(rest);
    let (marked_after_currency, rest) = strip_approximation(&without_currency);
    let approximate = marked_first || marked_after_currency;
    let (literal, unit_token) = split_unit(rest);

    let unit = if unit_token.is_empty() {
        fallback_unit
    } else {
        MagnitudeUnit::from_token(unit_token)?
    };

    let value = parse_literal(literal)? / unit.per_billion();
    value.is_finite().then_some(ParsedMagnitude { value, approximate })
}

/// Removes leading markers; `true` if there was one.
fn strip_approximation(input: &str) -> (bool, &str) {
    let mut rest = input.trim();
    let mut approximate = false;
    while let Some(after) = APPROXIMATION_MARKERS.iter().find_map(|marker| strip_prefix_ci(rest, marker))
    {
        rest = after.trim_start();
        approximate = true;
    }
    (approximate, rest)
}

/// Removes currency symbols anywhere and codes at either end.
fn strip_currency(input: &str) -> String {
    let without_symbols: String = input.chars().filter(|c| !CURRENCY_SYMBOLS.contains(c)).collect();
    let mut rest = without_symbols.trim();
    for code in CURRENCY_CODES {
        if let Some(after) = strip_prefix_ci(rest, code) {
            rest = after.trim();
        }
        if let Some(before) = strip_suffix_ci(rest, code) {
            rest = before.trim();
        }
    }
    rest.to_string()
}

/// ASCII case-insensitive `strip_prefix`.
fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| input.get(prefix.len()..)).flatten()
}

/// ASCII case-insensitive `strip_suffix`.
fn strip_suffix_ci<'a>(input: &'a str, suffix: &str) -> Option<&'a str> {
    let split = input.len().checked_sub(suffix.len())?;
    let tail = input.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| input.get(..split)).flatten()
}

/// Splits `"15,5 Mrd."` into `("15,5", "Mrd.")`.
fn split_unit(input: &str) -> (&str, &str) {
    input.find(char::is_alphabetic).map_or((input.trim(), ""), |index| {
        let (literal, unit) = input.split_at(index);
        (literal.trim(), unit.trim())
    })
}

/// Decimal or grouping separator.
fn is_separator(c: char) -> bool {
    c == '.' || c == ',' || GROUPING_ONLY.contains(&c)
}

/// Reads a signed number with `.`/`,` separators and optional grouping.
fn parse_literal(literal: &str) -> Option<f64> {
    let (sign, body) = match literal.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, literal.strip_prefix('+').unwrap_or(literal).trim_start()),
    };

    if !body.chars().any(|c| c.is_ascii_digit())
        || !body.chars().all(|c| c.is_ascii_digit() || is_separator(c))
    {
        return None;
    }

    let (integer, fraction) = split_decimal(body)?;
    let integer = ungroup(integer)?;
    let normalized =
        if fraction.is_empty() { integer } else { format!("{integer}.{fraction}") };

    normalized.parse::<f64>().ok().map(|value| sign * value)
}

/// Finds the decimal point, returning `(integer, fraction)`.
fn split_decimal(body: &str) -> Option<(&str, &str)> {
    let Some(position) = body.rfind(['.', ',']) else {
        return Some((body, ""));
    };
    let (integer, rest) = body.split_at(position);
    let mut chars = rest.chars();
    let separator = chars.next()?;
    let fraction = chars.as_str();

    if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let integer_is_zero = integer.chars().all(|c| c == '0');
    if fraction.len() == 3 && !integer_is_zero {
        return Some((body, ""));
    }

    // The decimal character cannot also group the integer part.
    if integer.contains(separator) {
        return None;
    }
    Some((integer, fraction))
}

/// Removes thousands separators, checking that groups have three digits.
fn ungroup(integer: &str) -> Option<String> {
    if integer.is_empty() {
        return Some("0".to_string());
    }
    let Some(separator) = integer.chars().find(|c| is_separator(*c)) else {
        return Some(integer.to_string());
    };

    let mut groups = integer.split(separator);
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use rstest::rstest;

    use super::*;

    const MIO: MagnitudeUnit = MagnitudeUnit::Million;
    const MRD: MagnitudeUnit = MagnitudeUnit::Billion;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let Some(actual) = actual else {
            panic!("expected {expected}, got None");
        };
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[rstest]
    #[case::million_suffix("900 Mio", MIO, 0.9)]
    #[case::approx_billion("~15B", MRD, 15.0)]
    #[case::bare_billion("30", MRD, 30.0)]
    #[case::bare_million("900", MIO, 0.9)]
    #[case::comma_decimal("0,9 Mrd.", MIO, 0.9)]
    #[case::dot_decimal("2.5 Mrd", MIO, 2.5)]
    #[case::suffix_beats_fallback("250 Mio.", MRD, 0.25)]
    #[case::lowercase_unit("4 mrd", MIO, 4.0)]
    #[case::no_space("12M", MRD, 0.012)]
    #[case::english_bn("1.2bn", MIO, 1.2)]
    #[case::currency_symbol("€ 3,5 Mrd.", MIO, 3.5)]
    #[case::currency_code_suffix("15 Mrd. EUR", MIO, 15.0)]
    #[case::currency_code_prefix("USD 7B", MIO, 7.0)]
    #[case::dollar_suffix("40M$", MRD, 0.04)]
    #[case::approx_word("ca. 2 Mrd", MIO, 2.0)]
    #[case::currency_then_marker("€~15B", MIO, 15.0)]
    #[case::code_then_marker("USD ~7B", MIO, 7.0)]
    #[case::thousands_dot("1.500 Mio", MRD, 1.5)]
    #[case::thousands_comma("1,500", MIO, 1.5)]
    #[case::grouped_with_decimal("1.234,5 Mio", MRD, 1.2345)]
    #[case::grouped_with_dot_decimal("1,234.5 Mio", MRD, 1.2345)]
    #[case::zero_integer_is_decimal("0,125 Mrd", MIO, 0.125)]
    #[case::long_fraction("3.14159", MRD, 3.14159)]
    #[case::leading_separator(",5 Mrd", MIO, 0.5)]
    #[case::negative("-20 Mio", MRD, -0.02)]
    #[case::space_grouping("1 500 Mio", MRD, 1.5)]
    fn parses_magnitudes(#[case] raw: &str, #[case] fallback: MagnitudeUnit, #[case] expected: f64) {
        assert_close(parse_to_billion(raw, fallback), expected);
    }

    #[rstest]
    #[case::not_a_number("n/a")]
    #[case::empty("")]
    #[case::only_marker("~")]
    #[case::unknown_unit("15 Tsd")]
    #[case::trailing_separator("15.")]
    #[case::bad_grouping("1.23.4")]
    #[case::mixed_grouping("1.234,567")]
    #[case::exponent("1e9")]
    #[case::two_numbers("15 Mio 3")]
    #[case::decimal_reused_as_grouping("1,234,5")]
    fn rejects_unparsable(#[case] raw: &str) {
        assert_eq!(parse_to_billion(raw, MIO), None);
    }

    #[rstest]
    fn spec_examples_are_exact() {
        assert_eq!(parse_to_billion("900 Mio", MIO), Some(0.9));
        assert_eq!(parse_to_billion("~15B", MRD), Some(15.0));
        assert_eq!(parse_to_billion("30", MRD), Some(30.0));
    }

    #[rstest]
    #[case("~15B", true)]
    #[case("€~15B", true)]
    #[case("€15B", false)]
    #[case("≈ 3 Mrd", true)]
    #[case("15B", false)]
    fn approximation_is_recorded_not_applied(#[case] raw: &str, #[case] approximate: bool) {
        let parsed = parse_magnitude(raw, MRD);

        assert_eq!(parsed.map(|p| p.approximate), Some(approximate));
    }
}
