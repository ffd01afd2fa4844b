use std::fmt;
use std::str::FromStr;

/// Fraction digits a browser shows by default for a locale-formatted number.
const LOCALE_MAX_FRACTION: usize = 3;

/// Number presentation used for report values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberLocale {
    /// `1,234,567.8`
    #[default]
    EnUs,
    /// `1 234 567,8` (non-breaking space grouping)
    RuRu,
}

impl NumberLocale {
    fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => ',',
            NumberLocale::RuRu => '\u{a0}',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => '.',
            NumberLocale::RuRu => ',',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberLocale::EnUs => "en-us",
            NumberLocale::RuRu => "ru-ru",
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberLocale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(NumberLocale::EnUs),
            "ru-ru" | "ru" => Ok(NumberLocale::RuRu),
            other => Err(anyhow::anyhow!("unsupported locale: {other}")),
        }
    }
}

/// Format `value` with exactly `digits` digits after the decimal point.
///
/// Negative zero prints unsigned; a negative value that rounds to zero keeps
/// its sign, as a browser's `toFixed` does.
pub fn fixed(value: f64, digits: usize) -> String {
    // `-0.0 == 0.0`, so this clears the sign bit of negative zero only
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.digits$}")
}

/// Format `value` with thousands grouping, rounded to at most three
/// fraction digits with trailing zeros dropped.
///
/// ```rust
/// use stratest_report::format::{grouped, NumberLocale};
///
/// assert_eq!(grouped(1234567.8, NumberLocale::EnUs), "1,234,567.8");
/// ```
pub fn grouped(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.*}", LOCALE_MAX_FRACTION, value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    let negative = value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty());
    if negative {
        out.push('-');
    }

    // digits are ascii, so byte offsets are char offsets
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(digit);
    }

    if !frac_part.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rounds_to_requested_digits() {
        assert_eq!(fixed(0.123456, 5), "0.12346");
        assert_eq!(fixed(0.0005, 5), "0.00050");
        assert_eq!(fixed(3.0, 5), "3.00000");
    }

    #[test]
    fn fixed_drops_sign_of_negative_zero() {
        assert_eq!(fixed(-0.0, 5), "0.00000");
        assert_eq!(fixed(-0.000001, 5), "-0.00000");
        assert_eq!(fixed(-0.5, 5), "-0.50000");
    }

    #[test]
    fn grouped_us() {
        let l = NumberLocale::EnUs;
        assert_eq!(grouped(1234567.8, l), "1,234,567.8");
        assert_eq!(grouped(100000.0, l), "100,000");
        assert_eq!(grouped(999.0, l), "999");
        assert_eq!(grouped(1000.0, l), "1,000");
        assert_eq!(grouped(0.0, l), "0");
        assert_eq!(grouped(12.3456, l), "12.346");
        assert_eq!(grouped(-9876543.21, l), "-9,876,543.21");
    }

    #[test]
    fn grouped_ru_uses_nbsp_and_comma() {
        assert_eq!(grouped(1234567.8, NumberLocale::RuRu), "1\u{a0}234\u{a0}567,8");
        assert_eq!(grouped(42.5, NumberLocale::RuRu), "42,5");
    }

    #[test]
    fn tiny_negative_rounds_to_unsigned_zero() {
        assert_eq!(grouped(-0.0001, NumberLocale::EnUs), "0");
        assert_eq!(grouped(-0.0, NumberLocale::EnUs), "0");
    }

    #[test]
    fn locale_parses_loosely() {
        assert_eq!("en-US".parse::<NumberLocale>().unwrap(), NumberLocale::EnUs);
        assert_eq!("ru_RU".parse::<NumberLocale>().unwrap(), NumberLocale::RuRu);
        assert!("de-DE".parse::<NumberLocale>().is_err());
    }
}
