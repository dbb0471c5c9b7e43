//! # Formatting Utilities
//!
//! Locale-aware currency, number, percent and date formatting plus text
//! sanitization and truncation. All functions are pure; the locale is passed
//! explicitly.
//!
//! ## Example
//!
//! ```rust
//! use report_core::format::{format_currency, Locale};
//!
//! assert_eq!(format_currency(1234.5, &Locale::en_us()), "$1,234.50");
//! assert_eq!(format_currency(1234.5, &Locale::fr_mr()), "1\u{a0}234,50\u{a0}MRU");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ellipsis marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1 234,50 MRU`
    Suffix,
}

/// Formatting conventions for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locale {
    pub decimal_separator: char,
    pub group_separator: char,
    pub currency_symbol: String,
    pub symbol_position: SymbolPosition,
    /// chrono strftime pattern for dates
    pub date_format: String,
    /// chrono strftime pattern for times
    pub time_format: String,
    /// Insert a space between number and `%`
    pub percent_space: bool,
}

impl Locale {
    /// US English, US dollars (`$1,234.50`, `3/7/2025`).
    pub fn en_us() -> Self {
        Locale {
            decimal_separator: '.',
            group_separator: ',',
            currency_symbol: "$".to_string(),
            symbol_position: SymbolPosition::Prefix,
            date_format: "%-m/%-d/%Y".to_string(),
            time_format: "%-I:%M:%S %p".to_string(),
            percent_space: false,
        }
    }

    /// French (Mauritania), ouguiya (`1 234,50 MRU`, `07/03/2025`).
    pub fn fr_mr() -> Self {
        Locale {
            decimal_separator: ',',
            group_separator: '\u{a0}',
            currency_symbol: "MRU".to_string(),
            symbol_position: SymbolPosition::Suffix,
            date_format: "%d/%m/%Y".to_string(),
            time_format: "%H:%M:%S".to_string(),
            percent_space: true,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

/// Named locale presets selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocaleId {
    #[default]
    EnUs,
    FrMr,
}

impl LocaleId {
    pub fn locale(&self) -> Locale {
        match self {
            LocaleId::EnUs => Locale::en_us(),
            LocaleId::FrMr => Locale::fr_mr(),
        }
    }

    /// Parse a tag such as `en-US`, `en_us` or `fr-MR`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Some(LocaleId::EnUs),
            "fr-mr" | "fr" => Some(LocaleId::FrMr),
            _ => None,
        }
    }
}

/// Format a number with grouping and a fixed number of decimals.
///
/// Non-finite input renders as zero.
pub fn format_number(value: f64, decimals: usize, locale: &Locale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(locale.group_separator);
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Format an amount of money with two decimals and the locale's symbol.
pub fn format_currency(value: f64, locale: &Locale) -> String {
    let number = format_number(value, 2, locale);
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };
    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{}{digits}", locale.currency_symbol),
        SymbolPosition::Suffix => format!("{sign}{digits}\u{a0}{}", locale.currency_symbol),
    }
}

/// Format a quantity: integers without decimals, otherwise up to two.
pub fn format_quantity(value: f64, locale: &Locale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if (value - value.round()).abs() < 1e-9 {
        format_number(value, 0, locale)
    } else {
        let s = format_number(value, 2, locale);
        s.trim_end_matches('0')
            .trim_end_matches(locale.decimal_separator)
            .to_string()
    }
}

/// Format a percentage with one decimal (`12.5%`, `12,5 %`).
pub fn format_percent(value: f64, locale: &Locale) -> String {
    let number = format_number(value, 1, locale);
    if locale.percent_space {
        format!("{number}\u{a0}%")
    } else {
        format!("{number}%")
    }
}

pub fn format_date(date: &DateTime<Utc>, locale: &Locale) -> String {
    date.format(&locale.date_format).to_string()
}

pub fn format_datetime(date: &DateTime<Utc>, locale: &Locale) -> String {
    format!(
        "{} {}",
        date.format(&locale.date_format),
        date.format(&locale.time_format)
    )
}

/// Uppercase the first character, leave the rest untouched (`in-progress` → `In-progress`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip control characters, collapse runs of whitespace and trim.
pub fn sanitize_text(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitize but keep paragraph breaks (blank-line separated paragraphs).
pub fn sanitize_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(sanitize_text)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Truncate to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number_grouping() {
        let us = Locale::en_us();
        assert_eq!(format_number(0.0, 2, &us), "0.00");
        assert_eq!(format_number(999.0, 0, &us), "999");
        assert_eq!(format_number(1000.0, 0, &us), "1,000");
        assert_eq!(format_number(1234567.891, 2, &us), "1,234,567.89");
        assert_eq!(format_number(-1234.5, 1, &us), "-1,234.5");
        assert_eq!(format_number(f64::NAN, 2, &us), "0.00");
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 2, &Locale::en_us()), "0.00");
    }

    #[test]
    fn test_format_currency_locales() {
        assert_eq!(format_currency(200.0, &Locale::en_us()), "$200.00");
        assert_eq!(format_currency(-200.0, &Locale::en_us()), "-$200.00");
        assert_eq!(format_currency(1500000.0, &Locale::fr_mr()), "1\u{a0}500\u{a0}000,00\u{a0}MRU");
    }

    #[test]
    fn test_format_quantity() {
        let us = Locale::en_us();
        assert_eq!(format_quantity(12.0, &us), "12");
        assert_eq!(format_quantity(2.5, &us), "2.5");
        assert_eq!(format_quantity(1250.25, &us), "1,250.25");
        assert_eq!(format_quantity(10.001, &us), "10");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.34, &Locale::en_us()), "12.3%");
        assert_eq!(format_percent(12.34, &Locale::fr_mr()), "12,3\u{a0}%");
    }

    #[test]
    fn test_format_dates() {
        let d = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(format_date(&d, &Locale::en_us()), "3/7/2025");
        assert_eq!(format_date(&d, &Locale::fr_mr()), "07/03/2025");
        assert_eq!(format_datetime(&d, &Locale::fr_mr()), "07/03/2025 14:05:09");
        assert_eq!(format_datetime(&d, &Locale::en_us()), "3/7/2025 2:05:09 PM");
    }

    #[test]
    fn test_locale_id_parse() {
        assert_eq!(LocaleId::parse("en-US"), Some(LocaleId::EnUs));
        assert_eq!(LocaleId::parse("fr_MR"), Some(LocaleId::FrMr));
        assert_eq!(LocaleId::parse("de-DE"), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("in-progress"), "In-progress");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  a\tb\u{7}\n c  "), "a b c");
        assert_eq!(sanitize_paragraphs("one\ntwo\n\n\n\nthree"), vec!["one two", "three"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Reinforced concrete", 10), "Reinforce…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
