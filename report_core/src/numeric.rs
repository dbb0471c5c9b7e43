//! Lenient numeric handling for caller-supplied records.
//!
//! Amounts arrive from an upstream API that does not always guarantee a
//! number. A malformed amount degrades to NaN at deserialization time and to
//! zero when it is used, so one bad record never fails a whole report.

use serde::{Deserialize, Deserializer};

/// Clamp an amount to a usable, non-negative finite value.
///
/// ```rust
/// use report_core::numeric::coerce_amount;
///
/// assert_eq!(coerce_amount(12.5), 12.5);
/// assert_eq!(coerce_amount(f64::NAN), 0.0);
/// assert_eq!(coerce_amount(-3.0), 0.0);
/// ```
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    fn into_f64(self) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            RawNumber::Other(_) => f64::NAN,
        }
    }
}

/// Deserialize a number, a numeric string, or anything else (as NaN).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.into_f64())
}

/// Like [`lenient_f64`] but `null` stays `None`.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(raw.map(RawNumber::into_f64))
}

/// Default for lenient fields that are absent from the payload.
pub(crate) fn nan() -> f64 {
    f64::NAN
}
