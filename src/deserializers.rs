//! Forgiving deserializers for survey rows.
//!
//! Exported survey data is messy: scores arrive as numbers, numeric strings,
//! empty strings, `null`, or free text. None of these may fail a row. A value
//! that cannot be read as a finite number becomes `None` and is later
//! excluded from its aggregate instead of counting as zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a finite `f64` out of a JSON value.
///
/// # Accepted Formats
///
/// * **Number**: `2.4`, `3`
/// * **String numeric**: `"2.4"`, `" 3 "`
///
/// Everything else (null, booleans, arrays, `"n/a"`, `NaN`) yields `None`.
pub fn score_from_value(v: &Value) -> Option<f64> {
    let val = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    val.is_finite().then_some(val)
}

/// Score field deserializer; never returns an error.
pub fn de_option_score_forgiving<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Value>::deserialize(deserializer)?;
    Ok(opt.as_ref().and_then(score_from_value))
}

/// Small integer ids (dimension, construct). Accepts `3`, `3.0`, `"3"`.
/// Fractional, out-of-range or unparseable input yields `None`.
pub fn de_option_u8_forgiving<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Value>::deserialize(deserializer)?;
    let Some(val) = opt.as_ref().and_then(score_from_value) else {
        return Ok(None);
    };
    if val.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&val) {
        return Ok(None);
    }
    Ok(Some(val as u8))
}

/// Demographic labels. Numbers are stringified (age brackets are sometimes
/// exported as bare integers); blank strings become `None`.
pub fn de_option_string_forgiving<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Value>::deserialize(deserializer)?;
    Ok(match opt {
        Some(Value::String(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
