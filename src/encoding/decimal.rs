//! Fixed two-decimal JSON numbers
//!
//! `serde_json` prints `150.5` for `150.50`. Callers of the engine expect the
//! measurements with exactly two fraction digits, so they are written as raw
//! JSON number text instead.

use serde::Serialize;
use serde::Serializer;
use serde::ser::Error;
use serde_json::value::RawValue;

/// Serialize a finite `f64` as a JSON number with exactly two decimals.
///
/// Use with `#[serde(serialize_with = "crate::encoding::decimal::two_places")]`.
/// Fails for NaN and infinities, which JSON cannot represent.
pub fn two_places<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!("non-finite value {}", value)));
    }
    let raw = RawValue::from_string(format!("{:.2}", value)).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}
