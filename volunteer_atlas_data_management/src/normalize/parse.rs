use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rand::Rng;

const DATETIME_FORMATS: [&str; 4] = [
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Parses a form submission time. Zoned inputs are reduced to their UTC time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `Ok(None)` for a blank cell, `Err(())` for text that is not a finite number.
pub fn parse_coordinate(value: &str) -> Result<Option<f64>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

/// Service radius in kilometers, e.g. "12km", " 7.5 KM ", "3".
pub fn parse_radius_km(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = match value.len().checked_sub(2) {
        Some(split) if value.is_char_boundary(split) && value[split..].eq_ignore_ascii_case("km") => &value[..split],
        _ => value,
    };

    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|km| km.is_finite() && *km >= 0.)
}

/// Adds a uniform offset in `[-max_offset, max_offset]`.
pub fn jitter<R: Rng + ?Sized>(value: f64, max_offset: f64, rng: &mut R) -> f64 {
    if max_offset <= 0. {
        return value;
    }

    value + rng.random_range(-max_offset..=max_offset)
}
