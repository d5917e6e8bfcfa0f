use chrono::{DateTime, NaiveDate, Utc};

/// Parse an ISO8601 duration string (PT1H2M3S) to total seconds.
/// Malformed input yields 0, never an error.
pub fn parse_duration_seconds(duration_str: &str) -> i64 {
    if duration_str.is_empty() || !duration_str.starts_with("PT") {
        return 0;
    }

    let duration_part = &duration_str[2..];
    let mut total_seconds = 0.0;
    let mut current_number = String::new();

    for ch in duration_part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
        } else {
            if let Ok(num) = current_number.parse::<f64>() {
                match ch {
                    'H' => total_seconds += num * 3600.0,
                    'M' => total_seconds += num * 60.0,
                    'S' => total_seconds += num,
                    _ => {}
                }
            }
            current_number.clear();
        }
    }

    total_seconds as i64
}

/// Whole days elapsed between a published-at value and `reference`, clamped
/// at 0 for future instants. Accepts a bare `YYYY-MM-DD` date or a full
/// RFC 3339 timestamp; unparseable input yields 0.
pub fn days_since(date_str: &str, reference: DateTime<Utc>) -> i64 {
    let instant = if let Ok(dt) = date_str.parse::<DateTime<Utc>>() {
        dt
    } else if let Some(dt) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        dt.and_utc()
    } else {
        return 0;
    };

    (reference - instant).num_days().max(0)
}

pub fn days_since_now(date_str: &str) -> i64 {
    days_since(date_str, Utc::now())
}

/// Round to a fixed number of decimal places for the derived-metric fields.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
