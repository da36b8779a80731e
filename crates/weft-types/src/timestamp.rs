use chrono::{DateTime, Utc};
use serde_json::Value;

/// Epoch values below this are treated as seconds rather than milliseconds.
///
/// 1e12 ms is 2001-09-09; producers writing second-resolution stamps stay
/// far below it for the foreseeable future.
const MILLIS_CUTOFF: f64 = 1e12;

/// Best-effort recovery of a session creation timestamp from a decoded
/// metadata value.
///
/// Producers have been observed writing `createdAt` as epoch seconds, epoch
/// milliseconds, a numeric string, or a date string. All forms normalize to
/// UTC; anything unrecognizable yields `None` (the caller falls back to file
/// mtimes).
pub fn normalize_created_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => {
            if let Ok(n) = s.parse::<f64>() {
                from_epoch(n)
            } else {
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }
        }
        _ => None,
    }
}

fn from_epoch(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    let millis = if raw < MILLIS_CUTOFF { raw * 1000.0 } else { raw };
    DateTime::from_timestamp_millis(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn epoch_seconds_are_scaled() {
        let dt = normalize_created_at(&json!(1_700_000_000)).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn epoch_millis_pass_through() {
        let dt = normalize_created_at(&json!(1_700_000_000_123i64)).unwrap();
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn numeric_string_is_parsed() {
        let dt = normalize_created_at(&json!("1700000000")).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn rfc3339_string_is_parsed() {
        let dt = normalize_created_at(&json!("2024-05-01T12:00:00Z")).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn garbage_yields_none() {
        assert!(normalize_created_at(&json!("not a date")).is_none());
        assert!(normalize_created_at(&json!(null)).is_none());
        assert!(normalize_created_at(&json!({"nested": true})).is_none());
        assert!(normalize_created_at(&json!(-5)).is_none());
    }
}
