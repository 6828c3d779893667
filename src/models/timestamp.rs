use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse a server timestamp. The server emits naive ISO-8601 for rows read
/// back from SQLite and RFC 3339 for fresh ones; both are taken as UTC.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Unparsable timestamps become `None` instead of failing the whole payload.
pub fn lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_naive_iso() {
        let dt = parse("2024-03-02T08:30:15.123456").unwrap();
        assert_eq!(dt.day(), 2);
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_rfc3339_offset() {
        let dt = parse("2024-03-02T08:30:15+02:00").unwrap();
        assert_eq!(dt.hour(), 6);
    }

    #[test]
    fn test_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
