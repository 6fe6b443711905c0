//! Text form of position fixes: `lat,lon[,rfc3339]` per line.

use chrono::{DateTime, Utc};
use evmap_core::Coordinates;

use crate::error::LocatorError;
use crate::position::{PositionFix, UserPosition};

/// Parse one fix line.
///
/// Blank lines and `#` comments yield `Ok(None)`. Lines without a timestamp
/// are stamped with `now`.
///
/// # Errors
///
/// Returns [`LocatorError::InvalidFix`] for a wrong field count, unparseable
/// coordinates, or a bad timestamp.
pub fn parse_fix_line(line: &str, now: DateTime<Utc>) -> Result<Option<PositionFix>, LocatorError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: String| LocatorError::InvalidFix {
        line: trimmed.to_string(),
        reason,
    };

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let (lat, lon, stamp) = match fields.as_slice() {
        [lat, lon] => (*lat, *lon, None),
        [lat, lon, stamp] => (*lat, *lon, Some(*stamp)),
        _ => {
            return Err(invalid(format!(
                "expected 2 or 3 comma-separated fields, got {}",
                fields.len()
            )))
        }
    };

    let coordinates = Coordinates::parse(lat, lon).map_err(|e| invalid(e.to_string()))?;
    let received_at = match stamp {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| invalid(format!("bad timestamp {raw:?}: {e}")))?
            .with_timezone(&Utc),
        None => now,
    };

    Ok(Some(PositionFix::new(
        UserPosition::from(coordinates),
        received_at,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn parses_pair_and_stamps_now() {
        let fix = parse_fix_line("28.6315, 77.2167", now()).unwrap().unwrap();
        assert_eq!(fix.position, UserPosition::new(28.6315, 77.2167));
        assert_eq!(fix.received_at, now());
    }

    #[test]
    fn parses_explicit_timestamp() {
        let fix = parse_fix_line("1.5,2.5,2024-05-01T10:00:00+05:30", now())
            .unwrap()
            .unwrap();
        assert_eq!(fix.received_at.to_rfc3339(), "2024-05-01T04:30:00+00:00");
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(parse_fix_line("   ", now()).unwrap().is_none());
        assert!(parse_fix_line("# morning drive", now()).unwrap().is_none());
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_fix_line("1.0", now()).unwrap_err();
        assert!(matches!(err, LocatorError::InvalidFix { ref reason, .. } if reason.contains("got 1")));
    }

    #[test]
    fn rejects_unparseable_coordinate() {
        let err = parse_fix_line("north,77.2", now()).unwrap_err();
        assert!(err.to_string().contains("unparseable latitude"));
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert!(parse_fix_line("1,2,yesterday", now()).is_err());
    }
}
