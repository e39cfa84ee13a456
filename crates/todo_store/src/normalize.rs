//! Conversion of backend timestamps into `DateTime<Utc>`.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats SQLite and PostgREST use for timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a stored creation timestamp.
///
/// Accepts RFC 3339 (with offset) and offset-less SQL timestamps, which are
/// taken to be UTC. Unreadable or missing values fall back to the current
/// time so a single bad row does not break listing.
pub(crate) fn parse_created_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        tracing::warn!("Todo row has no created_at, using current time");
        return Utc::now();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }

    // PostgREST renders timestamptz as "+00:00" without the "T" sometimes
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return dt.with_timezone(&Utc);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive.and_utc();
        }
    }

    tracing::warn!(created_at = %raw, "Unparsable created_at, using current time");
    Utc::now()
}
