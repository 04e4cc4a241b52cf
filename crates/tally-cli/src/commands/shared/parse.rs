use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tally_core::enums::AuditEventKind;

/// Parse an event kind (`added`, `modified`, `deleted`, `undone`, `redone`).
pub fn parse_kind(raw: &str) -> anyhow::Result<AuditEventKind> {
    raw.parse::<AuditEventKind>()
        .map_err(|error| anyhow::anyhow!("invalid kind '{raw}': {error}"))
}

/// Which end of a bare date a timestamp bound should snap to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayBound {
    Start,
    End,
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Bare dates cover the whole day: `Start` gives midnight, `End` the last
/// representable instant of that day.
pub fn parse_timestamp(raw: &str, bound: DayBound, field: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD")
    })?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| anyhow::anyhow!("invalid end-of-day time"))?,
    };
    Ok(date.and_time(time).and_utc())
}
