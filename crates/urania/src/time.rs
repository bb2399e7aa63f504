//! Local birth time to UTC instant.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Unknown timezone: '{timezone}'")]
    UnknownTimezone { timezone: String },
    #[error("Cannot compose {date} {time} in {timezone}: {reason}")]
    Composition {
        date: NaiveDate,
        time: NaiveTime,
        timezone: String,
        reason: String,
    },
}

/// Resolve an IANA timezone identifier
pub fn resolve_timezone(timezone: &str) -> Result<Tz, TimeError> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone {
            timezone: timezone.to_string(),
        })
}

/// Combine a local date and time of day in `timezone` into a UTC instant.
///
/// Time is taken to whole seconds. A local time repeated by a daylight-saving
/// fall-back resolves to the earlier instant; one skipped by a spring-forward
/// transition is a composition error.
pub fn to_utc_instant(
    date: NaiveDate,
    time: NaiveTime,
    timezone: &str,
) -> Result<DateTime<Utc>, TimeError> {
    let tz = resolve_timezone(timezone)?;
    let composition_error = |reason: &str| TimeError::Composition {
        date,
        time,
        timezone: timezone.to_string(),
        reason: reason.to_string(),
    };

    let local = NaiveDate::from_ymd_opt(date.year(), date.month(), date.day())
        .and_then(|d| d.and_hms_opt(time.hour(), time.minute(), time.second()))
        .ok_or_else(|| composition_error("date or time components out of range"))?;

    let resolved = tz.from_local_datetime(&local);
    if let LocalResult::Ambiguous(_, _) = resolved {
        log::debug!(
            "{} is ambiguous in {}; using the earlier instant",
            local,
            timezone
        );
    }

    resolved
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| composition_error("local time does not exist (daylight-saving gap)"))
}
