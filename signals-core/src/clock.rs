//! Market clock: is the exchange inside its trading session right now?
//!
//! Pure functions of the supplied instant; callers pass `Utc::now()` in
//! production and fixed instants in tests.

use crate::domain::{SessionTime, TradingSession};
use chrono::{DateTime, NaiveDate, Utc};

/// Whether `now` falls inside `session`, both bounds inclusive.
///
/// The comparison is done on the exchange's local wall-clock minute. A session
/// whose open is later than its close runs through midnight.
pub fn is_open(session: &TradingSession, now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&session.timezone);
    let minute = SessionTime::from_time(local.time());

    let open = if session.wraps_midnight() {
        minute >= session.open || minute <= session.close
    } else {
        session.open <= minute && minute <= session.close
    };

    if open {
        tracing::info!(session = %session, local = %minute, "market is currently open");
    } else {
        tracing::info!(session = %session, local = %minute, "market is currently closed");
    }
    open
}

/// Calendar date of `now` in the session's timezone.
pub fn local_date(session: &TradingSession, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&session.timezone).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn session(open: &str, close: &str) -> TradingSession {
        TradingSession::new(open, close, "UTC").unwrap()
    }

    #[test]
    fn same_day_session_inclusive_bounds() {
        let s = session("09:30", "16:00");
        assert!(is_open(&s, utc(2024, 3, 4, 9, 30)));
        assert!(is_open(&s, utc(2024, 3, 4, 16, 0)));
        assert!(is_open(&s, utc(2024, 3, 4, 12, 0)));
        assert!(!is_open(&s, utc(2024, 3, 4, 9, 29)));
        assert!(!is_open(&s, utc(2024, 3, 4, 16, 1)));
    }

    #[test]
    fn zero_length_session_is_open_at_its_instant() {
        let s = session("12:00", "12:00");
        assert!(is_open(&s, utc(2024, 3, 4, 12, 0)));
        assert!(!is_open(&s, utc(2024, 3, 4, 12, 1)));
    }

    #[test]
    fn seconds_are_truncated() {
        let s = session("09:30", "16:00");
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 16, 0, 59).unwrap();
        assert!(is_open(&s, now));
    }

    #[test]
    fn midnight_wrapping_session() {
        let s = session("20:00", "16:30");
        assert!(is_open(&s, utc(2024, 3, 4, 23, 0)));
        assert!(is_open(&s, utc(2024, 3, 4, 10, 0)));
        assert!(!is_open(&s, utc(2024, 3, 4, 17, 0)));
        assert!(is_open(&s, utc(2024, 3, 4, 20, 0)));
        assert!(is_open(&s, utc(2024, 3, 4, 16, 30)));
    }

    #[test]
    fn uses_exchange_local_time() {
        // 14:00 UTC is 09:00 in New York during EST, before the 09:30 open.
        let s = TradingSession::new("09:30", "16:00", "America/New_York").unwrap();
        assert!(!is_open(&s, utc(2024, 1, 10, 14, 0)));
        assert!(is_open(&s, utc(2024, 1, 10, 15, 0)));
        // In July (EDT, UTC-4) 14:00 UTC is 10:00 local.
        assert!(is_open(&s, utc(2024, 7, 10, 14, 0)));
    }

    #[test]
    fn local_date_follows_timezone() {
        let s = TradingSession::new("09:00", "15:00", "Asia/Tokyo").unwrap();
        // 20:00 UTC on Jan 10 is already Jan 11 in Tokyo.
        assert_eq!(
            local_date(&s, utc(2024, 1, 10, 20, 0)),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
        );
    }
}
