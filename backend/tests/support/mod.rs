//! Shared helpers for integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a server-local wall clock time.
pub struct FixedClock {
    local: DateTime<Local>,
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}

/// Wall clock time on the fixture day, 2026-10-19.
pub fn fixture_day_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid fixture time")
}

#[allow(dead_code, reason = "only the HTTP suite uses it")]
pub fn clock_at(now: NaiveDateTime) -> Arc<dyn Clock> {
    let local = Local
        .from_local_datetime(&now)
        .earliest()
        .expect("fixture time exists in the local time zone");
    Arc::new(FixedClock { local })
}

/// PostgreSQL URL for database-backed suites, read from
/// `LUNCHVOTE_TEST_DATABASE_URL`. Suites skip when it is unset.
#[allow(dead_code, reason = "only the database-backed suite uses it")]
pub fn test_database_url() -> Option<String> {
    std::env::var("LUNCHVOTE_TEST_DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}
