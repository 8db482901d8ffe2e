//! Fixed clock shared by domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

pub(crate) struct FixtureClock {
    local: DateTime<Local>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.local
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }
}

/// Server-local wall clock time on the fixture day, 2026-10-19.
pub(crate) fn today_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid fixture time")
}

/// Clock frozen at `now`, interpreted in the server's local time zone.
pub(crate) fn clock_at(now: NaiveDateTime) -> Arc<dyn Clock> {
    let local = Local
        .from_local_datetime(&now)
        .earliest()
        .expect("fixture time exists in the local time zone");
    Arc::new(FixtureClock { local })
}
