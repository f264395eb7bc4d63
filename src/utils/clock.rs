use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::utils::Timezone;

/// The current instant plus the timezone used to interpret it.
///
/// Everything that needs "now" or "today" takes a `Clock` so results are
/// reproducible in tests and with `--now`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    now: DateTime<Utc>,
    timezone: Timezone,
}

impl Clock {
    pub(crate) fn system(timezone: Timezone) -> Self {
        Self::fixed(Utc::now(), timezone)
    }

    pub(crate) fn fixed(now: DateTime<Utc>, timezone: Timezone) -> Self {
        Self { now, timezone }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub(crate) fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Wall-clock time in the clock's timezone
    pub(crate) fn local_now(&self) -> NaiveDateTime {
        self.timezone.to_fixed_offset(self.now).naive_local()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.day_of(self.now)
    }

    pub(crate) fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.timezone.day_key(instant)
    }
}
