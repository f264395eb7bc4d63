use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::consts::DEFAULT_TIMEZONE;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Named(DEFAULT_TIMEZONE)
    }
}

impl Timezone {
    /// Parse a timezone option. Absent or blank means the default
    /// (Europe/Istanbul); "local" selects the process timezone.
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Timezone::default());
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Calendar day an instant falls on in this timezone.
    ///
    /// This is the only instant-to-day conversion; every "same day"
    /// comparison goes through it.
    pub(crate) fn day_key(self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_fixed_offset(utc).date_naive()
    }

    pub(crate) fn name(self) -> String {
        match self {
            Timezone::Local => "local".to_string(),
            Timezone::Named(tz) => tz.name().to_string(),
        }
    }
}
