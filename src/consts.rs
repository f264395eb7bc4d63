/// Canonical session-log date format: "02 January 2024"
pub(crate) const LOG_DATE_FORMAT: &str = "%d %B %Y";

/// Month grouping label: "January 2024"
pub(crate) const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// Nominal length of one pomodoro session
pub(crate) const SESSION_MINUTES: u64 = 25;

/// Sessions assumed completable per day when settings don't say otherwise
pub(crate) const DEFAULT_DAILY_TARGET: u32 = 6;

/// Timezone that anchors "today" unless overridden
pub(crate) const DEFAULT_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Istanbul;

/// Upper bound on the number of days a timeline grid may hold
pub(crate) const TIMELINE_MAX_DAYS: usize = 365;

/// Minimum lookahead past today shown on the timeline
pub(crate) const TIMELINE_LOOKAHEAD_DAYS: u64 = 7;

/// Ceiling for the history chart's Y axis, one year of minutes
pub(crate) const CHART_MAX_MINUTES: f64 = 525_600.0;
