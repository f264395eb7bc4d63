pub(crate) mod clock;
pub(crate) mod date;
pub(crate) mod debug;
pub(crate) mod duration;
pub(crate) mod timezone;

pub(crate) use clock::Clock;
pub(crate) use date::{
    canonical_log_date, days_in_month, end_of_day, month_label, parse_log_date, parse_month,
};
pub(crate) use debug::{debug_enabled, set_debug};
pub(crate) use duration::{
    format_focus, format_minutes_short, format_time, parse_duration_millis,
    parse_duration_to_minutes,
};
pub(crate) use timezone::Timezone;
