//! Session history aggregation: per-day minute totals grouped by month,
//! plus the Y-axis scale used to chart them.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::consts::CHART_MAX_MINUTES;
use crate::core::types::SessionLog;
use crate::utils::{
    debug_enabled, month_label, parse_duration_millis, parse_duration_to_minutes, parse_log_date,
};

/// Sum of logged milliseconds per calendar day
#[derive(Debug, Default)]
pub(crate) struct DailyTotals {
    pub(crate) millis: BTreeMap<NaiveDate, u64>,
    /// Logs dropped because their date could not be read
    pub(crate) skipped: usize,
}

impl DailyTotals {
    pub(crate) fn minutes_on(&self, day: NaiveDate) -> f64 {
        self.millis.get(&day).map_or(0.0, |&ms| ms as f64 / 60_000.0)
    }
}

/// Accumulate durations per day.
///
/// Totals are kept in whole milliseconds so the result does not depend on
/// the order of `history`; a day's total saturates instead of overflowing. Different spellings of the same day land on one key.
pub(crate) fn daily_totals(history: &[SessionLog]) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for log in history {
        let Some(day) = parse_log_date(&log.date) else {
            if debug_enabled() {
                eprintln!("[DEBUG] Skipping session log with unreadable date {:?}", log.date);
            }
            totals.skipped += 1;
            continue;
        };
        let ms = parse_duration_millis(&log.duration).unwrap_or_else(|| {
            if debug_enabled() {
                eprintln!("[DEBUG] Unreadable duration {:?} on {}, counted as 0", log.duration, log.date);
            }
            0
        });
        let total = totals.millis.entry(day).or_default();
        *total = total.saturating_add(ms);
    }
    totals
}

/// Focus minutes logged against one project, whatever the log dates
pub(crate) fn logged_minutes(project_id: &str, history: &[SessionLog]) -> f64 {
    history
        .iter()
        .filter(|log| log.project_id == project_id)
        .map(|log| parse_duration_to_minutes(&log.duration))
        .sum()
}

/// One bar of the performance chart
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartItem {
    pub(crate) date: NaiveDate,
    /// "02 Jan"
    pub(crate) date_label: String,
    /// "02/Tue"
    pub(crate) day_label: String,
    pub(crate) minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthGroup {
    /// "January 2024"
    pub(crate) label: String,
    pub(crate) items: Vec<ChartItem>,
}

impl MonthGroup {
    pub(crate) fn total_minutes(&self) -> f64 {
        self.items.iter().map(|i| i.minutes).sum()
    }
}

/// Chart-ready view of the whole session history
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HistoryChart {
    /// Months in calendar order, days ascending inside each
    pub(crate) months: Vec<MonthGroup>,
    pub(crate) max_y: u32,
    pub(crate) ticks: Vec<u32>,
    pub(crate) skipped: usize,
}

impl HistoryChart {
    pub(crate) fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub(crate) fn month_keys(&self) -> Vec<&str> {
        self.months.iter().map(|m| m.label.as_str()).collect()
    }

    /// Month shown by default: the most recent one
    pub(crate) fn latest_month(&self) -> Option<&MonthGroup> {
        self.months.last()
    }

    pub(crate) fn month(&self, label: &str) -> Option<&MonthGroup> {
        self.months
            .iter()
            .find(|m| m.label.eq_ignore_ascii_case(label.trim()))
    }
}

pub(crate) fn aggregate_history(history: &[SessionLog]) -> HistoryChart {
    let totals = daily_totals(history);
    if totals.millis.is_empty() {
        return HistoryChart {
            skipped: totals.skipped,
            ..HistoryChart::default()
        };
    }

    let mut groups: BTreeMap<(i32, u32), MonthGroup> = BTreeMap::new();
    let mut max_minutes = 10.0_f64;

    // BTreeMap iteration is already date-ascending
    for (&date, &ms) in &totals.millis {
        let minutes = ms as f64 / 60_000.0;
        max_minutes = max_minutes.max(minutes);
        groups
            .entry((date.year(), date.month()))
            .or_insert_with(|| MonthGroup {
                label: month_label(date),
                items: Vec::new(),
            })
            .items
            .push(ChartItem {
                date,
                date_label: date.format("%d %b").to_string(),
                day_label: date.format("%d/%a").to_string(),
                minutes,
            });
    }

    let (max_y, ticks) = y_axis_scale(max_minutes);

    HistoryChart {
        months: groups.into_values().collect(),
        max_y,
        ticks,
        skipped: totals.skipped,
    }
}

/// Round the chart ceiling up to a readable step and list the tick marks.
///
/// Step is 10 minutes up to an hour, an hour up to five hours, two hours
/// beyond that. The maximum is floored at 10 minutes and capped at
/// [`CHART_MAX_MINUTES`].
pub(crate) fn y_axis_scale(max_minutes: f64) -> (u32, Vec<u32>) {
    let max = max_minutes.max(10.0).min(CHART_MAX_MINUTES);
    let step: u32 = if max <= 60.0 {
        10
    } else if max <= 300.0 {
        60
    } else {
        120
    };
    let top = (max / f64::from(step)).ceil() as u32 * step;
    let ticks = (0..=top).step_by(step as usize).collect();
    (top, ticks)
}
