//! Month heatmap of focus time

use chrono::{Datelike, NaiveDate};

use crate::core::history::daily_totals;
use crate::core::types::SessionLog;
use crate::utils::{days_in_month, month_label};

/// Minutes at which a cell reaches full intensity (5 hours)
const FULL_INTENSITY_MINUTES: f64 = 300.0;
/// Minutes at which a cell's bar is full (8 hours)
const FULL_BAR_MINUTES: f64 = 480.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: NaiveDate,
    pub(crate) focus_minutes: f64,
    /// 0..=1, saturates at five hours
    pub(crate) intensity: f64,
    /// 0..=1, saturates at eight hours
    pub(crate) fill: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CalendarMonth {
    pub(crate) label: String,
    pub(crate) first_day: NaiveDate,
    /// Empty cells before the 1st in a Sunday-first week
    pub(crate) leading_blanks: u32,
    pub(crate) days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub(crate) fn total_minutes(&self) -> f64 {
        self.days.iter().map(|d| d.focus_minutes).sum()
    }

    pub(crate) fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.focus_minutes > 0.0).count()
    }

    /// Rows of seven cells, `None` for padding
    pub(crate) fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; self.leading_blanks as usize];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }
}

/// Build the heatmap for the month containing `month`
pub(crate) fn monthly_calendar(history: &[SessionLog], month: NaiveDate) -> Option<CalendarMonth> {
    let first_day = month.with_day(1)?;
    let totals = daily_totals(history);

    let days = (0..days_in_month(first_day))
        .filter_map(|offset| first_day.checked_add_days(chrono::Days::new(u64::from(offset))))
        .map(|date| {
            let focus_minutes = totals.minutes_on(date);
            CalendarDay {
                date,
                focus_minutes,
                intensity: (focus_minutes / FULL_INTENSITY_MINUTES).min(1.0),
                fill: (focus_minutes / FULL_BAR_MINUTES).min(1.0),
            }
        })
        .collect();

    Some(CalendarMonth {
        label: month_label(first_day),
        first_day,
        leading_blanks: first_day.weekday().num_days_from_sunday(),
        days,
    })
}
