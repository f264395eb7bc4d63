//! Day-indexed project timeline (Gantt) grid

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::consts::{TIMELINE_LOOKAHEAD_DAYS, TIMELINE_MAX_DAYS};
use crate::core::stats::Progress;
use crate::core::types::{Project, effective_daily_target};
use crate::utils::{Clock, debug_enabled};

/// One column of the timeline header
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimelineDay {
    pub(crate) date: NaiveDate,
    pub(crate) is_today: bool,
    pub(crate) is_weekend: bool,
    pub(crate) is_first_of_month: bool,
}

/// A subtask laid out inside its project's bar
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SubtaskBar {
    pub(crate) id: String,
    pub(crate) name: String,
    /// Days from the project start, fractional
    pub(crate) offset_days: f64,
    pub(crate) span_days: f64,
    pub(crate) progress: Progress,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProjectBar {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) start_date: NaiveDate,
    /// Grid column of the creation day, `None` when it falls outside the grid
    pub(crate) start_index: Option<usize>,
    pub(crate) duration_days: u32,
    pub(crate) total_sessions: u32,
    pub(crate) completed_sessions: u32,
    pub(crate) progress: Progress,
    pub(crate) subtasks: Vec<SubtaskBar>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Timeline {
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
    pub(crate) days: Vec<TimelineDay>,
    pub(crate) today_index: Option<usize>,
    pub(crate) projects: Vec<ProjectBar>,
    pub(crate) daily_target: u32,
}

impl Timeline {
    pub(crate) fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Days a project needs at `daily_target` sessions per day
pub(crate) fn project_duration_days(project: &Project, daily_target: u32) -> u32 {
    project
        .total_target_sessions()
        .div_ceil(effective_daily_target(daily_target))
}

/// Lay projects out on a day grid.
///
/// The grid starts on the earliest creation day and ends on the later of
/// the furthest estimated finish and a week from today. It never holds more
/// than [`TIMELINE_MAX_DAYS`] columns; longer ranges are cut off.
pub(crate) fn build_timeline(projects: &[Project], daily_target: u32, clock: &Clock) -> Timeline {
    let daily_target = effective_daily_target(daily_target);
    if projects.is_empty() {
        return Timeline {
            daily_target,
            ..Timeline::default()
        };
    }

    let today = clock.today();
    let created: Vec<NaiveDate> = projects.iter().map(|p| clock.day_of(p.created_at)).collect();

    let Some(&start) = created.iter().min() else {
        return Timeline::default();
    };

    let lookahead = today
        .checked_add_days(Days::new(TIMELINE_LOOKAHEAD_DAYS))
        .unwrap_or(today);
    let end = projects
        .iter()
        .zip(&created)
        .map(|(p, day)| {
            day.checked_add_days(Days::new(u64::from(project_duration_days(p, daily_target))))
                .unwrap_or(NaiveDate::MAX)
        })
        .chain(std::iter::once(lookahead))
        .max()
        .unwrap_or(lookahead);

    let days: Vec<TimelineDay> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .take(TIMELINE_MAX_DAYS)
        .map(|date| TimelineDay {
            date,
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_first_of_month: date.day() == 1,
        })
        .collect();

    if debug_enabled() && days.len() == TIMELINE_MAX_DAYS && days.last().is_some_and(|d| d.date < end) {
        eprintln!(
            "[DEBUG] Timeline {start} .. {end} truncated to {TIMELINE_MAX_DAYS} days"
        );
    }

    let index_of = |date: NaiveDate| days.iter().position(|d| d.date == date);
    let today_index = index_of(today);

    let bars = projects
        .iter()
        .zip(&created)
        .map(|(project, &start_date)| ProjectBar {
            id: project.id.clone(),
            name: project.name.clone(),
            start_date,
            start_index: index_of(start_date),
            duration_days: project_duration_days(project, daily_target),
            total_sessions: project.total_target_sessions(),
            completed_sessions: project.total_completed_sessions(),
            progress: Progress::of(
                project.total_completed_sessions(),
                project.total_target_sessions(),
            ),
            subtasks: layout_subtasks(project, daily_target),
        })
        .collect();

    Timeline {
        start: Some(start),
        end: Some(end),
        days,
        today_index,
        projects: bars,
        daily_target,
    }
}

/// Subtasks sit back to back inside the project bar, each as long as its
/// share of sessions at the daily target.
fn layout_subtasks(project: &Project, daily_target: u32) -> Vec<SubtaskBar> {
    let per_day = f64::from(daily_target);
    let mut cumulative = 0u32;
    project
        .subtasks
        .iter()
        .map(|task| {
            let bar = SubtaskBar {
                id: task.id.clone(),
                name: task.name.clone(),
                offset_days: f64::from(cumulative) / per_day,
                span_days: f64::from(task.target_sessions) / per_day,
                progress: Progress::of(task.completed_sessions, task.target_sessions),
            };
            cumulative = cumulative.saturating_add(task.target_sessions);
            bar
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::types::Subtask;
    use crate::utils::Timezone;
    use chrono::{DateTime, Utc};

    fn clock_at(rfc3339: &str) -> Clock {
        Clock::fixed(rfc3339.parse::<DateTime<Utc>>().unwrap(), Timezone::default())
    }

    fn task(id: &str, target: u32, completed: u32) -> Subtask {
        Subtask {
            id: id.into(),
            name: id.into(),
            target_sessions: target,
            completed_sessions: completed,
        }
    }

    fn project(id: &str, created: &str, subtasks: Vec<Subtask>) -> Project {
        Project {
            id: id.into(),
            name: id.into(),
            created_at: created.parse().unwrap(),
            subtasks,
            ..Default::default()
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn one_day_project_gets_week_of_lookahead() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let p = project("p", "2024-01-01T08:00:00Z", vec![task("a", 3, 0), task("b", 3, 0)]);
        let timeline = build_timeline(&[p], 6, &clock);

        assert_eq!(timeline.projects[0].duration_days, 1);
        assert!(timeline.days.len() >= 8);
        assert_eq!(timeline.days.len(), 8);
        assert_eq!(timeline.start, Some(d(2024, 1, 1)));
        assert_eq!(timeline.end, Some(d(2024, 1, 8)));
        assert_eq!(timeline.today_index, Some(0));
        assert!(timeline.days[0].is_today);
        assert_eq!(timeline.projects[0].start_index, Some(0));
    }

    #[test]
    fn long_project_extends_past_lookahead() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let p = project("p", "2024-01-01T08:00:00Z", vec![task("a", 60, 0)]);
        let timeline = build_timeline(&[p], 6, &clock);
        assert_eq!(timeline.projects[0].duration_days, 10);
        assert_eq!(timeline.end, Some(d(2024, 1, 11)));
        assert_eq!(timeline.days.len(), 11);
    }

    #[test]
    fn start_is_earliest_creation_day() {
        let clock = clock_at("2024-01-10T09:00:00Z");
        let projects = vec![
            project("late", "2024-01-08T08:00:00Z", vec![task("a", 6, 0)]),
            project("early", "2024-01-03T08:00:00Z", vec![task("a", 6, 0)]),
        ];
        let timeline = build_timeline(&projects, 6, &clock);
        assert_eq!(timeline.start, Some(d(2024, 1, 3)));
        assert_eq!(timeline.projects[0].start_index, Some(5));
        assert_eq!(timeline.projects[1].start_index, Some(0));
        assert_eq!(timeline.today_index, Some(7));
    }

    #[test]
    fn range_capped_at_365_days() {
        let clock = clock_at("2024-06-01T09:00:00Z");
        // Epoch creation date, as produced by an unreadable timestamp
        let p = project("old", "1970-01-01T00:00:00Z", vec![task("a", 1, 0)]);
        let timeline = build_timeline(&[p], 6, &clock);
        assert_eq!(timeline.days.len(), 365);
        assert_eq!(timeline.today_index, None);
        assert_eq!(timeline.projects[0].start_index, Some(0));
    }

    #[test]
    fn creation_day_uses_clock_timezone() {
        let clock = clock_at("2024-01-02T09:00:00Z");
        // 22:00 UTC on the 1st is already the 2nd in Istanbul
        let p = project("p", "2024-01-01T22:00:00Z", vec![task("a", 1, 0)]);
        let timeline = build_timeline(&[p], 6, &clock);
        assert_eq!(timeline.start, Some(d(2024, 1, 2)));
    }

    #[test]
    fn subtasks_laid_out_contiguously() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let p = project(
            "p",
            "2024-01-01T08:00:00Z",
            vec![task("a", 3, 3), task("b", 6, 3), task("c", 0, 0)],
        );
        let timeline = build_timeline(&[p], 6, &clock);
        let subs = &timeline.projects[0].subtasks;
        assert_eq!(subs[0].offset_days, 0.0);
        assert_eq!(subs[0].span_days, 0.5);
        assert_eq!(subs[1].offset_days, 0.5);
        assert_eq!(subs[1].span_days, 1.0);
        assert_eq!(subs[1].progress.percent, 50.0);
        assert_eq!(subs[2].offset_days, 1.5);
        assert_eq!(subs[2].progress.percent, 0.0);
        assert_eq!(timeline.projects[0].progress.percent, 6.0 / 9.0 * 100.0);
    }

    #[test]
    fn zero_daily_target_uses_default() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let p = project("p", "2024-01-01T08:00:00Z", vec![task("a", 12, 0)]);
        let timeline = build_timeline(&[p], 0, &clock);
        assert_eq!(timeline.daily_target, 6);
        assert_eq!(timeline.projects[0].duration_days, 2);
    }

    #[test]
    fn empty_project_has_zero_duration_and_progress() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let timeline = build_timeline(&[project("p", "2024-01-01T08:00:00Z", vec![])], 6, &clock);
        assert_eq!(timeline.projects[0].duration_days, 0);
        assert_eq!(timeline.projects[0].progress.percent, 0.0);
    }

    #[test]
    fn huge_targets_saturate_and_stay_capped() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let p = project(
            "p",
            "2024-01-01T08:00:00Z",
            vec![
                task("a", 3_000_000_000, 0),
                task("b", 3_000_000_000, 0),
                task("c", 6, 0),
            ],
        );
        let timeline = build_timeline(&[p], 6, &clock);
        let bar = &timeline.projects[0];
        assert_eq!(bar.total_sessions, u32::MAX);
        assert_eq!(bar.duration_days, u32::MAX.div_ceil(6));
        assert_eq!(timeline.days.len(), TIMELINE_MAX_DAYS);
        assert_eq!(bar.subtasks[1].offset_days, 500_000_000.0);
        assert_eq!(bar.subtasks[2].offset_days, f64::from(u32::MAX) / 6.0);
    }

    #[test]
    fn no_projects_no_days() {
        let clock = clock_at("2024-01-01T09:00:00Z");
        let timeline = build_timeline(&[], 6, &clock);
        assert!(timeline.is_empty());
        assert!(timeline.days.is_empty());
        assert_eq!(timeline.start, None);
    }

    #[test]
    fn header_flags() {
        let clock = clock_at("2024-02-27T09:00:00Z");
        let p = project("p", "2024-02-27T08:00:00Z", vec![task("a", 1, 0)]);
        let timeline = build_timeline(&[p], 6, &clock);
        // 2 March 2024 is a Saturday
        let index_of = |date: NaiveDate| timeline.days.iter().position(|day| day.date == date).unwrap();
        let sat = index_of(d(2024, 3, 2));
        assert!(timeline.days[sat].is_weekend);
        let first = index_of(d(2024, 3, 1));
        assert!(timeline.days[first].is_first_of_month);
        assert!(!timeline.days[first].is_weekend);
    }
}
