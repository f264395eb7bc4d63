//! Project progress, completion status and finish-date estimates

use chrono::{Days, NaiveDate};

use crate::consts::SESSION_MINUTES;
use crate::core::types::{Project, SessionLog, Subtask};
use crate::utils::{Clock, end_of_day, format_time};

/// Session and time totals for one project; session sums saturate at `u32::MAX`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectStats {
    pub(crate) total_sessions: u32,
    pub(crate) completed_sessions: u32,
    /// Completed sessions at the nominal session length, formatted
    pub(crate) time_spent: String,
    /// Outstanding sessions at the nominal session length, never negative
    pub(crate) time_remaining: String,
}

pub(crate) fn calculate_project_stats(subtasks: &[Subtask]) -> ProjectStats {
    let mut total_sessions = 0u32;
    let mut completed_sessions = 0u32;

    for task in subtasks {
        total_sessions = total_sessions.saturating_add(task.target_sessions);
        completed_sessions = completed_sessions.saturating_add(task.completed_sessions);
    }

    let session_secs = SESSION_MINUTES * 60;
    let remaining = total_sessions.saturating_sub(completed_sessions);

    ProjectStats {
        total_sessions,
        completed_sessions,
        time_spent: format_time(u64::from(completed_sessions) * session_secs),
        time_remaining: format_time(u64::from(remaining) * session_secs),
    }
}

/// Whether a project belongs in the finished/archived history.
///
/// Daily projects finish once the clock has moved past the end of their
/// recurrence end day; without an end date they recur forever. Standard
/// projects finish when every subtask has met its target.
pub(crate) fn is_project_finished(project: &Project, clock: &Clock) -> bool {
    if project.is_daily {
        return match project.recurrence_end() {
            Some(end) => clock.local_now() > end_of_day(end),
            None => false,
        };
    }

    !project.subtasks.is_empty()
        && project
            .subtasks
            .iter()
            .all(|t| t.completed_sessions >= t.target_sessions)
}

/// Day by whose end the project is expected to be done.
///
/// Daily projects report their recurrence end. Standard projects add
/// `ceil(total sessions / daily target)` days to their creation day.
pub(crate) fn estimated_finish_date(
    project: &Project,
    daily_target: u32,
    clock: &Clock,
) -> Option<NaiveDate> {
    if project.is_daily {
        return project.recurrence_end();
    }

    let total = project.total_target_sessions();
    if total == 0 {
        return None;
    }

    let days = total.div_ceil(daily_target.max(1));
    clock
        .day_of(project.created_at)
        .checked_add_days(Days::new(u64::from(days)))
}

/// Number of sessions logged today against a subtask
pub(crate) fn subtask_completion_today(
    subtask_id: &str,
    history: &[SessionLog],
    today: NaiveDate,
) -> usize {
    history
        .iter()
        .filter(|log| log.subtask_id.as_deref() == Some(subtask_id))
        .filter(|log| log.day() == Some(today))
        .count()
}

/// Whether every subtask of a daily project has reached its target today,
/// counted from the session history rather than the stored counters
pub(crate) fn is_daily_project_done_today(
    project: &Project,
    history: &[SessionLog],
    clock: &Clock,
) -> bool {
    if !project.is_daily {
        return false;
    }
    let today = clock.today();
    project.subtasks.iter().all(|task| {
        subtask_completion_today(&task.id, history, today) >= task.target_sessions as usize
    })
}

/// Completion of a single subtask for progress bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Progress {
    /// Raw completion percentage, may exceed 100
    pub(crate) percent: f64,
    /// Percentage clamped to 100 for display
    pub(crate) display_percent: f64,
    pub(crate) is_completed: bool,
}

impl Progress {
    pub(crate) fn of(completed: u32, target: u32) -> Self {
        let percent = if target > 0 {
            f64::from(completed) / f64::from(target) * 100.0
        } else {
            0.0
        };
        Progress {
            percent,
            display_percent: percent.min(100.0),
            is_completed: percent >= 100.0,
        }
    }
}

pub(crate) fn subtask_progress(subtask: &Subtask) -> Progress {
    Progress::of(subtask.completed_sessions, subtask.target_sessions)
}

/// Finished projects split the way the history view shows them
#[derive(Debug, Default)]
pub(crate) struct FinishedProjects<'a> {
    pub(crate) standard: Vec<&'a Project>,
    pub(crate) daily: Vec<&'a Project>,
}

pub(crate) fn partition_finished<'a>(projects: &'a [Project], clock: &Clock) -> FinishedProjects<'a> {
    let mut finished = FinishedProjects::default();
    for project in projects.iter().filter(|p| is_project_finished(p, clock)) {
        if project.is_daily {
            finished.daily.push(project);
        } else {
            finished.standard.push(project);
        }
    }
    finished
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::utils::Timezone;
    use chrono::{DateTime, Utc};

    fn clock_at(rfc3339: &str) -> Clock {
        let now = rfc3339.parse::<DateTime<Utc>>().unwrap();
        Clock::fixed(now, Timezone::default())
    }

    fn task(id: &str, target: u32, completed: u32) -> Subtask {
        Subtask {
            id: id.to_string(),
            name: id.to_string(),
            target_sessions: target,
            completed_sessions: completed,
        }
    }

    fn standard(subtasks: Vec<Subtask>) -> Project {
        Project {
            id: "p".into(),
            name: "Project".into(),
            created_at: "2024-01-01T09:00:00Z".parse().unwrap(),
            subtasks,
            ..Default::default()
        }
    }

    fn daily(end: Option<&str>, subtasks: Vec<Subtask>) -> Project {
        Project {
            is_daily: true,
            recurrence_end_date: end.map(str::to_string),
            ..standard(subtasks)
        }
    }

    fn log(subtask: &str, date: &str) -> SessionLog {
        SessionLog {
            project_id: "p".into(),
            subtask_id: Some(subtask.into()),
            date: date.into(),
            duration: "25:00".into(),
        }
    }

    // --- calculate_project_stats ---

    #[test]
    fn stats_sum_sessions_and_time() {
        let stats = calculate_project_stats(&[task("a", 4, 2), task("b", 2, 1)]);
        assert_eq!(stats.total_sessions, 6);
        assert_eq!(stats.completed_sessions, 3);
        assert_eq!(stats.time_spent, "01:15:00");
        assert_eq!(stats.time_remaining, "01:15:00");
    }

    #[test]
    fn stats_remaining_clamped_when_overcompleted() {
        let stats = calculate_project_stats(&[task("a", 2, 5)]);
        assert_eq!(stats.completed_sessions, 5);
        assert!(stats.completed_sessions > stats.total_sessions);
        assert_eq!(stats.time_remaining, "00:00");
        assert_eq!(stats.time_spent, "02:05:00");
    }

    #[test]
    fn stats_remaining_zero_when_exactly_done() {
        let stats = calculate_project_stats(&[task("a", 3, 3)]);
        assert_eq!(stats.time_remaining, "00:00");
    }

    #[test]
    fn stats_empty() {
        let stats = calculate_project_stats(&[]);
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.time_spent, "00:00");
    }

    #[test]
    fn stats_session_sums_saturate() {
        let stats = calculate_project_stats(&[
            task("a", 3_000_000_000, 3_000_000_000),
            task("b", 3_000_000_000, 1),
        ]);
        assert_eq!(stats.total_sessions, u32::MAX);
        assert_eq!(stats.completed_sessions, u32::MAX);
        assert_eq!(stats.time_remaining, "00:00");
        assert_eq!(
            stats.time_spent,
            format_time(u64::from(u32::MAX) * SESSION_MINUTES * 60)
        );
    }

    #[test]
    fn finish_estimate_with_saturated_sessions() {
        let clock = clock_at("2024-01-01T10:00:00Z");
        let project = standard(vec![task("a", u32::MAX, 0), task("b", u32::MAX, 0)]);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(u64::from(u32::MAX.div_ceil(6)))));
        assert_eq!(estimated_finish_date(&project, 6, &clock), expected);
    }

    // --- is_project_finished ---

    #[test]
    fn standard_without_subtasks_never_finished() {
        let clock = clock_at("2030-01-01T00:00:00Z");
        assert!(!is_project_finished(&standard(vec![]), &clock));
    }

    #[test]
    fn standard_finished_when_all_targets_met() {
        let clock = clock_at("2024-01-02T00:00:00Z");
        assert!(is_project_finished(
            &standard(vec![task("a", 2, 2), task("b", 1, 3)]),
            &clock
        ));
        assert!(!is_project_finished(
            &standard(vec![task("a", 2, 2), task("b", 1, 0)]),
            &clock
        ));
    }

    #[test]
    fn daily_without_end_never_finished() {
        let clock = clock_at("2099-12-31T00:00:00Z");
        assert!(!is_project_finished(&daily(None, vec![task("a", 1, 1)]), &clock));
    }

    #[test]
    fn daily_finished_only_after_end_day() {
        let project = daily(Some("2024-02-10"), vec![task("a", 1, 0)]);
        // 23:30 Istanbul on the end day
        assert!(!is_project_finished(&project, &clock_at("2024-02-10T20:30:00Z")));
        // 00:30 Istanbul the day after
        assert!(is_project_finished(&project, &clock_at("2024-02-10T21:30:00Z")));
    }

    #[test]
    fn daily_with_unparsable_end_is_indefinite() {
        let project = daily(Some("someday"), vec![]);
        assert!(!is_project_finished(&project, &clock_at("2099-01-01T00:00:00Z")));
    }

    // --- estimated_finish_date ---

    #[test]
    fn estimate_standard_rounds_up_days() {
        let clock = clock_at("2024-01-01T12:00:00Z");
        let project = standard(vec![task("a", 4, 0), task("b", 3, 0)]);
        assert_eq!(
            estimated_finish_date(&project, 6, &clock),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn estimate_zero_target_clamped_to_one() {
        let clock = clock_at("2024-01-01T12:00:00Z");
        let project = standard(vec![task("a", 3, 0)]);
        assert_eq!(
            estimated_finish_date(&project, 0, &clock),
            NaiveDate::from_ymd_opt(2024, 1, 4)
        );
    }

    #[test]
    fn estimate_none_without_sessions() {
        let clock = clock_at("2024-01-01T12:00:00Z");
        assert_eq!(estimated_finish_date(&standard(vec![]), 6, &clock), None);
        assert_eq!(
            estimated_finish_date(&standard(vec![task("a", 0, 0)]), 6, &clock),
            None
        );
    }

    #[test]
    fn estimate_daily_returns_end_date() {
        let clock = clock_at("2024-01-01T12:00:00Z");
        assert_eq!(
            estimated_finish_date(&daily(Some("2024-03-01"), vec![]), 6, &clock),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(estimated_finish_date(&daily(None, vec![]), 6, &clock), None);
    }

    // --- daily completion from history ---

    #[test]
    fn completion_today_counts_matching_day_and_subtask() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let history = vec![
            log("a", "02 January 2024"),
            log("a", "02 January 2024"),
            log("a", "01 January 2024"),
            log("b", "02 January 2024"),
        ];
        assert_eq!(subtask_completion_today("a", &history, today), 2);
        assert_eq!(subtask_completion_today("b", &history, today), 1);
        assert_eq!(subtask_completion_today("c", &history, today), 0);
    }

    #[test]
    fn mismatched_date_format_counts_nothing() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let history = vec![log("a", "2/1/2024")];
        assert_eq!(subtask_completion_today("a", &history, today), 0);
    }

    #[test]
    fn daily_done_today_requires_every_target() {
        let clock = clock_at("2024-01-02T10:00:00Z");
        let project = daily(None, vec![task("a", 2, 0), task("b", 1, 0)]);
        let partial = vec![log("a", "02 January 2024"), log("a", "02 January 2024")];
        assert!(!is_daily_project_done_today(&project, &partial, &clock));

        let mut full = partial.clone();
        full.push(log("b", "02 January 2024"));
        assert!(is_daily_project_done_today(&project, &full, &clock));
    }

    #[test]
    fn daily_done_today_ignores_stored_counters() {
        let clock = clock_at("2024-01-02T10:00:00Z");
        let project = daily(None, vec![task("a", 1, 10)]);
        assert!(!is_daily_project_done_today(&project, &[], &clock));
    }

    #[test]
    fn standard_is_never_done_today() {
        let clock = clock_at("2024-01-02T10:00:00Z");
        let project = standard(vec![task("a", 1, 1)]);
        let history = vec![log("a", "02 January 2024")];
        assert!(!is_daily_project_done_today(&project, &history, &clock));
    }

    // --- progress & partition ---

    #[test]
    fn progress_clamps_for_display() {
        let p = subtask_progress(&task("a", 4, 6));
        assert_eq!(p.percent, 150.0);
        assert_eq!(p.display_percent, 100.0);
        assert!(p.is_completed);

        let p = subtask_progress(&task("a", 4, 1));
        assert_eq!(p.percent, 25.0);
        assert!(!p.is_completed);
    }

    #[test]
    fn progress_zero_target() {
        let p = subtask_progress(&task("a", 0, 3));
        assert_eq!(p.percent, 0.0);
        assert!(!p.is_completed);
    }

    #[test]
    fn partition_splits_standard_and_daily() {
        let clock = clock_at("2024-06-01T00:00:00Z");
        let projects = vec![
            standard(vec![task("a", 1, 1)]),
            standard(vec![task("a", 1, 0)]),
            daily(Some("2024-05-01"), vec![]),
            daily(None, vec![]),
        ];
        let finished = partition_finished(&projects, &clock);
        assert_eq!(finished.standard.len(), 1);
        assert_eq!(finished.daily.len(), 1);
        assert!(finished.daily[0].is_daily);
    }
}
