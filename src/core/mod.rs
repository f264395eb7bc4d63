//! Core module - tracker data model and the pure aggregations over it

mod calendar;
mod history;
mod stats;
mod timeline;
mod types;

pub(crate) use calendar::{CalendarDay, CalendarMonth, monthly_calendar};
pub(crate) use history::{HistoryChart, MonthGroup, aggregate_history, logged_minutes};
pub(crate) use stats::{
    FinishedProjects, Progress, ProjectStats, calculate_project_stats, estimated_finish_date,
    is_daily_project_done_today, is_project_finished, partition_finished, subtask_completion_today,
    subtask_progress,
};
pub(crate) use timeline::{ProjectBar, Timeline, build_timeline};
pub(crate) use types::{AppSettings, Project, SessionLog, Subtask};
