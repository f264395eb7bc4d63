//! Per-project progress report

use comfy_table::{Cell, Color, Table};

use crate::core::{
    Project, ProjectStats, SessionLog, calculate_project_stats, estimated_finish_date,
    is_daily_project_done_today, is_project_finished, logged_minutes,
};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, format_optional_date, header_cell, right_cell,
    sort_by_order, styled_cell, to_pretty_json,
};
use crate::utils::{Clock, canonical_log_date, format_minutes_short};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectStatus {
    Finished,
    DoneToday,
    InProgress,
}

impl ProjectStatus {
    fn label(self) -> &'static str {
        match self {
            ProjectStatus::Finished => "Finished",
            ProjectStatus::DoneToday => "Done today",
            ProjectStatus::InProgress => "In progress",
        }
    }

    fn color(self) -> Color {
        match self {
            ProjectStatus::Finished => Color::Green,
            ProjectStatus::DoneToday => Color::Yellow,
            ProjectStatus::InProgress => Color::White,
        }
    }
}

struct ProjectRow<'a> {
    project: &'a Project,
    stats: ProjectStats,
    estimated_finish: Option<chrono::NaiveDate>,
    /// Focus time actually recorded in the session history
    logged_minutes: f64,
    status: ProjectStatus,
}

fn build_rows<'a>(
    projects: &'a [Project],
    history: &[SessionLog],
    daily_target: u32,
    clock: &Clock,
) -> Vec<ProjectRow<'a>> {
    projects
        .iter()
        .map(|project| {
            let status = if is_project_finished(project, clock) {
                ProjectStatus::Finished
            } else if is_daily_project_done_today(project, history, clock) {
                ProjectStatus::DoneToday
            } else {
                ProjectStatus::InProgress
            };
            ProjectRow {
                project,
                stats: calculate_project_stats(&project.subtasks),
                estimated_finish: estimated_finish_date(project, daily_target, clock),
                logged_minutes: logged_minutes(&project.id, history),
                status,
            }
        })
        .collect()
}

pub(crate) fn build_stats_table(
    projects: &[Project],
    history: &[SessionLog],
    daily_target: u32,
    clock: &Clock,
    options: TableOptions,
) -> Table {
    let use_color = options.use_color;
    let mut rows = build_rows(projects, history, daily_target, clock);
    sort_by_order(&mut rows, options.order, |r| r.project.created_at);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Project", use_color),
        header_cell("Type", use_color),
        header_cell("Created", use_color),
        header_cell("Subtasks", use_color),
        header_cell("Sessions", use_color),
        header_cell("Spent", use_color),
        header_cell("Remaining", use_color),
        header_cell("Logged", use_color),
        header_cell("Est. Finish", use_color),
        header_cell("Status", use_color),
    ]);

    let mut total_sessions = 0u32;
    let mut completed_sessions = 0u32;
    let mut logged = 0.0;

    for row in &rows {
        total_sessions = total_sessions.saturating_add(row.stats.total_sessions);
        completed_sessions = completed_sessions.saturating_add(row.stats.completed_sessions);
        logged += row.logged_minutes;
        table.add_row(vec![
            Cell::new(&row.project.name),
            Cell::new(row.project.kind_label()),
            Cell::new(canonical_log_date(clock.day_of(row.project.created_at))),
            right_cell(&row.project.subtasks.len().to_string(), None, false),
            right_cell(
                &format!("{} / {}", row.stats.completed_sessions, row.stats.total_sessions),
                None,
                false,
            ),
            right_cell(&row.stats.time_spent, None, false),
            right_cell(&row.stats.time_remaining, None, false),
            right_cell(&format_minutes_short(row.logged_minutes), None, false),
            Cell::new(format_optional_date(row.estimated_finish)),
            styled_cell(row.status.label(), color_if(use_color, row.status.color()), false),
        ]);
    }

    let cyan = color_if(use_color, Color::Cyan);
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        right_cell(&format!("{completed_sessions} / {total_sessions}"), cyan, true),
        Cell::new(""),
        Cell::new(""),
        right_cell(&format_minutes_short(logged), cyan, true),
        Cell::new(""),
        Cell::new(""),
    ]);

    table
}

pub(crate) fn print_stats_table(
    projects: &[Project],
    history: &[SessionLog],
    daily_target: u32,
    clock: &Clock,
    options: TableOptions,
) {
    let table = build_stats_table(projects, history, daily_target, clock, options);
    println!("\n  Project Progress\n");
    println!("{table}");
    println!(
        "\n  Estimates assume {daily_target} sessions per day | today is {}\n",
        canonical_log_date(clock.today())
    );
}

pub(crate) fn output_stats_json(
    projects: &[Project],
    history: &[SessionLog],
    daily_target: u32,
    clock: &Clock,
    options: TableOptions,
) -> String {
    let mut rows = build_rows(projects, history, daily_target, clock);
    sort_by_order(&mut rows, options.order, |r| r.project.created_at);

    let output: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.project.id,
                "name": row.project.name,
                "description": row.project.description,
                "daily": row.project.is_daily,
                "created": clock.day_of(row.project.created_at).to_string(),
                "subtasks": row.project.subtasks.len(),
                "total_sessions": row.stats.total_sessions,
                "completed_sessions": row.stats.completed_sessions,
                "time_spent": row.stats.time_spent,
                "time_remaining": row.stats.time_remaining,
                "logged_minutes": row.logged_minutes,
                "estimated_finish": row.estimated_finish.map(|d| d.to_string()),
                "finished": row.status == ProjectStatus::Finished,
                "done_today": row.status == ProjectStatus::DoneToday,
            })
        })
        .collect();

    to_pretty_json(&serde_json::Value::Array(output))
}
