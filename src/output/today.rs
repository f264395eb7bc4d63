//! Today's checklist for daily projects

use comfy_table::{Cell, Color, Table};

use crate::core::{
    Progress, Project, SessionLog, is_daily_project_done_today, is_project_finished,
    subtask_completion_today,
};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, header_cell, progress_bar, right_cell,
    sort_by_order, styled_cell, to_pretty_json,
};
use crate::utils::{Clock, canonical_log_date};

const BAR_WIDTH: usize = 12;

/// Daily projects still running today
fn active_daily<'a>(projects: &'a [Project], clock: &Clock, options: TableOptions) -> Vec<&'a Project> {
    let mut daily: Vec<&Project> = projects
        .iter()
        .filter(|p| p.is_daily && !is_project_finished(p, clock))
        .collect();
    sort_by_order(&mut daily, options.order, |p| p.created_at);
    daily
}

pub(crate) fn build_today_table(
    projects: &[Project],
    history: &[SessionLog],
    clock: &Clock,
    options: TableOptions,
) -> Table {
    let use_color = options.use_color;
    let today = clock.today();

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Project", use_color),
        header_cell("Subtask", use_color),
        header_cell("Today", use_color),
        header_cell("Progress", use_color),
        header_cell("Done", use_color),
    ]);

    for project in active_daily(projects, clock, options) {
        let done = is_daily_project_done_today(project, history, clock);
        let mark = if done { "yes" } else { "no" };
        let mark_color = color_if(use_color, if done { Color::Green } else { Color::Yellow });

        if project.subtasks.is_empty() {
            table.add_row(vec![
                styled_cell(&project.name, None, true),
                Cell::new("-"),
                Cell::new(""),
                Cell::new(""),
                styled_cell(mark, mark_color, false),
            ]);
            continue;
        }

        for (i, task) in project.subtasks.iter().enumerate() {
            let count = subtask_completion_today(&task.id, history, today);
            let progress = Progress::of(
                u32::try_from(count).unwrap_or(u32::MAX),
                task.target_sessions,
            );
            let (name_cell, done_cell) = if i == 0 {
                (styled_cell(&project.name, None, true), styled_cell(mark, mark_color, false))
            } else {
                (Cell::new(""), Cell::new(""))
            };
            table.add_row(vec![
                name_cell,
                Cell::new(&task.name),
                right_cell(&format!("{count} / {}", task.target_sessions), None, false),
                Cell::new(progress_bar(progress.display_percent / 100.0, BAR_WIDTH)),
                done_cell,
            ]);
        }
    }

    table
}

pub(crate) fn print_today(
    projects: &[Project],
    history: &[SessionLog],
    clock: &Clock,
    options: TableOptions,
) {
    if active_daily(projects, clock, options).is_empty() {
        println!("No active daily projects.");
        return;
    }
    let table = build_today_table(projects, history, clock, options);
    println!("\n  Daily Projects - {}\n", canonical_log_date(clock.today()));
    println!("{table}\n");
}

pub(crate) fn output_today_json(
    projects: &[Project],
    history: &[SessionLog],
    clock: &Clock,
    options: TableOptions,
) -> String {
    let today = clock.today();
    let output: Vec<serde_json::Value> = active_daily(projects, clock, options)
        .into_iter()
        .map(|project| {
            let subtasks: Vec<serde_json::Value> = project
                .subtasks
                .iter()
                .map(|task| {
                    let count = subtask_completion_today(&task.id, history, today);
                    serde_json::json!({
                        "id": task.id,
                        "name": task.name,
                        "target_sessions": task.target_sessions,
                        "completed_today": count,
                        "done": count >= task.target_sessions as usize,
                    })
                })
                .collect();
            serde_json::json!({
                "id": project.id,
                "name": project.name,
                "recurrence_end": project.recurrence_end().map(|d| d.to_string()),
                "done_today": is_daily_project_done_today(project, history, clock),
                "subtasks": subtasks,
            })
        })
        .collect();

    to_pretty_json(&serde_json::json!({
        "date": today.to_string(),
        "projects": output,
    }))
}
