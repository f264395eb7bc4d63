//! Per-subtask progress bars

use comfy_table::{Cell, Color, Table};

use crate::core::{Progress, Project, Subtask, subtask_progress};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, format_percent, header_cell, progress_bar,
    right_cell, sort_by_order, styled_cell, to_pretty_json,
};

const BAR_WIDTH: usize = 20;

fn bar_color(progress: Progress) -> Color {
    if progress.is_completed {
        Color::Green
    } else if progress.percent > 0.0 {
        Color::Yellow
    } else {
        Color::DarkGrey
    }
}

fn subtask_cells(project_cell: Cell, task: &Subtask, use_color: bool) -> Vec<Cell> {
    let progress = subtask_progress(task);
    vec![
        project_cell,
        Cell::new(&task.name),
        right_cell(
            &format!("{} / {}", task.completed_sessions, task.target_sessions),
            None,
            false,
        ),
        styled_cell(
            &progress_bar(progress.display_percent / 100.0, BAR_WIDTH),
            color_if(use_color, bar_color(progress)),
            false,
        ),
        right_cell(&format_percent(progress.percent), None, false),
    ]
}

pub(crate) fn build_gantt_table(projects: &[Project], options: TableOptions) -> Table {
    let use_color = options.use_color;
    let mut ordered: Vec<&Project> = projects.iter().collect();
    sort_by_order(&mut ordered, options.order, |p| p.created_at);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Project", use_color),
        header_cell("Subtask", use_color),
        header_cell("Sessions", use_color),
        header_cell("Progress", use_color),
        header_cell("%", use_color),
    ]);

    for project in ordered {
        for (i, task) in project.subtasks.iter().enumerate() {
            let project_cell = if i == 0 {
                styled_cell(&project.name, None, true)
            } else {
                Cell::new("")
            };
            table.add_row(subtask_cells(project_cell, task, use_color));
        }
    }

    table
}

pub(crate) fn print_gantt(projects: &[Project], options: TableOptions) {
    let table = build_gantt_table(projects, options);
    println!("\n  Subtask Progress\n");
    println!("{table}\n");
}

pub(crate) fn output_gantt_json(projects: &[Project], options: TableOptions) -> String {
    let mut ordered: Vec<&Project> = projects.iter().collect();
    sort_by_order(&mut ordered, options.order, |p| p.created_at);

    let output: Vec<serde_json::Value> = ordered
        .iter()
        .map(|project| {
            let subtasks: Vec<serde_json::Value> = project
                .subtasks
                .iter()
                .map(|task| {
                    let progress = subtask_progress(task);
                    serde_json::json!({
                        "id": task.id,
                        "name": task.name,
                        "target_sessions": task.target_sessions,
                        "completed_sessions": task.completed_sessions,
                        "percent": progress.percent,
                        "display_percent": progress.display_percent,
                        "completed": progress.is_completed,
                    })
                })
                .collect();
            serde_json::json!({
                "id": project.id,
                "name": project.name,
                "subtasks": subtasks,
            })
        })
        .collect();

    to_pretty_json(&serde_json::Value::Array(output))
}
