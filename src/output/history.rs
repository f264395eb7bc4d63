//! Finished and archived projects

use comfy_table::{Cell, Color, Table};

use crate::core::{FinishedProjects, Project, calculate_project_stats};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, format_optional_date, header_cell, right_cell,
    sort_by_order, styled_cell, to_pretty_json,
};
use crate::utils::{Clock, canonical_log_date};

fn status_label(project: &Project) -> String {
    if project.is_daily {
        format!("Ended: {}", format_optional_date(project.recurrence_end()))
    } else {
        "Completed".to_string()
    }
}

fn build_section_table(projects: &[&Project], clock: &Clock, options: TableOptions) -> Table {
    let use_color = options.use_color;
    let mut rows: Vec<&Project> = projects.to_vec();
    sort_by_order(&mut rows, options.order, |p| p.created_at);

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Project", use_color),
        header_cell("Created", use_color),
        header_cell("Subtasks", use_color),
        header_cell("Sessions", use_color),
        header_cell("Status", use_color),
        header_cell("Description", use_color),
    ]);

    let status_color = color_if(use_color, Color::Green);
    for project in rows {
        let stats = calculate_project_stats(&project.subtasks);
        table.add_row(vec![
            styled_cell(&project.name, None, true),
            Cell::new(canonical_log_date(clock.day_of(project.created_at))),
            right_cell(&project.subtasks.len().to_string(), None, false),
            right_cell(&stats.completed_sessions.to_string(), None, false),
            styled_cell(&status_label(project), status_color, false),
            Cell::new(project.description.as_deref().unwrap_or("")),
        ]);
    }
    table
}

pub(crate) fn build_history_tables(
    finished: &FinishedProjects<'_>,
    clock: &Clock,
    options: TableOptions,
) -> (Table, Table) {
    (
        build_section_table(&finished.standard, clock, options),
        build_section_table(&finished.daily, clock, options),
    )
}

pub(crate) fn print_history(finished: &FinishedProjects<'_>, clock: &Clock, options: TableOptions) {
    let (completed, archived) = build_history_tables(finished, clock, options);

    println!("\n  Completed Projects\n");
    if finished.standard.is_empty() {
        println!("  None yet.");
    } else {
        println!("{completed}");
    }

    println!("\n  Archived Daily Projects\n");
    if finished.daily.is_empty() {
        println!("  None yet.\n");
    } else {
        println!("{archived}\n");
    }
}

fn project_json(project: &Project, clock: &Clock) -> serde_json::Value {
    let stats = calculate_project_stats(&project.subtasks);
    serde_json::json!({
        "id": project.id,
        "name": project.name,
        "description": project.description,
        "created": clock.day_of(project.created_at).to_string(),
        "subtasks": project.subtasks.len(),
        "completed_sessions": stats.completed_sessions,
        "time_spent": stats.time_spent,
        "recurrence_end": project.recurrence_end().map(|d| d.to_string()),
        "status": status_label(project),
    })
}

pub(crate) fn output_history_json(
    finished: &FinishedProjects<'_>,
    clock: &Clock,
    options: TableOptions,
) -> String {
    let section = |projects: &[&Project]| -> Vec<serde_json::Value> {
        let mut rows: Vec<&Project> = projects.to_vec();
        sort_by_order(&mut rows, options.order, |p| p.created_at);
        rows.into_iter().map(|p| project_json(p, clock)).collect()
    };
    to_pretty_json(&serde_json::json!({
        "completed": section(&finished.standard),
        "archived_daily": section(&finished.daily),
    }))
}
