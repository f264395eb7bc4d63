//! Timeline (Gantt) rendering, one character per day

use comfy_table::{Cell, Color, Table};

use crate::core::{ProjectBar, Timeline};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, format_percent, header_cell, right_cell,
    styled_cell, to_pretty_json,
};
use crate::utils::canonical_log_date;

/// Grid row for a project: filled for completed share of its span,
/// shaded for the rest, today marked outside the bar
fn project_row(bar: &ProjectBar, timeline: &Timeline) -> String {
    let width = timeline.days.len();
    let Some(start) = bar.start_index else {
        return "·".repeat(width);
    };
    let span = bar.duration_days.max(1) as usize;
    let done = (span as f64 * bar.progress.display_percent / 100.0).round() as usize;
    (0..width)
        .map(|i| {
            if (start..start + span).contains(&i) {
                if i - start < done { '█' } else { '▒' }
            } else if Some(i) == timeline.today_index {
                '│'
            } else {
                '·'
            }
        })
        .collect()
}

/// Grid row for a subtask inside its project's span
fn subtask_row(project_start: Option<usize>, offset_days: f64, span_days: f64, width: usize) -> String {
    let Some(start) = project_start else {
        return " ".repeat(width);
    };
    let from = start as f64 + offset_days;
    let first = from.floor() as usize;
    let last = ((from + span_days).ceil() as usize).max(first + 1);
    (0..width)
        .map(|i| if (first..last).contains(&i) { '─' } else { ' ' })
        .collect()
}

/// Header ruler: today, month starts and weekends
fn axis_row(timeline: &Timeline) -> String {
    timeline
        .days
        .iter()
        .map(|d| {
            if d.is_today {
                'v'
            } else if d.is_first_of_month {
                '|'
            } else if d.is_weekend {
                '.'
            } else {
                ' '
            }
        })
        .collect()
}

pub(crate) fn build_timeline_table(timeline: &Timeline, expand: bool, options: TableOptions) -> Table {
    let use_color = options.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Project", use_color),
        header_cell("Start", use_color),
        header_cell("Days", use_color),
        header_cell("Progress", use_color),
        header_cell(&axis_row(timeline), use_color),
    ]);

    let width = timeline.days.len();
    let bar_color = color_if(use_color, Color::Yellow);
    let sub_color = color_if(use_color, Color::DarkGrey);

    for bar in &timeline.projects {
        table.add_row(vec![
            styled_cell(&bar.name, None, true),
            Cell::new(canonical_log_date(bar.start_date)),
            right_cell(&bar.duration_days.to_string(), None, false),
            right_cell(&format_percent(bar.progress.display_percent), None, false),
            styled_cell(&project_row(bar, timeline), bar_color, false),
        ]);

        if expand {
            for sub in &bar.subtasks {
                table.add_row(vec![
                    Cell::new(format!("  {}", sub.name)),
                    Cell::new(format!("+{:.1}d", sub.offset_days)),
                    right_cell(&format!("{:.1}", sub.span_days), None, false),
                    right_cell(&format_percent(sub.progress.display_percent), None, false),
                    styled_cell(
                        &subtask_row(bar.start_index, sub.offset_days, sub.span_days, width),
                        sub_color,
                        false,
                    ),
                ]);
            }
        }
    }

    table
}

pub(crate) fn print_timeline(timeline: &Timeline, expand: bool, options: TableOptions) {
    let (Some(start), Some(end)) = (timeline.start, timeline.end) else {
        return;
    };
    let table = build_timeline_table(timeline, expand, options);
    println!(
        "\n  Timeline {} .. {} ({} days)\n",
        canonical_log_date(start),
        canonical_log_date(end),
        timeline.days.len()
    );
    println!("{table}");
    println!(
        "\n  Duration = sum(target sessions) / {} (daily target) | v today, | 1st of month\n",
        timeline.daily_target
    );
}

pub(crate) fn output_timeline_json(timeline: &Timeline) -> String {
    let days: Vec<serde_json::Value> = timeline
        .days
        .iter()
        .map(|d| {
            serde_json::json!({
                "date": d.date.to_string(),
                "is_today": d.is_today,
                "is_weekend": d.is_weekend,
                "is_first_of_month": d.is_first_of_month,
            })
        })
        .collect();
    let projects: Vec<serde_json::Value> = timeline
        .projects
        .iter()
        .map(|bar| {
            let subtasks: Vec<serde_json::Value> = bar
                .subtasks
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "offset_days": s.offset_days,
                        "span_days": s.span_days,
                        "progress": s.progress.percent,
                    })
                })
                .collect();
            serde_json::json!({
                "id": bar.id,
                "name": bar.name,
                "start_date": bar.start_date.to_string(),
                "start_index": bar.start_index,
                "duration_days": bar.duration_days,
                "total_sessions": bar.total_sessions,
                "completed_sessions": bar.completed_sessions,
                "progress": bar.progress.percent,
                "subtasks": subtasks,
            })
        })
        .collect();

    to_pretty_json(&serde_json::json!({
        "start": timeline.start.map(|d| d.to_string()),
        "end": timeline.end.map(|d| d.to_string()),
        "daily_target": timeline.daily_target,
        "today_index": timeline.today_index,
        "days": days,
        "projects": projects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SortOrder;
    use crate::core::{Project, Subtask, build_timeline};
    use crate::utils::{Clock, Timezone};

    fn timeline() -> Timeline {
        let clock = Clock::fixed("2024-01-03T09:00:00Z".parse().unwrap(), Timezone::default());
        let project = Project {
            id: "p".into(),
            name: "Thesis".into(),
            created_at: "2024-01-01T08:00:00Z".parse().unwrap(),
            subtasks: vec![
                Subtask {
                    id: "a".into(),
                    name: "Draft".into(),
                    target_sessions: 6,
                    completed_sessions: 6,
                },
                Subtask {
                    id: "b".into(),
                    name: "Edit".into(),
                    target_sessions: 6,
                    completed_sessions: 0,
                },
            ],
            ..Default::default()
        };
        build_timeline(&[project], 6, &clock)
    }

    #[test]
    fn project_row_marks_span_progress_and_today() {
        let tl = timeline();
        // Jan 1 .. Jan 10: 10 days, project spans 2, half done, today is index 2
        assert_eq!(project_row(&tl.projects[0], &tl), "█▒│·······");
    }

    #[test]
    fn subtask_rows_are_contiguous() {
        assert_eq!(subtask_row(Some(0), 0.0, 1.0, 4), "─   ");
        assert_eq!(subtask_row(Some(0), 1.0, 1.0, 4), " ─  ");
        assert_eq!(subtask_row(Some(1), 0.5, 0.5, 4), " ─  ");
        assert_eq!(subtask_row(None, 0.0, 1.0, 3), "   ");
    }

    #[test]
    fn json_layout() {
        let value: serde_json::Value = serde_json::from_str(&output_timeline_json(&timeline())).unwrap();
        assert_eq!(value["start"], "2024-01-01");
        assert_eq!(value["end"], "2024-01-10");
        assert_eq!(value["days"].as_array().unwrap().len(), 10);
        assert_eq!(value["today_index"], 2);
        assert_eq!(value["projects"][0]["duration_days"], 2);
        assert_eq!(value["projects"][0]["progress"], 50.0);
        assert_eq!(value["projects"][0]["subtasks"][1]["offset_days"], 1.0);
    }

    #[test]
    fn expanded_table_lists_subtasks() {
        let opts = TableOptions {
            order: SortOrder::Asc,
            use_color: false,
        };
        let collapsed = build_timeline_table(&timeline(), false, opts).to_string();
        assert!(collapsed.contains("Thesis"));
        assert!(!collapsed.contains("Draft"));
        let expanded = build_timeline_table(&timeline(), true, opts).to_string();
        assert!(expanded.contains("Draft"));
        assert!(expanded.contains("+1.0d"));
    }
}
