use crate::cli::{Cli, Commands};
use crate::core::{aggregate_history, build_timeline, monthly_calendar, partition_finished};
use crate::data::Snapshot;
use crate::error::AppError;
use crate::output::{
    TableOptions, output_calendar_json, output_gantt_json, output_graph_json,
    output_history_json, output_stats_json, output_timeline_json, output_today_json,
    print_calendar, print_gantt, print_graph_table, print_history, print_stats_table,
    print_timeline, print_today,
};
use crate::utils::{Clock, month_label, parse_month};

fn print_json(json: &str) {
    println!("{json}");
}

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) snapshot: &'a Snapshot,
    pub(crate) clock: Clock,
    pub(crate) daily_target: u32,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            order: self.cli.order,
            use_color: self.cli.use_color(),
        }
    }
}

fn handle_stats(ctx: &CommandContext<'_>) {
    let projects = &ctx.snapshot.projects;
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    let history = &ctx.snapshot.history;
    if ctx.cli.json {
        let json = output_stats_json(
            projects,
            history,
            ctx.daily_target,
            &ctx.clock,
            ctx.table_options(),
        );
        print_json(&json);
    } else {
        print_stats_table(
            projects,
            history,
            ctx.daily_target,
            &ctx.clock,
            ctx.table_options(),
        );
    }
}

/// Resolve a month argument to the chart's month label.
///
/// Accepts either a label ("January 2024") or YYYY-MM; without an
/// argument the latest month with data is used.
fn resolve_graph_month(requested: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(raw) = requested else {
        return Ok(None);
    };
    parse_month(raw)
        .map(|first| Some(month_label(first)))
        .ok_or_else(|| AppError::InvalidMonth {
            input: raw.to_string(),
        })
}

fn handle_graph(month: Option<&str>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let chart = aggregate_history(&ctx.snapshot.history);
    if chart.is_empty() {
        println!("No session history found.");
        return Ok(());
    }

    let selected = match resolve_graph_month(month)? {
        Some(label) => match chart.month(&label) {
            Some(group) => group,
            None => {
                println!(
                    "No sessions in {label}. Months with data: {}",
                    chart.month_keys().join(", ")
                );
                return Ok(());
            }
        },
        None => match chart.latest_month() {
            Some(group) => group,
            None => return Ok(()),
        },
    };

    if ctx.cli.json {
        // Without --month the whole chart is emitted
        let only = month.map(|_| selected);
        print_json(&output_graph_json(&chart, only));
    } else {
        print_graph_table(&chart, selected, ctx.table_options());
    }
    Ok(())
}

fn handle_calendar(month: Option<&str>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let first = match month {
        Some(raw) => parse_month(raw).ok_or_else(|| AppError::InvalidMonth {
            input: raw.to_string(),
        })?,
        None => ctx.clock.today(),
    };
    let Some(calendar) = monthly_calendar(&ctx.snapshot.history, first) else {
        return Err(AppError::InvalidMonth {
            input: first.to_string(),
        });
    };

    if ctx.cli.json {
        print_json(&output_calendar_json(&calendar));
    } else {
        print_calendar(&calendar, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_timeline(expand: bool, ctx: &CommandContext<'_>) {
    let timeline = build_timeline(&ctx.snapshot.projects, ctx.daily_target, &ctx.clock);
    if timeline.is_empty() {
        println!("No projects found.");
        return;
    }
    if ctx.cli.json {
        print_json(&output_timeline_json(&timeline));
    } else {
        print_timeline(&timeline, expand, ctx.table_options());
    }
}

fn handle_gantt(ctx: &CommandContext<'_>) {
    let projects = &ctx.snapshot.projects;
    if projects.iter().all(|p| p.subtasks.is_empty()) {
        println!("No subtasks found.");
        return;
    }
    if ctx.cli.json {
        print_json(&output_gantt_json(projects, ctx.table_options()));
    } else {
        print_gantt(projects, ctx.table_options());
    }
}

fn handle_history(ctx: &CommandContext<'_>) {
    let finished = partition_finished(&ctx.snapshot.projects, &ctx.clock);
    if ctx.cli.json {
        print_json(&output_history_json(&finished, &ctx.clock, ctx.table_options()));
    } else {
        print_history(&finished, &ctx.clock, ctx.table_options());
    }
}

fn handle_today(ctx: &CommandContext<'_>) {
    let projects = &ctx.snapshot.projects;
    let history = &ctx.snapshot.history;
    if ctx.cli.json {
        print_json(&output_today_json(projects, history, &ctx.clock, ctx.table_options()));
    } else {
        print_today(projects, history, &ctx.clock, ctx.table_options());
    }
}

pub(crate) fn handle_command(command: &Commands, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match command {
        Commands::Stats => handle_stats(ctx),
        Commands::Graph { month } => handle_graph(month.as_deref(), ctx)?,
        Commands::Calendar { month } => handle_calendar(month.as_deref(), ctx)?,
        Commands::Timeline { expand } => handle_timeline(*expand, ctx),
        Commands::Gantt => handle_gantt(ctx),
        Commands::History => handle_history(ctx),
        Commands::Today => handle_today(ctx),
    }
    Ok(())
}
