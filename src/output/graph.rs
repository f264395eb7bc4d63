//! Daily focus chart for one month of session history

use comfy_table::{Cell, Color, Table};

use crate::cli::SortOrder;
use crate::core::{HistoryChart, MonthGroup};
use crate::output::format::{
    TableOptions, color_if, create_styled_table, format_minutes, header_cell, progress_bar,
    right_cell, styled_cell, to_pretty_json,
};
use crate::utils::format_minutes_short;

const BAR_WIDTH: usize = 30;

pub(crate) fn build_graph_table(chart: &HistoryChart, month: &MonthGroup, options: TableOptions) -> Table {
    let use_color = options.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", use_color),
        header_cell("Day", use_color),
        header_cell("Focus", use_color),
        header_cell("Minutes", use_color),
        header_cell(&format!("0 .. {}", format_minutes_short(f64::from(chart.max_y))), use_color),
    ]);

    let mut items: Vec<_> = month.items.iter().collect();
    if options.order == SortOrder::Desc {
        items.reverse();
    }

    let bar_color = color_if(use_color, Color::White);
    for item in items {
        let fraction = if chart.max_y > 0 {
            item.minutes / f64::from(chart.max_y)
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&item.date_label),
            Cell::new(&item.day_label),
            right_cell(&format_minutes_short(item.minutes), None, false),
            right_cell(&format_minutes(item.minutes), None, false),
            styled_cell(&progress_bar(fraction, BAR_WIDTH), bar_color, false),
        ]);
    }

    let cyan = color_if(use_color, Color::Cyan);
    let total = month.total_minutes();
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        right_cell(&format_minutes_short(total), cyan, true),
        right_cell(&format_minutes(total), cyan, true),
        Cell::new(""),
    ]);

    table
}

pub(crate) fn print_graph_table(chart: &HistoryChart, month: &MonthGroup, options: TableOptions) {
    let table = build_graph_table(chart, month, options);
    println!("\n  Daily Focus Intensity - {}\n", month.label);
    println!("{table}");
    let ticks: Vec<String> = chart
        .ticks
        .iter()
        .map(|t| format_minutes_short(f64::from(*t)))
        .collect();
    println!("\n  Months: {}", chart.month_keys().join(", "));
    println!("  Scale: {}\n", ticks.join(" | "));
}

fn month_json(month: &MonthGroup) -> serde_json::Value {
    let days: Vec<serde_json::Value> = month
        .items
        .iter()
        .map(|item| {
            serde_json::json!({
                "date": item.date.to_string(),
                "date_label": item.date_label,
                "day_label": item.day_label,
                "minutes": item.minutes,
            })
        })
        .collect();
    serde_json::json!({
        "month": month.label,
        "total_minutes": month.total_minutes(),
        "days": days,
    })
}

/// Whole chart as JSON, or only `month` when one is selected
pub(crate) fn output_graph_json(chart: &HistoryChart, month: Option<&MonthGroup>) -> String {
    let months: Vec<serde_json::Value> = match month {
        Some(m) => vec![month_json(m)],
        None => chart.months.iter().map(month_json).collect(),
    };
    to_pretty_json(&serde_json::json!({
        "months": months,
        "max_y": chart.max_y,
        "ticks": chart.ticks,
        "skipped": chart.skipped,
    }))
}
