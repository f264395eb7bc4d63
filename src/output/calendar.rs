//! Month heatmap rendering

use chrono::Datelike;
use comfy_table::{Cell, CellAlignment, Color, Table};

use crate::core::{CalendarDay, CalendarMonth};
use crate::output::format::{create_styled_table, header_cell, to_pretty_json};
use crate::utils::{format_focus, format_minutes_short};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Shade for a cell, darkest at no focus time
fn intensity_glyph(intensity: f64) -> &'static str {
    match intensity {
        i if i <= 0.0 => " ",
        i if i < 0.25 => "░",
        i if i < 0.5 => "▒",
        i if i < 0.75 => "▓",
        _ => "█",
    }
}

fn intensity_color(intensity: f64) -> Color {
    if intensity < 0.5 {
        Color::DarkGreen
    } else {
        Color::Green
    }
}

fn day_cell(day: Option<&CalendarDay>, use_color: bool) -> Cell {
    let Some(day) = day else {
        return Cell::new("");
    };
    if day.focus_minutes <= 0.0 {
        return Cell::new(day.date.day().to_string()).set_alignment(CellAlignment::Center);
    }
    let text = format!(
        "{} {}\n{}",
        day.date.day(),
        intensity_glyph(day.intensity),
        format_focus(day.focus_minutes)
    );
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Center);
    if use_color {
        cell = cell.fg(intensity_color(day.intensity));
    }
    cell
}

pub(crate) fn build_calendar_table(calendar: &CalendarMonth, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(WEEKDAYS.iter().map(|d| header_cell(d, use_color)).collect::<Vec<_>>());
    for week in calendar.weeks() {
        table.add_row(week.into_iter().map(|d| day_cell(d, use_color)).collect::<Vec<_>>());
    }
    table
}

pub(crate) fn print_calendar(calendar: &CalendarMonth, use_color: bool) {
    let table = build_calendar_table(calendar, use_color);
    println!("\n  {}\n", calendar.label);
    println!("{table}");
    println!(
        "\n  {} focused across {} day(s)\n",
        format_minutes_short(calendar.total_minutes()),
        calendar.active_days()
    );
}

pub(crate) fn output_calendar_json(calendar: &CalendarMonth) -> String {
    let days: Vec<serde_json::Value> = calendar
        .days
        .iter()
        .map(|d| {
            serde_json::json!({
                "date": d.date.to_string(),
                "focus_minutes": d.focus_minutes,
                "intensity": d.intensity,
                "fill": d.fill,
            })
        })
        .collect();
    to_pretty_json(&serde_json::json!({
        "month": calendar.label,
        "first_day": calendar.first_day.to_string(),
        "leading_blanks": calendar.leading_blanks,
        "total_minutes": calendar.total_minutes(),
        "active_days": calendar.active_days(),
        "days": days,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SessionLog, monthly_calendar};
    use chrono::NaiveDate;

    fn calendar() -> CalendarMonth {
        let history = vec![SessionLog {
            date: "05 February 2024".into(),
            duration: "1:30:00".into(),
            ..Default::default()
        }];
        monthly_calendar(&history, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()).unwrap()
    }

    #[test]
    fn glyph_thresholds() {
        assert_eq!(intensity_glyph(0.0), " ");
        assert_eq!(intensity_glyph(0.1), "░");
        assert_eq!(intensity_glyph(0.3), "▒");
        assert_eq!(intensity_glyph(0.6), "▓");
        assert_eq!(intensity_glyph(1.0), "█");
    }

    #[test]
    fn table_shows_weekdays_and_focus() {
        let rendered = build_calendar_table(&calendar(), false).to_string();
        assert!(rendered.contains("Sun"));
        assert!(rendered.contains("Sat"));
        assert!(rendered.contains("1h 30m"));
        assert!(rendered.contains("29"));
    }

    #[test]
    fn json_has_every_day() {
        let value: serde_json::Value = serde_json::from_str(&output_calendar_json(&calendar())).unwrap();
        assert_eq!(value["month"], "February 2024");
        assert_eq!(value["leading_blanks"], 4);
        assert_eq!(value["days"].as_array().unwrap().len(), 29);
        assert_eq!(value["days"][4]["focus_minutes"], 90.0);
        assert_eq!(value["active_days"], 1);
    }
}
