use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};
use chrono::NaiveDate;

use crate::cli::SortOrder;
use crate::utils::canonical_log_date;

/// Options shared by every table printer
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn color_if(use_color: bool, color: Color) -> Option<Color> {
    if use_color { Some(color) } else { None }
}

/// Horizontal bar of `width` cells filled to `fraction` (clamped to 0..=1)
pub(super) fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub(super) fn format_percent(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

pub(super) fn format_minutes(minutes: f64) -> String {
    format!("{minutes:.1}")
}

/// Canonical date or a dash when absent
pub(super) fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), canonical_log_date)
}

pub(super) fn sort_by_order<T, K: Ord>(items: &mut [T], order: SortOrder, key: impl Fn(&T) -> K) {
    match order {
        SortOrder::Asc => items.sort_by_key(|item| key(item)),
        SortOrder::Desc => items.sort_by_key(|item| std::cmp::Reverse(key(item))),
    }
}

pub(super) fn to_pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
