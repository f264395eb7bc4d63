mod calendar;
mod format;
mod gantt;
mod graph;
mod history;
mod stats;
mod timeline;
mod today;

pub(crate) use calendar::{output_calendar_json, print_calendar};
pub(crate) use format::TableOptions;
pub(crate) use gantt::{output_gantt_json, print_gantt};
pub(crate) use graph::{output_graph_json, print_graph_table};
pub(crate) use history::{output_history_json, print_history};
pub(crate) use stats::{output_stats_json, print_stats_table};
pub(crate) use timeline::{output_timeline_json, print_timeline};
pub(crate) use today::{output_today_json, print_today};
