//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Clone, Default, Subcommand)]
pub(crate) enum Commands {
    /// Per-project session totals, time spent and status (default)
    #[default]
    Stats,
    /// Daily focus minutes for one month, with chart scale
    Graph {
        /// Month to show, e.g. "January 2024" or 2024-01 (default: latest with data)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Month heatmap of focus time
    Calendar {
        /// Month to show as YYYY-MM or "January 2024" (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Day-indexed project timeline
    Timeline {
        /// Also list subtask bars
        #[arg(short, long)]
        expand: bool,
    },
    /// Subtask progress against targets
    Gantt,
    /// Finished projects and expired daily projects
    History,
    /// Today's progress on daily projects
    Today,
}

