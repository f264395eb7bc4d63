mod app;
mod cli;
mod config;
mod consts;
mod core;
mod data;
mod error;
mod output;
mod utils;

use chrono::{DateTime, Utc};
use clap::Parser;

use app::{CommandContext, handle_command};
use cli::Cli;
use config::Config;
use data::load_snapshot;
use error::AppError;
use utils::{Clock, Timezone, debug_enabled, set_debug};

fn build_clock(cli: &Cli) -> Result<Clock, AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    match cli.now.as_deref() {
        Some(raw) => {
            let now = DateTime::parse_from_rfc3339(raw.trim())
                .map_err(|_| AppError::InvalidNow {
                    input: raw.to_string(),
                })?
                .with_timezone(&Utc);
            Ok(Clock::fixed(now, timezone))
        }
        None => Ok(Clock::system(timezone)),
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let clock = build_clock(&cli)?;
    if debug_enabled() {
        eprintln!(
            "[DEBUG] now={} timezone={} today={}",
            clock.now().to_rfc3339(),
            clock.timezone().name(),
            clock.today()
        );
    }

    let path = cli.data.clone().ok_or(AppError::MissingDataFile)?;
    let snapshot = load_snapshot(&path)?;
    let daily_target = cli
        .daily_target
        .unwrap_or_else(|| snapshot.settings.daily_target());

    let command = cli.command.clone().unwrap_or_default();
    let ctx = CommandContext {
        cli: &cli,
        snapshot: &snapshot,
        clock,
        daily_target,
    };
    handle_command(&command, &ctx)
}

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    set_debug(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
