//! Tracker data model as found in an exported snapshot
//!
//! Field names follow the export's camelCase JSON keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::DEFAULT_DAILY_TARGET;
use crate::utils::parse_log_date;

/// A unit of planned work inside a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Subtask {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) target_sessions: u32,
    /// May exceed `target_sessions`; overcompletion is kept as-is
    #[serde(default)]
    pub(crate) completed_sessions: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Project {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    /// Creation instant; unreadable values fall back to the Unix epoch
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) is_daily: bool,
    #[serde(default)]
    pub(crate) recurrence_end_date: Option<String>,
    #[serde(default)]
    pub(crate) subtasks: Vec<Subtask>,
}

impl Project {
    /// Last day of a daily project's recurrence, `None` when indefinite
    /// or when the stored value is not a recognizable date
    pub(crate) fn recurrence_end(&self) -> Option<NaiveDate> {
        self.recurrence_end_date.as_deref().and_then(parse_log_date)
    }

    pub(crate) fn total_target_sessions(&self) -> u32 {
        self.subtasks
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.target_sessions))
    }

    pub(crate) fn total_completed_sessions(&self) -> u32 {
        self.subtasks
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.completed_sessions))
    }

    pub(crate) fn kind_label(&self) -> &'static str {
        if self.is_daily { "Daily" } else { "Standard" }
    }
}

/// One completed pomodoro, as recorded in the append-only history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionLog {
    #[serde(default)]
    pub(crate) project_id: String,
    #[serde(default)]
    pub(crate) subtask_id: Option<String>,
    /// Canonical "02 January 2024" string
    #[serde(default)]
    pub(crate) date: String,
    /// "H:MM:SS" or "M:SS"
    #[serde(default)]
    pub(crate) duration: String,
}

impl SessionLog {
    pub(crate) fn day(&self) -> Option<NaiveDate> {
        parse_log_date(&self.date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppSettings {
    #[serde(default = "default_daily_target")]
    pub(crate) daily_pomodoro_target: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            daily_pomodoro_target: DEFAULT_DAILY_TARGET,
        }
    }
}

impl AppSettings {
    /// Daily target with 0 treated as unset
    pub(crate) fn daily_target(&self) -> u32 {
        effective_daily_target(self.daily_pomodoro_target)
    }
}

fn default_daily_target() -> u32 {
    DEFAULT_DAILY_TARGET
}

pub(crate) fn effective_daily_target(target: u32) -> u32 {
    if target == 0 {
        DEFAULT_DAILY_TARGET
    } else {
        target
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FloatMillis(f64),
    Text(String),
}

/// Accept epoch milliseconds (integer or float) or an RFC 3339 / ISO date string
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    let parsed = match raw {
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        Some(RawTimestamp::FloatMillis(ms)) if ms.is_finite() => {
            DateTime::from_timestamp_millis(ms as i64)
        }
        Some(RawTimestamp::Text(s)) => parse_timestamp_text(&s),
        _ => None,
    };
    Ok(parsed.unwrap_or_default())
}

fn parse_timestamp_text(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ms) = trimmed.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms);
    }
    parse_log_date(trimmed)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
