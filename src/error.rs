use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid --now value \"{input}\" (expected RFC 3339, e.g. 2024-01-02T09:00:00Z)")]
    InvalidNow { input: String },

    #[error("Invalid month \"{input}\" (expected YYYY-MM or \"January 2024\")")]
    InvalidMonth { input: String },

    #[error("No data file given. Pass --data <FILE> or set data_file in the config file.")]
    MissingDataFile,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
