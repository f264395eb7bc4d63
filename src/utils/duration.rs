//! Duration strings as stored in the session history (`H:MM:SS` or `M:SS`)

/// Format seconds as `HH:MM:SS` when at least one hour, otherwise `MM:SS`
pub(crate) fn format_time(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;

    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// One `H`, `M` or `S` field: empty counts as 0, decimals are allowed,
/// negatives and non-finite values are rejected
fn parse_field(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0.0);
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse a duration string into whole milliseconds.
///
/// Three fields are `H:M:S`, two fields are `M:S`. Any other shape, a field
/// that is not a non-negative number, or a total that does not fit in `u64`
/// yields `None`. Fractions below a millisecond are rounded.
pub(crate) fn parse_duration_millis(duration: &str) -> Option<u64> {
    let parts = duration
        .split(':')
        .map(parse_field)
        .collect::<Option<Vec<f64>>>()?;

    let seconds = match parts.as_slice() {
        [h, m, s] => h * 3600.0 + m * 60.0 + s,
        [m, s] => m * 60.0 + s,
        _ => return None,
    };
    let millis = (seconds * 1000.0).round();
    if millis.is_finite() && millis < u64::MAX as f64 {
        Some(millis as u64)
    } else {
        None
    }
}

/// Parse a duration string into (fractional) minutes, 0 when malformed
pub(crate) fn parse_duration_to_minutes(duration: &str) -> f64 {
    parse_duration_millis(duration).map_or(0.0, |ms| ms as f64 / 60_000.0)
}

/// Axis label for a minute value: `45m`, `2h`, `1h30m`
pub(crate) fn format_minutes_short(minutes: f64) -> String {
    let h = (minutes / 60.0).floor() as u64;
    let m = (minutes % 60.0).round() as u64;
    if h > 0 {
        if m > 0 {
            format!("{h}h{m}m")
        } else {
            format!("{h}h")
        }
    } else {
        format!("{m}m")
    }
}

/// Focus time label used on calendar cells: `1h 30m`
pub(crate) fn format_focus(minutes: f64) -> String {
    let h = (minutes / 60.0).floor() as u64;
    let m = (minutes % 60.0).round() as u64;
    format!("{h}h {m}m")
}
