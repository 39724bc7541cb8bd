/// Formats whole minutes as `"{h}h {m}m"`, dropping the hour part when it is
/// zero. Missing, zero or negative input yields `"0m"`.
pub fn format_minutes(minutes: Option<f64>) -> String {
    let total = match minutes {
        Some(m) if m.is_finite() => (m.floor() as i64).max(0),
        _ => 0,
    };
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Formats minutes plus an optional seconds remainder as `"{h}h {m}m {s}s"`.
///
/// Both parts are floored, combined into whole seconds and clamped at zero
/// before being split back into hours, minutes and seconds.
pub fn format_minutes_detailed(minutes: Option<f64>, seconds: Option<f64>) -> String {
    let minutes = match minutes {
        Some(m) if m.is_finite() => m,
        _ => return "0m".to_string(),
    };
    let seconds = seconds.filter(|s| s.is_finite()).unwrap_or(0.0);

    let total_seconds = (minutes.floor() as i64)
        .saturating_mul(60)
        .saturating_add(seconds.floor() as i64)
        .max(0);
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{}h {}m {}s", h, m, s)
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}
