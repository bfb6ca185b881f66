//! Formatting utilities used for CLI and export outputs.

/// Events per second → "12.00/min".
pub fn per_minute(rate_per_sec: f64) -> String {
    format!("{:.2}/min", rate_per_sec * 60.0)
}

/// Out/in ratio, or "--" before the first arrival.
pub fn ratio(value: Option<f64>) -> String {
    match value {
        Some(r) => format!("{:.3}", r),
        None => "--".to_string(),
    }
}

/// Signed difference with an explicit "+" for positive values.
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
