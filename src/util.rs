/// Format a number of seconds as a `mm:ss` countdown.
///
/// Fractional seconds are truncated and negative input clamps to zero.
pub fn format_time(secs: f64) -> String {
    let s = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };

    format!("{:02}:{:02}", s / 60, s % 60)
}
