/// Format seconds as `MM:SS`.
///
/// Minutes wrap at 60, so an hour-long track reads as `00:00` again. Missing,
/// negative or non-finite input renders as an empty string.
pub fn format_time(seconds: Option<f64>) -> String {
    let Some(secs) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return String::new();
    };
    let total = secs.floor() as u64;
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}

/// Position of the seek slider in `[0, 1]`; 0 when the duration is unusable.
pub fn seek_ratio(elapsed: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !elapsed.is_finite() {
        return 0.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Format an album's running time, e.g. `9:04` or `1:02:13`.
pub fn format_running_time(seconds: f64) -> String {
    if !(seconds.is_finite() && seconds > 0.0) {
        return "-".to_string();
    }
    let total = seconds.round() as u64;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
