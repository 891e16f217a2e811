use chrono::Local;

/// Wall-clock stamp used for history entries and activity lines.
pub fn clock_stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Format a duration in seconds into "Xd Xh Xm" or "Xh Xm Xs".
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        let s = secs % 60;
        format!("{mins}m {s}s")
    }
}

pub fn format_rpm(value: f64) -> String {
    format!("{value:.0} rpm")
}

pub fn format_tds(value: f64) -> String {
    format!("{value:.1} ppm")
}

pub fn format_voltage(value: f64) -> String {
    format!("{value:.2} V")
}

/// Signed axis reading for the motion tables.
pub fn format_axis(value: f64) -> String {
    format!("{value:+.2}")
}

/// (min, max, mean) of a series. None when empty.
pub fn series_stats(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    Some((min, max, sum / values.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formats_by_magnitude() {
        assert_eq!(format_uptime(59), "0m 59s");
        assert_eq!(format_uptime(3661), "1h 1m");
        assert_eq!(format_uptime(90061), "1d 1h 1m");
    }

    #[test]
    fn stats_cover_min_max_mean() {
        assert_eq!(series_stats(&[]), None);
        let (min, max, mean) = series_stats(&[2.0, -1.0, 5.0]).unwrap();
        assert_eq!(min, -1.0);
        assert_eq!(max, 5.0);
        assert!((mean - 2.0).abs() < 1e-9);
    }
}
