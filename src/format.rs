use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Decimal throughput label; megabytes are the largest unit so disk rates
/// read like "1000 MB/s".
pub fn format_rate(bytes_per_sec: f64) -> String {
    const KB: f64 = 1_000.0;
    const MB: f64 = 1_000_000.0;

    let rate = bytes_per_sec.max(0.0);
    if rate >= MB {
        format!("{:.0} MB/s", rate / MB)
    } else if rate >= KB {
        format!("{:.0} KB/s", rate / KB)
    } else {
        format!("{:.0} B/s", rate)
    }
}

pub fn format_optional_rate(bytes_per_sec: Option<f64>) -> String {
    bytes_per_sec
        .map(format_rate)
        .unwrap_or_else(|| "--".to_string())
}
