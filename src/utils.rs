//! Formatting helpers shared across pages. Pure functions, native-testable.

use chrono::{DateTime, Utc};

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`. Returns `"—"` for
/// missing or unparseable input so table cells never show raw `None`.
pub fn format_timestamp(iso: Option<&str>) -> String {
    match iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
        Some(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
        None => "—".to_string(),
    }
}

/// Success-rate percentage with one decimal, clamped to 0..=100.
pub fn format_percent(rate: f64) -> String {
    let clamped = rate.clamp(0.0, 100.0);
    format!("{:.1}%", clamped)
}

/// Group thousands with commas for counter cells.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Capitalise the first letter of a &str.
pub fn capitalise_first(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_compact_utc() {
        assert_eq!(
            format_timestamp(Some("2024-03-05T09:30:12+02:00")),
            "2024-03-05 07:30"
        );
        assert_eq!(format_timestamp(Some("not a date")), "—");
        assert_eq!(format_timestamp(None), "—");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(format_percent(99.25), "99.2%");
        assert_eq!(format_percent(123.0), "100.0%");
        assert_eq!(format_percent(-5.0), "0.0%");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn capitalise_first_handles_empty() {
        assert_eq!(capitalise_first(""), "");
        assert_eq!(capitalise_first("paused"), "Paused");
    }
}
