//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the display views.

/// Format a percentage with appropriate precision
///
/// Non-finite values (a share of an empty total) render as "--".
pub fn format_percentage(pct: f64) -> String {
    if !pct.is_finite() {
        return "--".to_string();
    }

    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
        assert_eq!(format_percentage(-25.0), "-25%");
    }

    #[test]
    fn test_format_percentage_guards_non_finite() {
        assert_eq!(format_percentage(f64::NAN), "--");
        assert_eq!(format_percentage(f64::INFINITY), "--");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }
}
