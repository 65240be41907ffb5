//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Signed percent with one decimal, e.g. "+12.5%" / "-3.0%" / "0.0%".
pub fn fmt_change(v: f64) -> String {
    if v > 0.0 {
        format!("+{:.1}%", v)
    } else {
        format!("{:.1}%", v)
    }
}

/// Simple text bar for histograms, proportional to `max`.
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_sign() {
        assert_eq!(fmt_change(12.5), "+12.5%");
        assert_eq!(fmt_change(-3.0), "-3.0%");
        assert_eq!(fmt_change(0.0), "0.0%");
    }

    #[test]
    fn bar_scales() {
        assert_eq!(bar(5, 10, 10).chars().count(), 5);
        assert_eq!(bar(0, 10, 10), "");
        assert_eq!(bar(3, 0, 10), "");
    }
}
