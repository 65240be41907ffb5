/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Stock color against its alert threshold:
/// 0 → red, at/below min_stock → yellow, otherwise reset.
pub fn color_for_stock(stock: i64, min_stock: i64) -> &'static str {
    if stock == 0 {
        RED
    } else if stock <= min_stock {
        YELLOW
    } else {
        RESET
    }
}

/// Change color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_change(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Grey out empty/placeholder values like "N/A" or "--".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "N/A" || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
