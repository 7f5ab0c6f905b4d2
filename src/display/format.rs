//! Formatting helpers for terminal output

use crate::models::Money;

/// Amount with the currency symbol, sign in front: `R$ 10.50`, `-R$ 3.00`
pub fn money(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        format!("-{} {}", symbol, amount.abs())
    } else {
        format!("{} {}", symbol, amount)
    }
}

/// Format a money amount with color hints for terminal display
pub fn money_colored(amount: Money, symbol: &str) -> String {
    let text = money(amount, symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text
    }
}

/// Format a percentage with appropriate precision
pub fn percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Simple horizontal bar; values past `max_value` fill the bar
pub fn bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
