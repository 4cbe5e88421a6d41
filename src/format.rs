//! Value formatting for currency amounts, percentages and counts
//!
//! Amounts are always rupees. The display unit scales them down and switches
//! between a two-decimal scaled figure and a grouped whole-rupee figure.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::FormatError;

pub const RUPEE: &str = "₹";

/// Display unit for currency amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueUnit {
    Crore,
    Lakh,
    Thousands,
    /// Whole rupees with digit grouping
    #[default]
    Rupees,
}

impl ValueUnit {
    /// All units in the order the UI cycles through them
    pub const ALL: [ValueUnit; 4] = [
        ValueUnit::Crore,
        ValueUnit::Lakh,
        ValueUnit::Thousands,
        ValueUnit::Rupees,
    ];

    /// Resolve a unit label. Unknown labels fall back to whole rupees.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "crore" => ValueUnit::Crore,
            "lakh" => ValueUnit::Lakh,
            "thousands" => ValueUnit::Thousands,
            _ => ValueUnit::Rupees,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValueUnit::Crore => "Crore",
            ValueUnit::Lakh => "Lakh",
            ValueUnit::Thousands => "Thousands",
            ValueUnit::Rupees => "Rupees",
        }
    }

    /// Divisor applied before formatting, `None` for the whole-rupee path
    pub fn divisor(&self) -> Option<f64> {
        match self {
            ValueUnit::Crore => Some(10_000_000.0),
            ValueUnit::Lakh => Some(100_000.0),
            ValueUnit::Thousands => Some(1_000.0),
            ValueUnit::Rupees => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ValueUnit::Crore => ValueUnit::Lakh,
            ValueUnit::Lakh => ValueUnit::Thousands,
            ValueUnit::Thousands => ValueUnit::Rupees,
            ValueUnit::Rupees => ValueUnit::Crore,
        }
    }
}

impl fmt::Display for ValueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a rupee amount for display in the given unit
///
/// Scaled units print two decimals without grouping (`₹10.00`); the
/// whole-rupee path rounds half away from zero and groups Indian style
/// (`₹10,00,00,000`). Negative amounts carry a leading minus.
///
/// # Errors
///
/// Returns [`FormatError::NonFinite`] for NaN and infinities.
pub fn format_value(amount: f64, unit: ValueUnit) -> Result<String, FormatError> {
    if !amount.is_finite() {
        return Err(FormatError::NonFinite(amount));
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();

    let body = match unit.divisor() {
        Some(divisor) => format!("{:.2}", magnitude / divisor),
        None => group_digits(&format!("{:.0}", magnitude.round())),
    };

    // -0.00 after scaling is still zero
    if body.chars().all(|c| c == '0' || c == '.' || c == ',') {
        return Ok(format!("{}{}", RUPEE, body));
    }

    Ok(format!("{}{}{}", sign, RUPEE, body))
}

/// Format a percentage with one decimal place
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a signed growth figure, e.g. `+12.5%` or `-1.3%`
pub fn format_growth(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// Format a customer count with Indian digit grouping
pub fn format_count(count: impl Into<u128>) -> String {
    group_indian(count.into())
}

/// Group digits as the en-IN locale does: the last three digits, then pairs
pub fn group_indian(value: u128) -> String {
    group_digits(&value.to_string())
}

/// Insert en-IN separators into a plain string of ASCII digits
fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Build a text bar of `width` cells filled in proportion to `value / max`
pub fn create_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return " ".repeat(width);
    }
    let filled = ((value / max).min(1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), " ".repeat(width - filled))
}

/// Truncate to at most `max_width` display columns, ending in `...` when cut
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Left-align `s` in a column of `width` display columns
pub fn pad_str(s: &str, width: usize) -> String {
    let cut = truncate_str(s, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}
