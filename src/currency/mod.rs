//! Cent rounding and display helpers for dollar amounts.

/// Rounds to whole cents, with halves rounding toward positive infinity.
///
/// Non-finite input collapses to zero so a single bad amount cannot poison
/// a month's totals.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0 + 0.5).floor() / 100.0;
    // Normalise `-0.0` so formatting never renders "-$0.00".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats an amount as `$1,234.56`, or `-$1,234.56` when negative.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".into();
    }
    let rounded = round2(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&format!("{:.2}", rounded.abs())))
}

/// Formats a `0..1` share as a whole percentage; `None` renders as `-`.
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(value) if value.is_finite() => format!("{:.0}%", value * 100.0),
        _ => "-".into(),
    }
}

fn group_thousands(body: &str) -> String {
    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body, ""),
    };
    let mut grouped = String::new();
    for (count, ch) in int_part.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    grouped.push_str(frac_part);
    grouped
}
