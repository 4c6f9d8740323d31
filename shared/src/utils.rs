// Display-format helpers shared with any presentation layer.

/// Formats an amount the way the source sheet writes it: space-grouped
/// thousands, no decimals, "kr" suffix.
pub fn format_kronor(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as i64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{} kr", grouped)
    } else {
        format!("{} kr", grouped)
    }
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Like [`format_percent`] but with an explicit sign for gains.
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    format!("{:+.*}%", decimals, value)
}
