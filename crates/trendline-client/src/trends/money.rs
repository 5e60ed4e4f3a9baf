/// Renders minor units as `$X,XXX.XX`, with a leading `-` for negative amounts.
pub fn format_money(amount_minor_units: i64) -> String {
    let magnitude = amount_minor_units.unsigned_abs();
    let whole = group_thousands(magnitude / 100);
    let cents = magnitude % 100;
    let sign = if amount_minor_units < 0 { "-" } else { "" };
    format!("{sign}${whole}.{cents:02}")
}

/// Share of `part` in `whole` as a percentage with one decimal place.
/// Zero when `whole` is zero.
pub fn pct_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_one_decimal(part as f64 / whole as f64)
}

/// Relative change from `previous` to `current`, or `None` when the ratio is
/// undefined.
pub fn pct_change(previous: i64, current: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let delta = current as f64 - previous as f64;
    Some(round_one_decimal(delta / previous as f64))
}

pub fn format_pct(value: f64) -> String {
    format!("{value:.1}")
}

pub fn format_signed_pct(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}")
    } else {
        format!("{value:.1}")
    }
}

fn round_one_decimal(ratio: f64) -> f64 {
    let rounded = (ratio * 1000.0).round() / 10.0;
    // -0.0 would otherwise print as "-0.0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            output.push(',');
        }
        output.push(character);
    }
    output
}
