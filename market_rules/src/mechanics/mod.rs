//! Money and percentage arithmetic shared by state and narrative code.

/// Round to `places` decimals, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Round to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Fixed-point text with ties rounded away from zero.
///
/// `format!("{:.2}", 1.125)` rounds the tie to even and prints `1.12`; this
/// prints `1.13`.
pub fn fixed(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, round_to(value, places))
}

/// Format a fractional change as a signed percentage with one decimal place.
///
/// `0.032` becomes `+3.2%`, `-0.01` becomes `-1.0%`.
pub fn signed_percent(fraction: f64) -> String {
    let percent = round_to(fraction * 100.0, 1);
    // -0.04 rounds to "-0.0" otherwise
    if percent == 0.0 {
        return "+0.0%".to_string();
    }
    let sign = if percent > 0.0 { "+" } else { "" };
    format!("{}{}%", sign, fixed(percent, 1))
}

/// Format a 0.0-1.0 confidence as a whole percentage.
pub fn whole_percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}
