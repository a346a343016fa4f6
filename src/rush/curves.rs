const PEAK_HOURS: [u32; 4] = [18, 19, 20, 21];

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn hour_curve(hour: u32) -> f64 {
    let mut value = 0.15;
    if (17..=22).contains(&hour) {
        value += 0.45;
    } else if (7..=9).contains(&hour) {
        value += 0.25;
    }
    value += peak_bump(hour);
    clamp01(value)
}

fn peak_bump(hour: u32) -> f64 {
    let distance = PEAK_HOURS
        .iter()
        .map(|&peak| hour.abs_diff(peak))
        .min()
        .unwrap_or(0);
    (0.35 - 0.08 * distance as f64).max(0.0)
}

/// Weekday 0 = Sunday
pub fn dow_curve(dow: u32) -> f64 {
    match dow {
        0 | 6 => 0.35,
        5 => 0.25,
        _ => 0.10,
    }
}

/// Outdoor courts lose a little demand after dark
pub fn weather_adjustment(hour: u32, outdoor: bool) -> f64 {
    if outdoor && (hour >= 18 || hour <= 6) {
        -0.05
    } else {
        0.0
    }
}
