//! Measurements derived from raw form input.

use jiff::civil::Date;

/// Age in whole years on `today`.
///
/// Calendar year difference, minus one when the birthday has not yet been
/// reached in `today`'s year. Birth dates in the future give 0.
pub fn age_on(birth: Date, today: Date) -> u32 {
    let mut years = i32::from(today.year()) - i32::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Body-mass index in kg/m², rounded to two decimals.
///
/// `None` unless both weight and height are positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round2(weight_kg / (height_m * height_m)))
}

/// Fastest of the two sit-to-stand trials, ignoring unrecorded (zero) ones.
pub fn best_sit_to_stand(trial1: f64, trial2: f64) -> Option<f64> {
    [trial1, trial2]
        .into_iter()
        .filter(|t| is_positive(*t))
        .min_by(f64::total_cmp)
}

/// Strongest of the two handgrip trials.
pub fn best_handgrip(trial1: f64, trial2: f64) -> f64 {
    trial1.max(trial2)
}

pub fn mean_handgrip(trial1: f64, trial2: f64) -> f64 {
    (trial1 + trial2) / 2.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
