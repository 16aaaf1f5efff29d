//! Two-minute step test (Rikli & Jones, Senior Fitness Test).
//!
//! Expected step counts come from a static table keyed on gender and age
//! band. The decision logic only ever reads the table through
//! [`band_for`].

use gerifit_core::models::assessment::Gender;
use serde::Serialize;

use crate::classification::Classification;

/// Youngest age covered by the reference table. Younger patients are
/// classified against the first band.
pub const TABLE_FLOOR_AGE: u32 = 60;

/// One row of the reference table: the normal range of steps in two
/// minutes for `gender` aged `min_age..=max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepBand {
    pub gender: Gender,
    pub min_age: u32,
    /// `None` for the open-ended oldest band.
    pub max_age: Option<u32>,
    pub expected_min: u32,
    pub expected_max: u32,
}

impl StepBand {
    const fn new(gender: Gender, min_age: u32, max_age: u32, expected_min: u32, expected_max: u32) -> Self {
        Self {
            gender,
            min_age,
            max_age: Some(max_age),
            expected_min,
            expected_max,
        }
    }

    const fn open(gender: Gender, min_age: u32, expected_min: u32, expected_max: u32) -> Self {
        Self {
            gender,
            min_age,
            max_age: None,
            expected_min,
            expected_max,
        }
    }

    pub fn contains_age(&self, age: u32) -> bool {
        age >= self.min_age && self.max_age.is_none_or(|max| age <= max)
    }
}

/// Reference table, ordered by gender then ascending age. The 90+ rows use
/// the published 90–94 ranges.
pub static STEP_BANDS: [StepBand; 14] = [
    StepBand::new(Gender::Male, 60, 64, 87, 115),
    StepBand::new(Gender::Male, 65, 69, 86, 116),
    StepBand::new(Gender::Male, 70, 74, 80, 110),
    StepBand::new(Gender::Male, 75, 79, 73, 109),
    StepBand::new(Gender::Male, 80, 84, 71, 103),
    StepBand::new(Gender::Male, 85, 89, 59, 91),
    StepBand::open(Gender::Male, 90, 52, 86),
    StepBand::new(Gender::Female, 60, 64, 75, 107),
    StepBand::new(Gender::Female, 65, 69, 73, 107),
    StepBand::new(Gender::Female, 70, 74, 68, 101),
    StepBand::new(Gender::Female, 75, 79, 68, 100),
    StepBand::new(Gender::Female, 80, 84, 60, 90),
    StepBand::new(Gender::Female, 85, 89, 55, 85),
    StepBand::open(Gender::Female, 90, 44, 72),
];

/// Reference band for a patient. Ages below [`TABLE_FLOOR_AGE`] use the
/// youngest band; unknown gender has no band.
pub fn band_for(gender: Gender, age: u32) -> Option<&'static StepBand> {
    if !gender.is_known() {
        return None;
    }
    let age = age.max(TABLE_FLOOR_AGE);
    STEP_BANDS
        .iter()
        .find(|band| band.gender == gender && band.contains_age(age))
}

/// Classify a two-minute step count. Needs steps, age and gender.
///
/// Counts at or above the band minimum are all `success`; there is no
/// separate tier above the band maximum.
pub fn classify_two_min_step(age: u32, gender: Gender, steps: u32) -> Classification {
    if steps == 0 || age == 0 {
        return Classification::neutral();
    }
    let Some(band) = band_for(gender, age) else {
        return Classification::neutral();
    };
    if steps < band.expected_min {
        Classification::error(format!("below expected (under {})", band.expected_min))
    } else {
        Classification::success(format!(
            "within or above expected ({}–{})",
            band.expected_min, band.expected_max
        ))
    }
}
