use gerifit_core::models::assessment::Gender;

use crate::classification::Classification;

use super::is_recorded;

/// EWGSOP2 cut-off for weak grip strength.
const MALE_CUTOFF_KG: f64 = 27.0;
const FEMALE_CUTOFF_KG: f64 = 16.0;

/// Handgrip dynamometry. Needs both a recorded force and a known gender.
pub fn classify_handgrip(gender: Gender, kg: f64) -> Classification {
    if !is_recorded(kg) {
        return Classification::neutral();
    }
    let cutoff = match gender {
        Gender::Male => MALE_CUTOFF_KG,
        Gender::Female => FEMALE_CUTOFF_KG,
        Gender::Unknown => return Classification::neutral(),
    };
    if kg < cutoff {
        Classification::error(format!("weak / dynapenia, under {cutoff}kg"))
    } else {
        Classification::success(format!("strength preserved, {cutoff}kg or more"))
    }
}
