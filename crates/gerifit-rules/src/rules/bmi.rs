use crate::classification::Classification;

use super::is_recorded;

/// Body-mass index against the geriatric (Lipschitz) reference range,
/// 22–27 kg/m² inclusive.
pub fn classify_bmi(bmi: f64) -> Classification {
    if !is_recorded(bmi) {
        return Classification::neutral();
    }
    if bmi < 22.0 {
        Classification::error("low weight, below 22")
    } else if bmi > 27.0 {
        Classification::warning("overweight, above 27")
    } else {
        Classification::success("eutrophic, 22–27")
    }
}
