use crate::classification::Classification;

/// Katz index of independence in basic activities of daily living (0–6).
///
/// A score of 0 is the form's unset value and classifies as neutral.
pub fn classify_katz(score: u32) -> Classification {
    match score {
        0 => Classification::neutral(),
        1..=2 => Classification::error("major dependence"),
        3..=4 => Classification::warning("partial dependence"),
        _ => Classification::success("independent"),
    }
}
