use crate::classification::Classification;

/// Lawton instrumental activities of daily living (0–27).
pub fn classify_lawton(score: u32) -> Classification {
    match score {
        0 => Classification::neutral(),
        1..=8 => Classification::error("total dependence"),
        9..=18 => Classification::warning("partial dependence"),
        _ => Classification::success("independence"),
    }
}
