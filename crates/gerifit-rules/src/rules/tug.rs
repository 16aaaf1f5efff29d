use crate::classification::Classification;

use super::is_recorded;

/// Timed Up and Go: rise, walk three metres, turn, return, sit.
pub fn classify_tug(seconds: f64) -> Classification {
    if !is_recorded(seconds) {
        return Classification::neutral();
    }
    if seconds < 10.0 {
        Classification::success("independent, under 10s")
    } else if seconds <= 20.0 {
        Classification::warning("mild fall risk, 10–20s")
    } else {
        Classification::error("high fall risk, over 20s")
    }
}
