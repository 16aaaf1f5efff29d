use crate::classification::Classification;

use super::is_recorded;

/// Five-repetition sit-to-stand (Bohannon reference values).
pub fn classify_sit_to_stand(seconds: f64) -> Classification {
    if !is_recorded(seconds) {
        return Classification::neutral();
    }
    if seconds > 15.0 {
        Classification::error("poor performance, over 15s")
    } else if seconds > 12.0 {
        Classification::warning("attention, over 12s")
    } else {
        Classification::success("good performance, 12s or under")
    }
}
