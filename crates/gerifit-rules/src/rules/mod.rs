//! One pure function per clinical test.
//!
//! Every rule is total: zero, negative, non-finite, or missing covariates
//! map to [`Classification::neutral`](crate::classification::Classification::neutral)
//! rather than an error.

pub mod bmi;
pub mod handgrip;
pub mod katz;
pub mod lawton;
pub mod sit_to_stand;
pub mod tug;
pub mod two_min_step;

pub use bmi::classify_bmi;
pub use handgrip::classify_handgrip;
pub use katz::classify_katz;
pub use lawton::classify_lawton;
pub use sit_to_stand::classify_sit_to_stand;
pub use tug::classify_tug;
pub use two_min_step::classify_two_min_step;

/// A measurement counts as recorded when it is finite and positive.
pub(crate) fn is_recorded(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
