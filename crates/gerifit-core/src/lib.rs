//! gerifit-core
//!
//! Assessment data model and the measurements derived from it (age, BMI,
//! best trials). Shared by every other gerifit crate; performs no I/O.

pub mod derive;
pub mod error;
pub mod models;
