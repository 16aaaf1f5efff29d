//! gerifit-narrative
//!
//! Narrative summaries of an assessment from an external text-generation
//! model, behind the [`generator::TextGenerator`] capability.

pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod summary;
