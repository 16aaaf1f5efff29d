//! gerifit-storage
//!
//! Saved-assessment persistence behind the [`AssessmentRepository`] trait.

pub mod error;
pub mod file;
pub mod memory;
pub mod repository;

pub use file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use repository::AssessmentRepository;
