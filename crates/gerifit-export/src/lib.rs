//! gerifit-export
//!
//! Printable assessment reports: a format-independent [`report::Report`],
//! page layout, and DOCX/Markdown rendering.

pub mod docx;
pub mod error;
pub mod layout;
pub mod logo;
pub mod render;
pub mod report;
pub mod styles;
