use gerifit_rules::classification::Status;
use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Helvetica", "Calibri").
    pub body_font: String,

    /// Font for the header band and section titles.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Clinic name font size in points.
    pub title_size: usize,

    /// Subtitle and section title font size in points.
    pub subtitle_size: usize,
    pub section_size: usize,

    /// Classification label and footer size in points.
    pub small_size: usize,

    /// Brand colors as `RRGGBB` hex.
    pub primary_color: String,
    pub accent_color: String,

    /// Logo width in pixels at 96 dpi; height keeps the aspect ratio.
    pub logo_width_px: u32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Helvetica".to_string(),
            heading_font: "Helvetica".to_string(),
            body_size: 10,
            title_size: 22,
            subtitle_size: 10,
            section_size: 12,
            small_size: 9,
            primary_color: "1E40AF".to_string(),
            accent_color: "65A30D".to_string(),
            logo_width_px: 76,
        }
    }
}

/// Text color for a classification label: green, amber, red, or gray.
pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::Success => "16A34A",
        Status::Warning => "D97706",
        Status::Error => "DC2626",
        Status::Neutral => "646464",
    }
}
