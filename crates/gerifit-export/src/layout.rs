//! Page layout for the printable report.
//!
//! Positions are in millimetres from the top of an A4 page. Content flows
//! down a cursor; a block that would cross [`PageGeometry::bottom`] starts a
//! new page instead.

use serde::Serialize;

use crate::report::{Report, Row};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageGeometry {
    /// Lowest usable position on a page.
    pub bottom: f32,
    /// Cursor start on the first page, below the header band.
    pub first_page_top: f32,
    /// Cursor start on every later page.
    pub page_top: f32,
    /// Space a section title needs to stay on the current page.
    pub section_needs: f32,
    /// Cursor advance for a section title.
    pub section_advance: f32,
    pub row_height: f32,
    pub text_line_height: f32,
    /// Characters per wrapped line of free text.
    pub text_width_chars: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            bottom: 280.0,
            first_page_top: 50.0,
            page_top: 20.0,
            section_needs: 20.0,
            section_advance: 17.0,
            row_height: 8.0,
            text_line_height: 5.0,
            text_width_chars: 95,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    SectionTitle { title: String },
    Row { row: Row },
    TextLine { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Placed {
    pub y: f32,
    pub block: Block,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub number: usize,
    pub blocks: Vec<Placed>,
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page {
                number: 1,
                blocks: Vec::new(),
            }],
            y: geometry.first_page_top,
        }
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > self.geometry.bottom {
            let number = self.pages.len() + 1;
            self.pages.push(Page {
                number,
                blocks: Vec::new(),
            });
            self.y = self.geometry.page_top;
        }
    }

    fn place(&mut self, needed: f32, advance: f32, block: Block) {
        self.ensure_room(needed);
        let y = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(Placed { y, block });
        }
        self.y += advance;
    }
}

/// Flow the report onto pages.
pub fn paginate(report: &Report, geometry: &PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(geometry);

    for section in &report.sections {
        cursor.place(
            geometry.section_needs,
            geometry.section_advance,
            Block::SectionTitle {
                title: section.title.clone(),
            },
        );
        for row in &section.rows {
            cursor.place(
                geometry.row_height,
                geometry.row_height,
                Block::Row { row: row.clone() },
            );
        }
        if let Some(text) = &section.text {
            for line in wrap_text(text, geometry.text_width_chars) {
                cursor.place(
                    geometry.text_line_height,
                    geometry.text_line_height,
                    Block::TextLine { text: line },
                );
            }
        }
    }

    cursor.pages
}

/// Greedy word wrap at `width` characters. Explicit newlines are kept and
/// words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            while word.chars().count() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                lines.push(word[..split].to_string());
                word = &word[split..];
            }
            if word.is_empty() {
                continue;
            }
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}
