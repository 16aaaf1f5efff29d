use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, Paragraph, Pic, Run, RunFonts, Table, TableCell,
    TableRow, WidthType,
};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::layout::{Block, PageGeometry, paginate};
use crate::logo::Logo;
use crate::report::{Report, Row};
use crate::styles::{DocumentStyles, status_color};

/// EMU per pixel at 96 dpi.
const EMU_PER_PX: u32 = 9525;

/// Column widths of a measurement row, in twentieths of a point.
const ROW_GRID: [usize; 3] = [3600, 2400, 3600];

/// Generate a DOCX document from a report.
///
/// Pages follow [`paginate`]: each page after the first starts with an
/// explicit page break. Consecutive measurement rows on a page share one
/// three-column table (label, value, classification). The logo, when
/// present, heads the first page.
pub fn generate_docx(
    report: &Report,
    styles: &DocumentStyles,
    logo: Option<&Logo>,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new().footer(footer(report, styles));

    if let Some(paragraph) = logo.and_then(|logo| logo_paragraph(logo, styles)) {
        docx = docx.add_paragraph(paragraph);
    }
    docx = docx
        .add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                heading_run(&report.title, styles)
                    .bold()
                    .size(styles.title_size * 2) // OOXML uses half-points
                    .color(styles.primary_color.as_str()),
            ),
        )
        .add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                heading_run(&report.subtitle, styles)
                    .size(styles.subtitle_size * 2)
                    .color(styles.accent_color.as_str()),
            ),
        );

    let pages = paginate(report, &PageGeometry::default());
    debug!(pages = pages.len(), "report paginated");

    for page in &pages {
        if page.number > 1 {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        }

        let mut pending_rows: Vec<&Row> = Vec::new();
        for placed in &page.blocks {
            if let Block::Row { row } = &placed.block {
                pending_rows.push(row);
                continue;
            }
            if !pending_rows.is_empty() {
                docx = docx.add_table(rows_table(&pending_rows, styles));
                pending_rows.clear();
            }
            match &placed.block {
                Block::SectionTitle { title } => {
                    docx = docx.add_paragraph(section_paragraph(title, styles));
                }
                Block::TextLine { text } => {
                    docx = docx.add_paragraph(
                        Paragraph::new()
                            .align(AlignmentType::Left)
                            .add_run(body_run(text, styles)),
                    );
                }
                Block::Row { .. } => {}
            }
        }
        if !pending_rows.is_empty() {
            docx = docx.add_table(rows_table(&pending_rows, styles));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// `None` when the scaled logo is too large to express in EMU.
fn logo_paragraph(logo: &Logo, styles: &DocumentStyles) -> Option<Paragraph> {
    let Some((width_emu, height_emu)) = logo_size_emu(logo, styles.logo_width_px) else {
        warn!(
            width_px = logo.width_px,
            height_px = logo.height_px,
            "logo aspect ratio out of range, exporting without it"
        );
        return None;
    };
    let pic = Pic::new_with_dimensions(logo.bytes.clone(), logo.width_px, logo.height_px)
        .size(width_emu, height_emu);
    Some(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(Run::new().add_image(pic)),
    )
}

/// Logo scaled to `width_px`, keeping the aspect ratio, in EMU.
fn logo_size_emu(logo: &Logo, width_px: u32) -> Option<(u32, u32)> {
    if logo.width_px == 0 {
        return None;
    }
    let width = u64::from(width_px);
    let height = (width * u64::from(logo.height_px) / u64::from(logo.width_px)).max(1);
    let emu = u64::from(EMU_PER_PX);
    let width_emu = u32::try_from(width.checked_mul(emu)?).ok()?;
    let height_emu = u32::try_from(height.checked_mul(emu)?).ok()?;
    Some((width_emu, height_emu))
}

fn section_paragraph(title: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().align(AlignmentType::Left).add_run(
        heading_run(title, styles)
            .bold()
            .size(styles.section_size * 2)
            .color(styles.primary_color.as_str()),
    )
}

fn rows_table(rows: &[&Row], styles: &DocumentStyles) -> Table {
    let table_rows = rows
        .iter()
        .map(|row| {
            let label = body_run(&format!("{}:", row.label), styles)
                .bold()
                .color("3C3C3C");
            let value = body_run(&row.value, styles);

            let mut info = Paragraph::new();
            if !row.classification.is_neutral() {
                info = info.add_run(
                    body_run(&format!("({})", row.classification.label), styles)
                        .size(styles.small_size * 2)
                        .color(status_color(row.classification.status)),
                );
            }

            TableRow::new(vec![
                cell(Paragraph::new().add_run(label), ROW_GRID[0]),
                cell(Paragraph::new().add_run(value), ROW_GRID[1]),
                cell(info, ROW_GRID[2]),
            ])
        })
        .collect();

    Table::new(table_rows).set_grid(ROW_GRID.to_vec())
}

fn cell(paragraph: Paragraph, width: usize) -> TableCell {
    TableCell::new()
        .add_paragraph(paragraph)
        .width(width, WidthType::Dxa)
}

fn footer(report: &Report, styles: &DocumentStyles) -> Footer {
    Footer::new().add_paragraph(
        Paragraph::new().align(AlignmentType::Center).add_run(
            body_run(&report.footer, styles)
                .size(styles.small_size * 2)
                .color("969696"),
        ),
    )
}

fn heading_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .fonts(RunFonts::new().ascii(&styles.heading_font))
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}
