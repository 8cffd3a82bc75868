use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, Header, PageMargin, Paragraph, Run, RunFonts,
    Shading, Style, StyleType, Table as DocxTable, TableCell, TableRow,
};

use crate::document::{Block, Document, Table};
use crate::error::{OutputError, Result};
use crate::styles::DocumentStyles;

const TWIPS_PER_INCH: f64 = 1440.0;

fn twips(inches: f64) -> i32 {
    (inches * TWIPS_PER_INCH).round() as i32
}

/// Render a document to DOCX bytes.
pub fn render_docx(doc: &Document) -> Result<Vec<u8>> {
    let styles = doc.styles();
    let page = styles.page;

    let mut docx = Docx::new()
        .page_size(twips(page.width) as u32, twips(page.height) as u32)
        .page_margin(
            PageMargin::new()
                .top(twips(page.margin_top))
                .bottom(twips(page.margin_bottom))
                .left(twips(page.margin_left))
                .right(twips(page.margin_right)),
        )
        .default_fonts(RunFonts::new().ascii(&styles.body_font).hi_ansi(&styles.body_font))
        .default_size(styles.body_size * 2)
        .add_style(heading_style("Title", "Title", styles.title_size, styles))
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size, styles))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size, styles))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size, styles));

    if let Some(text) = doc.header_text() {
        docx = docx.header(Header::new().add_paragraph(small_paragraph(text, styles)));
    }
    if let Some(text) = doc.footer_text() {
        docx = docx.footer(Footer::new().add_paragraph(small_paragraph(text, styles)));
    }

    let mut number = 0usize;
    for block in doc.blocks() {
        if !matches!(block, Block::Numbered(_)) {
            number = 0;
        }
        docx = match block {
            Block::Title(text) => docx.add_paragraph(add_lines(
                Paragraph::new().style("Title").align(AlignmentType::Center),
                text,
            )),
            Block::Heading { level, text } => docx.add_paragraph(
                Paragraph::new()
                    .style(&format!("Heading{level}"))
                    .add_run(Run::new().add_text(text)),
            ),
            Block::Paragraph {
                label,
                text,
                centered,
            } => {
                let mut para = Paragraph::new().align(if *centered {
                    AlignmentType::Center
                } else {
                    AlignmentType::Left
                });
                if let Some(label) = label {
                    para = para.add_run(Run::new().add_text(format!("{label} ")).bold());
                }
                docx.add_paragraph(add_lines(para, text))
            }
            Block::Bullet(text) => docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(format!("\u{2022} {text}"))),
            ),
            Block::Numbered(text) => {
                number += 1;
                docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(format!("{number}. {text}"))),
                )
            }
            Block::Table(table) => docx
                .add_table(grid_table(table, styles))
                .add_paragraph(Paragraph::new()),
            Block::Details(pairs) => docx
                .add_table(details_table(pairs, styles))
                .add_paragraph(Paragraph::new()),
            Block::Callout(lines) => docx
                .add_table(callout_table(lines, styles))
                .add_paragraph(Paragraph::new()),
            Block::PageBreak => docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            ),
        };
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| OutputError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

/// One run per line, joined by line breaks.
fn add_lines(mut para: Paragraph, text: &str) -> Paragraph {
    for (index, line) in text.split('\n').enumerate() {
        let mut run = Run::new();
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        para = para.add_run(run.add_text(line));
    }
    para
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2)
        .bold()
        .color(&styles.heading_color)
        .fonts(RunFonts::new().ascii(&styles.heading_font).hi_ansi(&styles.heading_font))
}

fn small_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_text(text).size(styles.table_size * 2))
}

fn cell(text: &str, styles: &DocumentStyles) -> TableCell {
    TableCell::new().add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(text).size(styles.table_size * 2)),
    )
}

fn grid_table(table: &Table, styles: &DocumentStyles) -> DocxTable {
    let header = TableRow::new(
        table
            .header
            .iter()
            .map(|text| {
                TableCell::new()
                    .add_paragraph(
                        Paragraph::new().align(AlignmentType::Center).add_run(
                            Run::new()
                                .add_text(text)
                                .bold()
                                .color("FFFFFF")
                                .size(styles.table_size * 2),
                        ),
                    )
                    .shading(Shading::new().fill(&styles.table_header_fill))
            })
            .collect(),
    );
    let mut rows = vec![header];
    rows.extend(table.rows.iter().map(|row| {
        TableRow::new(row.iter().map(|text| cell(text, styles)).collect())
    }));
    DocxTable::new(rows)
}

fn details_table(pairs: &[(String, String)], styles: &DocumentStyles) -> DocxTable {
    DocxTable::new(
        pairs
            .iter()
            .map(|(label, value)| {
                TableRow::new(vec![
                    TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(
                            Run::new()
                                .add_text(format!("{label}:"))
                                .bold()
                                .size(styles.table_size * 2),
                        ))
                        .shading(Shading::new().fill(&styles.label_fill)),
                    cell(value, styles),
                ])
            })
            .collect(),
    )
}

fn callout_table(lines: &[String], styles: &DocumentStyles) -> DocxTable {
    let mut content = TableCell::new();
    for (index, line) in lines.iter().enumerate() {
        let run = if index == 0 {
            Run::new().add_text(line).bold().color("C00000")
        } else {
            Run::new()
                .add_text(line)
                .italic()
                .size(styles.table_size * 2)
        };
        content = content.add_paragraph(Paragraph::new().add_run(run));
    }
    DocxTable::new(vec![TableRow::new(vec![content])])
}
