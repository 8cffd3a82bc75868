//! In-memory document model shared by the assemblers and backends.

use crate::styles::DocumentStyles;

/// A table with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn has_empty_header(&self) -> bool {
        self.header.iter().all(|cell| cell.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    /// Heading level 1 to 3.
    Heading { level: u8, text: String },
    Paragraph {
        label: Option<String>,
        text: String,
        centered: bool,
    },
    Bullet(String),
    Numbered(String),
    Table(Table),
    /// Two-column label/value table without a header row.
    Details(Vec<(String, String)>),
    /// Boxed note, one line per entry; the first line is emphasised.
    Callout(Vec<String>),
    PageBreak,
}

/// Document under assembly.
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    styles: DocumentStyles,
    header_text: Option<String>,
    footer_text: Option<String>,
    blocks: Vec<Block>,
}

impl Document {
    /// Start a document; the running header comes from `styles`.
    pub fn new(title: impl Into<String>, styles: DocumentStyles) -> Self {
        let header_text = styles.header_text.clone();
        Self {
            title: title.into(),
            styles,
            header_text,
            footer_text: None,
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn styles(&self) -> &DocumentStyles {
        &self.styles
    }

    pub fn header_text(&self) -> Option<&str> {
        self.header_text.as_deref()
    }

    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn set_header(&mut self, text: Option<String>) {
        self.header_text = text;
    }

    pub fn set_footer(&mut self, text: Option<String>) {
        self.footer_text = text;
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn add_title(&mut self, text: impl Into<String>) {
        self.push(Block::Title(text.into()));
    }

    pub fn add_heading(&mut self, level: u8, text: impl Into<String>) {
        self.push(Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        });
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.push(Block::Paragraph {
            label: None,
            text: text.into(),
            centered: false,
        });
    }

    pub fn add_centered(&mut self, text: impl Into<String>) {
        self.push(Block::Paragraph {
            label: None,
            text: text.into(),
            centered: true,
        });
    }

    /// Paragraph starting with a bold `label`.
    pub fn add_labelled(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.push(Block::Paragraph {
            label: Some(label.into()),
            text: text.into(),
            centered: false,
        });
    }

    pub fn add_bullets<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        for item in items {
            self.push(Block::Bullet(item.into()));
        }
    }

    pub fn add_numbered<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        for item in items {
            self.push(Block::Numbered(item.into()));
        }
    }

    pub fn add_table(&mut self, table: Table) {
        self.push(Block::Table(table));
    }

    pub fn add_details<L: Into<String>, V: Into<String>>(
        &mut self,
        pairs: impl IntoIterator<Item = (L, V)>,
    ) {
        self.push(Block::Details(
            pairs
                .into_iter()
                .map(|(label, value)| (label.into(), value.into()))
                .collect(),
        ));
    }

    pub fn add_page_break(&mut self) {
        self.push(Block::PageBreak);
    }

    /// Heading texts in order, for outlines and tests.
    pub fn headings(&self) -> Vec<(u8, &str)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level, text } => Some((*level, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_is_clamped() {
        let mut doc = Document::new("Test", DocumentStyles::default());
        doc.add_heading(0, "zero");
        doc.add_heading(7, "seven");
        assert_eq!(doc.headings(), vec![(1, "zero"), (3, "seven")]);
    }

    #[test]
    fn test_empty_header_detection() {
        assert!(Table::new(["", " "]).has_empty_header());
        assert!(!Table::new(["Rule ID", ""]).has_empty_header());
    }
}
