use std::io::BufWriter;

use printpdf::{Mm, PdfDocument};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.3528;

/// Line height as a multiple of font size.
const LEADING: f32 = 1.45;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const BULLET_INDENT_MM: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// A single line of text placed on a page, in millimetres from the
/// bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size: f32,
    pub weight: Weight,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

enum Block<'a> {
    Heading1(&'a str),
    Heading2(&'a str),
    Bullet(&'a str),
    Footer(&'a str),
    Body(&'a str),
    Gap,
}

fn classify_line(line: &str) -> Block<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Block::Gap
    } else if let Some(text) = trimmed.strip_prefix("## ") {
        Block::Heading2(text)
    } else if let Some(text) = trimmed.strip_prefix("# ") {
        Block::Heading1(text)
    } else if let Some(text) = trimmed.strip_prefix("- ") {
        Block::Bullet(text)
    } else if let Some(text) = trimmed.strip_prefix("> ") {
        Block::Footer(text)
    } else {
        Block::Body(trimmed)
    }
}

struct Cursor<'s> {
    styles: &'s DocumentStyles,
    pages: Vec<Page>,
    y: f32,
    last_was_gap: bool,
}

impl<'s> Cursor<'s> {
    fn new(styles: &'s DocumentStyles) -> Self {
        Self {
            styles,
            pages: vec![Page::default()],
            y: styles.page_height_mm - styles.margin_mm,
            last_was_gap: true,
        }
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * LEADING
    }

    fn max_chars(&self, size: f32, indent: f32) -> usize {
        let usable = self.styles.page_width_mm - 2.0 * self.styles.margin_mm - indent;
        (usable / (size * PT_TO_MM * AVG_GLYPH_WIDTH)).floor().max(10.0) as usize
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < self.styles.margin_mm {
            self.pages.push(Page::default());
            self.y = self.styles.page_height_mm - self.styles.margin_mm;
        }
    }

    fn gap(&mut self, height: f32) {
        if !self.last_was_gap {
            self.y -= height;
            self.last_was_gap = true;
        }
    }

    fn place(&mut self, text: &str, size: f32, indent: f32, weight: Weight) {
        let height = Self::line_height(size);
        for line in wrap_text(text, self.max_chars(size, indent)) {
            self.ensure_room(height);
            self.y -= height;
            let x_mm = self.styles.margin_mm + indent;
            let y_mm = self.y;
            if let Some(page) = self.pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: line,
                    x_mm,
                    y_mm,
                    size,
                    weight,
                });
            }
        }
        self.last_was_gap = false;
    }
}

/// Lay out rendered report text into pages.
///
/// Understands the subset emitted by the report template:
/// - `# Heading` / `## Heading` → bold headings
/// - `- item` → indented bullet
/// - `> text` → small footer text
/// - blank line → paragraph gap
/// - everything else → wrapped body text
pub fn layout(rendered: &str, styles: &DocumentStyles) -> Vec<Page> {
    let mut cursor = Cursor::new(styles);
    let body_gap = Cursor::line_height(styles.body_size) * 0.6;

    for line in rendered.lines() {
        match classify_line(line) {
            Block::Gap => cursor.gap(body_gap),
            Block::Heading1(text) => {
                cursor.place(text, styles.heading1_size, 0.0, Weight::Bold);
                cursor.gap(body_gap);
            }
            Block::Heading2(text) => {
                cursor.gap(body_gap);
                cursor.place(text, styles.heading2_size, 0.0, Weight::Bold);
            }
            Block::Bullet(text) => {
                cursor.place(
                    &format!("- {text}"),
                    styles.body_size,
                    BULLET_INDENT_MM,
                    Weight::Regular,
                );
            }
            Block::Footer(text) => {
                cursor.last_was_gap = false;
                cursor.gap(body_gap * 2.0);
                cursor.place(text, styles.footer_size, 0.0, Weight::Regular);
            }
            Block::Body(text) => {
                cursor.place(text, styles.body_size, 0.0, Weight::Regular);
            }
        }
    }

    cursor.pages
}

/// Generate PDF bytes from rendered report text.
pub fn generate_pdf(
    title: &str,
    rendered: &str,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let pages = layout(rendered, styles);
    let width = Mm(styles.page_width_mm);
    let height = Mm(styles.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let regular = doc
        .add_builtin_font(styles.body_font.regular())
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(styles.heading_font.bold())
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let mut replaced = 0;
    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Page {}, Layer 1", index + 1))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            let font = match line.weight {
                Weight::Regular => &regular,
                Weight::Bold => &bold,
            };
            let (text, lost) = to_win_ansi(&line.text);
            replaced += lost;
            layer.use_text(
                text,
                line.size,
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    if replaced > 0 {
        tracing::warn!(
            replaced,
            "characters outside the builtin font encoding printed as '?'"
        );
    }
    tracing::debug!(pages = pages.len(), "report laid out");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Characters WinAnsi places in 0x80..=0x9F.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Make `text` drawable with a builtin font.
///
/// Builtin fonts use WinAnsi encoding and silently drop anything it cannot
/// represent. Such characters become a visible `?` instead. Returns the
/// converted text and how many characters were replaced.
pub fn to_win_ansi(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let converted = text
        .chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\u{a0}' => ' ',
            '\u{ad}' => '-',
            '\u{a1}'..='\u{ff}' => c,
            c if WIN_ANSI_EXTRAS.contains(c) => c,
            _ => {
                replaced += 1;
                '?'
            }
        })
        .collect();
    (converted, replaced)
}

/// Greedy word wrap on character counts.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        let word_len = word.chars().count();
        if current_len + word_len + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
