//! A cursor-based drawing surface that serializes to PDF.
//!
//! Coordinates follow the layout convention: `y` grows downwards from the
//! top edge of the page. They are flipped into PDF user space only when an
//! operation is recorded.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use pressline_core::models::color::HexColor;

use crate::error::ExportError;
use crate::fonts::{decode_win_ansi, encode_win_ansi, Font};
use crate::styles::PageConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextOptions {
    pub align: Align,
    /// Wrap width. Defaults to the space between the cursor and the right margin.
    pub width: Option<f32>,
    /// Extra space added after every line, in points.
    pub line_gap: f32,
}

impl TextOptions {
    pub fn aligned(align: Align) -> Self {
        Self {
            align,
            ..Self::default()
        }
    }

    pub fn centered() -> Self {
        Self::aligned(Align::Center)
    }
}

/// What [`PageStream::finish`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfSummary {
    pub pages: usize,
}

#[derive(Default)]
struct PageContent {
    operations: Vec<Operation>,
    fill: Option<HexColor>,
    stroke: Option<HexColor>,
    line_width: Option<f32>,
}

pub struct PageStream {
    config: PageConfig,
    width: f32,
    height: f32,
    /// Encoded content of pages that can no longer change.
    sealed: Vec<Vec<u8>>,
    /// Pages still open for drawing; indices continue after `sealed`.
    open: Vec<PageContent>,
    current: usize,
    x: f32,
    y: f32,
    font: Font,
    font_size: f32,
    fill: HexColor,
    stroke: HexColor,
    line_width: f32,
    title: Option<String>,
}

impl PageStream {
    pub fn new(config: PageConfig) -> Self {
        let (width, height) = config.size.dimensions();
        let x = config.margins.left;
        let y = config.margins.top;
        Self {
            config,
            width,
            height,
            sealed: Vec::new(),
            open: vec![PageContent::default()],
            current: 0,
            x,
            y,
            font: Font::Helvetica,
            font_size: 12.0,
            fill: HexColor::BLACK,
            stroke: HexColor::BLACK,
            line_width: 1.0,
            title: None,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.sealed.len() + self.open.len()
    }

    /// Global index of the page currently drawn on.
    pub fn current_page(&self) -> usize {
        self.sealed.len() + self.current
    }

    /// Document title recorded in the PDF info dictionary.
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn font(&mut self, font: Font, size: f32) -> &mut Self {
        self.font = font;
        self.font_size = size;
        self
    }

    pub fn fill_color(&mut self, color: HexColor) -> &mut Self {
        self.fill = color;
        self
    }

    pub fn stroke_color(&mut self, color: HexColor) -> &mut Self {
        self.stroke = color;
        self
    }

    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.line_width = width;
        self
    }

    /// Height of one line in the current font, gap included.
    pub fn current_line_height(&self) -> f32 {
        self.font.line_height(self.font_size)
    }

    /// Advance the cursor by `lines` line heights of the current font.
    pub fn move_down(&mut self, lines: f32) -> &mut Self {
        self.y += self.current_line_height() * lines;
        self
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        let pdf_y = self.height - y;
        self.page_mut()
            .operations
            .push(Operation::new("m", vec![x.into(), pdf_y.into()]));
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        let pdf_y = self.height - y;
        self.page_mut()
            .operations
            .push(Operation::new("l", vec![x.into(), pdf_y.into()]));
        self
    }

    /// Stroke the current path with the current stroke color and width.
    pub fn stroke(&mut self) -> &mut Self {
        let (color, width) = (self.stroke, self.line_width);
        let page = self.page_mut();
        if page.stroke != Some(color) {
            page.operations.push(Operation::new("RG", rgb_operands(color)));
            page.stroke = Some(color);
        }
        if page.line_width != Some(width) {
            page.operations.push(Operation::new("w", vec![width.into()]));
            page.line_width = Some(width);
        }
        page.operations.push(Operation::new("S", vec![]));
        self
    }

    /// Start a new page and put the cursor at its top-left margin corner.
    pub fn add_page(&mut self) -> Result<&mut Self, ExportError> {
        if !self.config.buffer_pages {
            for page in self.open.drain(..) {
                let content = Content {
                    operations: page.operations,
                };
                self.sealed.push(content.encode()?);
            }
        }

        self.open.push(PageContent::default());
        self.current = self.open.len() - 1;
        self.x = self.config.margins.left;
        self.y = self.config.margins.top;
        Ok(self)
    }

    /// Make an earlier page the drawing target. Only buffered pages qualify.
    pub fn switch_to_page(&mut self, index: usize) -> Result<&mut Self, ExportError> {
        let start = self.sealed.len();
        let end = self.page_count();
        if index < start || index >= end {
            return Err(ExportError::PageUnavailable { index, start, end });
        }
        self.current = index - start;
        Ok(self)
    }

    /// Draw `text` at the cursor, wrapping and paginating as needed.
    ///
    /// The cursor ends below the last line. `\n` forces a line break and an
    /// empty paragraph still takes up a line.
    pub fn text(&mut self, text: &str, options: TextOptions) -> Result<&mut Self, ExportError> {
        let right_edge = self.width - self.config.margins.right;
        let width = options.width.unwrap_or(right_edge - self.x).max(0.0);
        let bottom = self.height - self.config.margins.bottom;

        for line in wrap_text(text, self.font, self.font_size, width) {
            let line_height = self.current_line_height();
            if self.y + line_height > bottom && self.y > self.config.margins.top {
                self.add_page()?;
            }

            let encoded = encode_win_ansi(&line);
            if !encoded.is_empty() {
                let line_width = self.font.encoded_width(&encoded, self.font_size);
                let x = match options.align {
                    Align::Left => self.x,
                    Align::Center => self.x + (width - line_width) / 2.0,
                    Align::Right => self.x + width - line_width,
                };
                self.show_line(x, encoded);
            }

            self.y += line_height + options.line_gap;
        }

        Ok(self)
    }

    fn show_line(&mut self, x: f32, encoded: Vec<u8>) {
        let baseline = self.height - (self.y + self.font.ascent(self.font_size));
        let (font, size, fill) = (self.font, self.font_size, self.fill);

        let page = self.page_mut();
        if page.fill != Some(fill) {
            page.operations.push(Operation::new("rg", rgb_operands(fill)));
            page.fill = Some(fill);
        }
        page.operations.push(Operation::new("BT", vec![]));
        page.operations.push(Operation::new(
            "Tf",
            vec![font.resource_key().into(), size.into()],
        ));
        page.operations
            .push(Operation::new("Td", vec![x.into(), baseline.into()]));
        page.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        page.operations.push(Operation::new("ET", vec![]));
    }

    fn page_mut(&mut self) -> &mut PageContent {
        &mut self.open[self.current]
    }

    /// Strings shown on the buffered pages, in drawing order.
    pub fn text_runs(&self) -> Vec<String> {
        self.open
            .iter()
            .flat_map(|page| page.operations.iter())
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(decode_win_ansi(bytes)),
                _ => None,
            })
            .collect()
    }

    /// Serialize the document into `out`.
    pub fn finish<W: Write>(self, out: &mut W) -> Result<PdfSummary, ExportError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_key(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut contents = self.sealed;
        for page in self.open {
            let content = Content {
                operations: page.operations,
            };
            contents.push(content.encode()?);
        }

        let media_box: Vec<Object> = vec![0.into(), 0.into(), self.width.into(), self.height.into()];
        let mut kids: Vec<Object> = Vec::with_capacity(contents.len());
        for content in contents {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages = kids.len();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! { "Producer" => text_string("pressline") };
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        doc.compress();
        doc.save_to(out)?;

        Ok(PdfSummary { pages })
    }
}

fn rgb_operands(color: HexColor) -> Vec<Object> {
    [color.r, color.g, color.b]
        .into_iter()
        .map(|channel| Object::from(f32::from(channel) / 255.0))
        .collect()
}

/// A PDF text string: literal when ASCII, UTF-16BE with a byte order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Break `text` into lines no wider than `width`.
///
/// Lines break at spaces; a word wider than a whole line is split between
/// characters. Every `\n` starts a new line.
pub fn wrap_text(text: &str, font: Font, size: f32, width: f32) -> Vec<String> {
    let space = font.measure(" ", size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split(' ') {
            let word_width = font.measure(word, size);
            let gap = if line.is_empty() { 0.0 } else { space };

            if line_width + gap + word_width <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let mut buf = [0u8; 4];
                let ch_width = font.measure(ch.encode_utf8(&mut buf), size);
                if line_width + ch_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(ch);
                line_width += ch_width;
            }
        }

        lines.push(line);
    }

    lines
}
