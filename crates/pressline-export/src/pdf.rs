use jiff::Zoned;
use pressline_core::models::document::DocumentSpec;

use crate::error::ExportError;
use crate::fonts::Font;
use crate::page::{Align, PageStream, PdfSummary, TextOptions};
use crate::styles::DocumentStyles;

/// Lay out the document on a fresh [`PageStream`].
///
/// The sequence is fixed: centered bold title, optional centered byline,
/// a horizontal rule, the wrapped body text, and a right-aligned footer
/// carrying `generated_at`.
pub fn compose(
    spec: &DocumentSpec,
    styles: &DocumentStyles,
    generated_at: &Zoned,
) -> Result<PageStream, ExportError> {
    let mut page = PageStream::new(styles.page.clone());
    page.set_title(&spec.title);

    page.font(Font::HelveticaBold, styles.title_size)
        .text(&spec.title, TextOptions::centered())?
        .move_down(0.5);

    if let Some(author) = &spec.author {
        page.font(Font::Helvetica, styles.byline_size)
            .fill_color(styles.byline_color)
            .text(&format!("By: {author}"), TextOptions::centered())?
            .move_down(0.5);
    }

    let left = page.config().margins.left;
    let y = page.y();
    page.stroke_color(styles.rule_color)
        .line_width(styles.rule_width)
        .move_to(left, y)
        .line_to(left + styles.body_width, y)
        .stroke()
        .move_down(1.0);

    page.font(Font::Helvetica, spec.font_size)
        .fill_color(spec.color)
        .text(
            &spec.content,
            TextOptions {
                align: Align::Left,
                width: Some(styles.body_width),
                line_gap: styles.body_line_gap,
            },
        )?
        .move_down(1.0);

    let footer = format!("Generated on: {}", footer_timestamp(generated_at));
    page.font(Font::Helvetica, styles.footer_size)
        .fill_color(styles.footer_color)
        .text(&footer, TextOptions::aligned(Align::Right))?;

    Ok(page)
}

/// Generate the complete PDF in memory.
pub fn generate_pdf(
    spec: &DocumentSpec,
    styles: &DocumentStyles,
    generated_at: &Zoned,
) -> Result<(Vec<u8>, PdfSummary), ExportError> {
    let page = compose(spec, styles, generated_at)?;
    let mut bytes = Vec::new();
    let summary = page.finish(&mut bytes)?;
    Ok((bytes, summary))
}

/// Local date and time the way en-US locales print it: `10/19/2026, 3:04:05 PM`.
pub fn footer_timestamp(at: &Zoned) -> String {
    at.strftime("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
