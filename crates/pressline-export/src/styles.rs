use pressline_core::models::color::HexColor;
use serde::{Deserialize, Serialize};

/// Physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    Letter,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Page setup for a [`crate::page::PageStream`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub size: PageSize,
    pub margins: Margins,

    /// Keep finished pages editable until the document is finalized.
    /// Without it, a page is sealed as soon as the next one starts.
    pub buffer_pages: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margins: Margins::uniform(50.0),
            buffer_pages: true,
        }
    }
}

/// Fixed styling of the rendered document. The body font size and color
/// come from the request; everything else is decided here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub page: PageConfig,

    /// Heading size in points.
    pub title_size: f32,

    /// "By: ..." line size in points.
    pub byline_size: f32,
    pub byline_color: HexColor,

    pub rule_color: HexColor,
    pub rule_width: f32,

    /// Width the body text wraps to, also the length of the rule.
    pub body_width: f32,

    /// Extra space between wrapped body lines, in points.
    pub body_line_gap: f32,

    pub footer_size: f32,
    pub footer_color: HexColor,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            title_size: 24.0,
            byline_size: 10.0,
            byline_color: HexColor::new(0x66, 0x66, 0x66),
            rule_color: HexColor::BLACK,
            rule_width: 1.0,
            body_width: 500.0,
            body_line_gap: 5.0,
            footer_size: 8.0,
            footer_color: HexColor::new(0x99, 0x99, 0x99),
        }
    }
}
