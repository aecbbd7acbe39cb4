use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::color::HexColor;

/// Body font size used when the request omits `fontSize`.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Body color used when the request omits `color`.
pub const DEFAULT_COLOR: &str = "000000";

/// Smallest accepted body font size, in points.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Largest accepted body font size, in points.
pub const MAX_FONT_SIZE: f64 = 400.0;

/// The JSON body accepted by the render endpoint, exactly as the client sent it.
///
/// Every field is optional at this stage so that a missing `title` is a
/// validation failure (400) rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Body font size in points. Defaults to 12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Body color as hex without `#`. Defaults to `000000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A validated request with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSpec {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub font_size: f32,
    pub color: HexColor,
}

impl DocumentRequest {
    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Check required fields, then default and validate the optional ones.
    ///
    /// Required-field presence is checked first, so a request that is both
    /// missing its title and carrying a bad color reports the missing title.
    pub fn validate(self) -> Result<DocumentSpec, CoreError> {
        let title = self.title.filter(|t| !t.is_empty());
        let content = self.content.filter(|c| !c.is_empty());
        let (Some(title), Some(content)) = (title, content) else {
            return Err(CoreError::MissingRequired);
        };

        let font_size = self.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font_size) {
            return Err(CoreError::InvalidFontSize {
                value: font_size,
                min: MIN_FONT_SIZE,
                max: MAX_FONT_SIZE,
            });
        }

        let color = HexColor::parse(self.color.as_deref().unwrap_or(DEFAULT_COLOR))?;

        Ok(DocumentSpec {
            title,
            content,
            author: self.author.filter(|a| !a.is_empty()),
            font_size: font_size as f32,
            color,
        })
    }
}
