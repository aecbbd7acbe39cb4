use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Title and content are required")]
    MissingRequired,

    #[error("fontSize must be a number between {min} and {max}")]
    InvalidFontSize { value: f64, min: f64, max: f64 },

    #[error("color must be a 3 or 6 digit hex value")]
    InvalidColor(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
