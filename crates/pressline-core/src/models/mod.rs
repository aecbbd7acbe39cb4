pub mod color;
pub mod document;
