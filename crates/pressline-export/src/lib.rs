//! pressline-export
//!
//! PDF composition: a paginating page stream over `lopdf`, the fixed
//! document layout, and chunked output for the HTTP layer.

pub mod error;
pub mod fonts;
pub mod page;
pub mod pdf;
pub mod stream;
pub mod styles;
