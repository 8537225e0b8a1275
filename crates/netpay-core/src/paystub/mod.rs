//! Pay stub field location and parsing.

mod index;
mod parser;
pub mod rules;

pub use index::PageTextIndex;
pub use parser::{ParsedFields, PaystubParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
