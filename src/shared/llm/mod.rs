//! Parsing machinery for structured model responses.

mod parser;
mod response;

pub use parser::{extract_json_string, fix_trailing_commas, parse_with_fallback};
pub use response::LlmResponse;
