pub mod errors;
pub mod extractor;
pub mod model;

pub use errors::{Field, ParserError};
pub use extractor::{extract_line, raw_lines, skip_reason};
pub use model::{LineOutcome, ParsedRecord, SkipReason};
