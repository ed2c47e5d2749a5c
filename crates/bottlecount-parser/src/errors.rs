use std::fmt;

use thiserror::Error;

/// The required fields of a receipt line, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Numero,
    Count,
    Amount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Numero => "numero",
            Field::Count => "count",
            Field::Amount => "amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("unparsable line, no {field} found: {line:?}")]
    UnparsableLine { field: Field, line: String },
}

impl ParserError {
    pub(crate) fn unparsable(field: Field, line: &str) -> Self {
        ParserError::UnparsableLine {
            field,
            line: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    pub fn field(&self) -> Field {
        match self {
            ParserError::UnparsableLine { field, .. } => *field,
        }
    }

    pub fn line(&self) -> &str {
        match self {
            ParserError::UnparsableLine { line, .. } => line,
        }
    }
}
