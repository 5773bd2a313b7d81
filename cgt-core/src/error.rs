use std::fmt;

/// Errors that can occur while reading a dataset.
#[derive(Debug)]
pub enum ParseError {
    /// The CSV reader rejected the input.
    Csv(csv::Error),
    /// A required column was absent from the header row.
    MissingColumn(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Csv(err) => write!(f, "CSV error: {}", err),
            ParseError::MissingColumn(column) => write!(f, "Missing column: {}", column),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for ParseError {
    fn from(value: csv::Error) -> Self {
        ParseError::Csv(value)
    }
}
