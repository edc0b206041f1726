use std::error::Error;
use std::fmt;

use gnucash_core::ResolveError;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// Input is not a well-formed XML document.
    MalformedXml { message: String },
    /// A record lacks a field every record of its kind must carry.
    MissingField { record: &'static str, field: String },
    /// An amount is neither `numerator/denominator` nor a plain number.
    InvalidNumber { field: String, text: String },
    /// A posted date does not hold a calendar date.
    InvalidDate { field: String, text: String },
    /// Account names cannot be resolved from the parent links.
    InvalidAccountTree { message: String },
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The (line, column) location of the error in the input, when known.
    pub location: Option<(u32, u32)>,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MalformedXml { message } => {
                write!(f, "Malformed XML: {}", message)?;
            }
            ParseErrorKind::MissingField { record, field } => {
                write!(f, "{} is missing required field {}", record, field)?;
            }
            ParseErrorKind::InvalidNumber { field, text } => {
                write!(f, "Invalid amount '{}' in {}", text, field)?;
            }
            ParseErrorKind::InvalidDate { field, text } => {
                write!(f, "Invalid date '{}' in {}", text, field)?;
            }
            ParseErrorKind::InvalidAccountTree { message } => {
                write!(f, "Invalid account tree: {}", message)?;
            }
        }
        if let (ParseErrorKind::InvalidNumber { .. }, Some(source))
        | (ParseErrorKind::InvalidDate { .. }, Some(source)) = (&self.kind, &self.source)
        {
            write!(f, " ({})", source)?;
        }
        if let Some((line, column)) = self.location {
            write!(f, " at line {} column {}", line, column)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    pub(crate) fn missing_field(
        record: &'static str,
        field: String,
        location: (u32, u32),
    ) -> ParseError {
        ParseError {
            kind: ParseErrorKind::MissingField { record, field },
            location: Some(location),
            source: None,
        }
    }

    pub(crate) fn invalid_number(
        field: String,
        text: &str,
        location: (u32, u32),
        source: Box<dyn Error + 'static + Send + Sync>,
    ) -> ParseError {
        ParseError {
            kind: ParseErrorKind::InvalidNumber {
                field,
                text: text.to_string(),
            },
            location: Some(location),
            source: Some(source),
        }
    }

    pub(crate) fn invalid_date(
        field: String,
        text: &str,
        location: (u32, u32),
        source: Box<dyn Error + 'static + Send + Sync>,
    ) -> ParseError {
        ParseError {
            kind: ParseErrorKind::InvalidDate {
                field,
                text: text.to_string(),
            },
            location: Some(location),
            source: Some(source),
        }
    }
}

impl From<roxmltree::Error> for ParseError {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        ParseError {
            kind: ParseErrorKind::MalformedXml {
                message: err.to_string(),
            },
            location: Some((pos.row, pos.col)),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ResolveError> for ParseError {
    fn from(err: ResolveError) -> Self {
        ParseError {
            kind: ParseErrorKind::InvalidAccountTree {
                message: err.to_string(),
            },
            location: None,
            source: Some(Box::new(err)),
        }
    }
}
