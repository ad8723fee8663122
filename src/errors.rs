use thiserror::Error;

pub type Result<T> = std::result::Result<T, PattiError>;

/// Flat classification of every error this crate produces. Mostly useful for matching in
/// tests and for callers who want to branch without destructuring the nested error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ErrorKind {
    UnclosedQuote,
    EmptyLine,
    ColumnNotFound,
    ColumnMappingInvalid,
    ColumnIndexOutOfRange,
    MappingCountMismatch,
    TypeConversionFailure,
    SlotNotFound,
    ErrorsNotAcknowledged,
    Config,
    Generic,
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum PattiError {
    #[error("An error occurred: {msg}")]
    Generic { msg: String },
    #[error("Invalid configuration: {msg}")]
    Config { msg: String },
    #[error(transparent)]
    Tokenize(#[from] TokenizerError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("Empty line")]
    EmptyLine { line_number: usize },
    #[error("Slot '{slot}' does not exist on record type {record_type}")]
    SlotNotFound {
        slot: String,
        record_type: &'static str,
    },
    #[error("Records were accessed before the parse errors were acknowledged. Check `has_errors()` or `errors()` first")]
    ErrorsNotAcknowledged,
    /// Wraps the first error of a strict parse with the (1-based) line it happened on.
    #[error("Line {line_number}: {source}")]
    Line {
        line_number: usize,
        source: Box<PattiError>,
    },
}

impl PattiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PattiError::Generic { .. } => ErrorKind::Generic,
            PattiError::Config { .. } => ErrorKind::Config,
            PattiError::Tokenize(TokenizerError::UnclosedQuote { .. }) => ErrorKind::UnclosedQuote,
            PattiError::Mapping(me) => me.kind(),
            PattiError::Conversion(_) => ErrorKind::TypeConversionFailure,
            PattiError::EmptyLine { .. } => ErrorKind::EmptyLine,
            PattiError::SlotNotFound { .. } => ErrorKind::SlotNotFound,
            PattiError::ErrorsNotAcknowledged => ErrorKind::ErrorsNotAcknowledged,
            PattiError::Line { source, .. } => source.kind(),
        }
    }

    /// Errors that point at a broken record definition rather than at bad input data.
    /// These abort a parse even in lenient mode.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::SlotNotFound)
    }

    pub(crate) fn at_line(self, line_number: usize) -> Self {
        PattiError::Line {
            line_number,
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for PattiError {
    fn from(e: std::io::Error) -> Self {
        PattiError::Generic { msg: e.to_string() }
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum TokenizerError {
    #[error("Unclosed quote in field #{token_num} of line: {line:?}")]
    UnclosedQuote { line: String, token_num: usize },
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum MappingError {
    #[error("Column '{identifier}' not found in header. Available columns: {}", .available.join(", "))]
    ColumnNotFound {
        identifier: String,
        available: Vec<String>,
    },
    #[error("Invalid column mapping '{identifier}': {msg}")]
    ColumnMappingInvalid { identifier: String, msg: String },
    #[error("Column index {requested_index} is out of range (available columns: {available_columns})")]
    ColumnIndexOutOfRange {
        requested_index: usize,
        available_columns: usize,
        line_number: usize,
    },
    #[error("Found {field_count} fields, but only {mapping_count} are mapped")]
    MappingCountMismatch {
        field_count: usize,
        mapping_count: usize,
        line_number: usize,
    },
}

impl MappingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MappingError::ColumnNotFound { .. } => ErrorKind::ColumnNotFound,
            MappingError::ColumnMappingInvalid { .. } => ErrorKind::ColumnMappingInvalid,
            MappingError::ColumnIndexOutOfRange { .. } => ErrorKind::ColumnIndexOutOfRange,
            MappingError::MappingCountMismatch { .. } => ErrorKind::MappingCountMismatch,
        }
    }
}

fn for_property(property_name: &Option<String>) -> String {
    match property_name {
        Some(p) => format!(" (property '{}')", p),
        None => String::new(),
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ConversionError {
    #[error("Can't unwrap Value::{src_value} to basic type {basic_type}")]
    UnwrapToBaseTypeFailed {
        src_value: String,
        basic_type: &'static str,
    },
    #[error("Can't convert '{src_value}' to {target_type}{}", for_property(.property_name))]
    ValueFromStringFailed {
        src_value: String,
        target_type: String,
        property_name: Option<String>,
    },
    #[error("'{src_value}' matches neither the truthy nor the falsy boolean values{}", for_property(.property_name))]
    NoBooleanMatch {
        src_value: String,
        property_name: Option<String>,
    },
}

impl ConversionError {
    pub fn value_from_string<T: Into<String>>(src_value: T, target_type: String) -> Self {
        ConversionError::ValueFromStringFailed {
            src_value: src_value.into(),
            target_type,
            property_name: None,
        }
    }

    /// Attaches the destination slot name, unless one is already set.
    pub fn with_property(self, name: &str) -> Self {
        match self {
            ConversionError::ValueFromStringFailed {
                src_value,
                target_type,
                property_name,
            } => ConversionError::ValueFromStringFailed {
                src_value,
                target_type,
                property_name: property_name.or_else(|| Some(name.to_string())),
            },
            ConversionError::NoBooleanMatch {
                src_value,
                property_name,
            } => ConversionError::NoBooleanMatch {
                src_value,
                property_name: property_name.or_else(|| Some(name.to_string())),
            },
            other => other,
        }
    }
}
