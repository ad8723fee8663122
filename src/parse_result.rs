use std::cell::Cell;

use crate::errors::{ErrorKind, PattiError, Result};

/// One line that could not be turned into a record during a lenient parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 1-based, the header row and skipped lines count too.
    pub line_number: usize,
    /// The line as it was read, before any trimming.
    pub line_content: String,
    pub error_message: String,
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(line_number: usize, line_content: &str, error: &PattiError) -> Self {
        Self {
            line_number,
            line_content: line_content.to_string(),
            error_message: error.to_string(),
            kind: error.kind(),
        }
    }
}

/// Records plus line errors of one parse.
///
/// In lenient mode the records can only be read once the errors have been looked at, either via
/// [`has_errors`](Self::has_errors) or [`errors`](Self::errors). [`acknowledge`](Self::acknowledge)
/// hands out both at once.
#[derive(Debug)]
pub struct ParseResult<T> {
    records: Vec<T>,
    errors: Vec<ParseError>,
    strict_mode: bool,
    errors_acknowledged: Cell<bool>,
}

impl<T> ParseResult<T> {
    pub(crate) fn new(records: Vec<T>, errors: Vec<ParseError>, strict_mode: bool) -> Self {
        Self {
            records,
            errors,
            strict_mode,
            errors_acknowledged: Cell::new(false),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors_acknowledged.set(true);
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        self.errors_acknowledged.set(true);
        &self.errors
    }

    pub fn records(&self) -> Result<&[T]> {
        if self.strict_mode || self.errors_acknowledged.get() {
            Ok(&self.records)
        } else {
            Err(PattiError::ErrorsNotAcknowledged)
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    pub fn acknowledge(&self) -> Acknowledged<'_, T> {
        self.errors_acknowledged.set(true);
        Acknowledged {
            records: &self.records,
            errors: &self.errors,
        }
    }

    /// Takes the result apart. Errors and records come out together, so this never fails.
    pub fn into_parts(self) -> (Vec<T>, Vec<ParseError>) {
        (self.records, self.errors)
    }
}

/// Read access to the records of a parse whose errors have been seen.
#[derive(Debug)]
pub struct Acknowledged<'a, T> {
    records: &'a [T],
    errors: &'a [ParseError],
}

impl<'a, T> Acknowledged<'a, T> {
    pub fn records(&self) -> &'a [T] {
        self.records
    }

    pub fn errors(&self) -> &'a [ParseError] {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient_with_error() -> ParseResult<i32> {
        ParseResult::new(
            vec![1, 2],
            vec![ParseError::new(
                3,
                " x ",
                &PattiError::EmptyLine { line_number: 3 },
            )],
            false,
        )
    }

    #[test]
    fn records_before_ack_fails() {
        let res = lenient_with_error();
        assert_eq!(Err(PattiError::ErrorsNotAcknowledged), res.records());
        // still failing, reading records doesn't acknowledge anything
        assert_eq!(Err(PattiError::ErrorsNotAcknowledged), res.records());
    }

    #[test]
    fn records_after_has_errors() {
        let res = lenient_with_error();
        assert!(res.has_errors());
        assert_eq!(Ok(&[1, 2][..]), res.records());
        // stays acknowledged
        assert_eq!(Ok(&[1, 2][..]), res.records());
    }

    #[test]
    fn records_after_errors() {
        let res = lenient_with_error();
        let errs = res.errors();
        assert_eq!(1, errs.len());
        assert_eq!(3, errs[0].line_number);
        assert_eq!(" x ", errs[0].line_content);
        assert_eq!("Empty line", errs[0].error_message);
        assert_eq!(ErrorKind::EmptyLine, errs[0].kind);
        assert!(res.records().is_ok());
    }

    #[test]
    fn lenient_without_errors_still_needs_ack() {
        let res: ParseResult<i32> = ParseResult::new(vec![1], vec![], false);
        assert!(res.records().is_err());
        assert!(!res.has_errors());
        assert_eq!(Ok(&[1][..]), res.records());
    }

    #[test]
    fn strict_records_always_readable() {
        let res: ParseResult<i32> = ParseResult::new(vec![1], vec![], true);
        assert!(res.is_strict());
        assert_eq!(Ok(&[1][..]), res.records());
    }

    #[test]
    fn acknowledge_two_phase() {
        let res = lenient_with_error();
        let ack = res.acknowledge();
        assert!(ack.has_errors());
        assert_eq!(&[1, 2], ack.records());
        assert_eq!(1, ack.errors().len());
        assert!(res.records().is_ok());
    }

    #[test]
    fn into_parts() {
        let (records, errors) = lenient_with_error().into_parts();
        assert_eq!(vec![1, 2], records);
        assert_eq!(1, errors.len());
    }
}
