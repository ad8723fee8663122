use chrono::Local;
use log::{debug, trace, warn};
use std::io::BufRead;
use std::marker::PhantomData;

use crate::{
    column_mapping::HeaderMap,
    errors::{PattiError, Result},
    line_tokenizer::LineTokenizer,
    parse_result::{ParseError, ParseResult},
    parser_config::ParserOptions,
    record::Record,
    record_binder::RecordBinder,
    schema::schema_for,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingFirstLine,
    AwaitingHeader,
    ReadingData,
}

/// Parses lines of delimited text into records of type `T`.
///
/// In strict mode the first problem aborts the parse and comes back as a single
/// [`PattiError::Line`]. In lenient mode every broken line ends up as a [`ParseError`] in the
/// result and parsing goes on. Only a broken record definition (`SlotNotFound`) aborts a lenient
/// parse.
#[derive(Debug)]
pub struct RecordParser<T: Record> {
    opts: ParserOptions,
    tokenizer: LineTokenizer,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordParser<T> {
    pub fn new(opts: ParserOptions) -> Self {
        debug!(
            "record parser for {} with line filters {:?}",
            std::any::type_name::<T>(),
            opts.skip_lines
        );
        Self {
            tokenizer: LineTokenizer::new(opts.delimiter, opts.enclosure_char),
            opts,
            _record: PhantomData,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.opts
    }

    /// Splits on `\n` (and `\r\n`).
    pub fn parse_str(&self, data: &str) -> Result<ParseResult<T>> {
        self.parse(data.lines())
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseResult<T>> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.parse(lines)
    }

    pub fn parse<I, S>(&self, lines: I) -> Result<ParseResult<T>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let schema = schema_for::<T>()?;
        let binder = RecordBinder::new(&schema, &self.opts);

        let mut state = State::AwaitingFirstLine;
        let mut header_map: Option<HeaderMap> = None;
        let mut records: Vec<T> = Vec::new();
        let mut errors: Vec<ParseError> = Vec::new();

        for (i, line) in lines.into_iter().enumerate() {
            let line_number = i + 1;
            let line = line.as_ref();

            if self.opts.skip_line(line_number, line) {
                trace!("line {}: skipped by line filter", line_number);
                continue;
            }

            if line.trim().is_empty() {
                if !self.opts.skip_empty_lines {
                    self.line_failed(
                        line_number,
                        line,
                        PattiError::EmptyLine { line_number },
                        &mut errors,
                    )?;
                }
                continue;
            }

            if state == State::AwaitingFirstLine {
                state = if self.opts.has_header_row {
                    State::AwaitingHeader
                } else {
                    State::ReadingData
                };
            }

            let fields = match self.tokenizer.tokenize(line) {
                Ok(fields) => fields,
                Err(e) => {
                    self.line_failed(line_number, line, e, &mut errors)?;
                    continue;
                }
            };
            let fields = if self.opts.trim_fields {
                fields.into_iter().map(|f| f.trim().to_string()).collect()
            } else {
                fields
            };
            trace!("line {}: {:?}", line_number, fields);

            if state == State::AwaitingHeader {
                let hm = HeaderMap::from_fields(&fields, self.opts.case_insensitive_headers);
                debug!("line {}: header with {} columns", line_number, hm.len());
                header_map = Some(hm);
                state = State::ReadingData;
                continue;
            }

            match binder.bind::<T>(&fields, header_map.as_ref(), line_number) {
                Ok(record) => records.push(record),
                Err(e) if e.is_fatal() => return Err(e.at_line(line_number)),
                Err(e) => self.line_failed(line_number, line, e, &mut errors)?,
            }
        }

        debug!(
            "parse done: {} records, {} errors",
            records.len(),
            errors.len()
        );
        Ok(ParseResult::new(records, errors, self.opts.strict_mode))
    }

    /// Strict mode turns the error into the parse result, lenient mode records it and moves on.
    fn line_failed(
        &self,
        line_number: usize,
        line: &str,
        error: PattiError,
        errors: &mut Vec<ParseError>,
    ) -> Result<()> {
        if self.opts.strict_mode {
            return Err(error.at_line(line_number));
        }
        warn!("line {}: {}", line_number, error);
        let parse_error = ParseError::new(line_number, line, &error);
        if let Some(sink) = &self.opts.error_log_sink {
            if let Err(e) = sink.log(Local::now(), line_number, &parse_error.error_message) {
                warn!("error log sink failed: {}", e);
            }
        }
        errors.push(parse_error);
        Ok(())
    }
}

impl<T: Record> Default for RecordParser<T> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

/// Shorthand for a one-off [`RecordParser::parse`].
pub fn parse_lines<T, I, S>(lines: I, opts: ParserOptions) -> Result<ParseResult<T>>
where
    T: Record,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RecordParser::<T>::new(opts).parse(lines)
}
