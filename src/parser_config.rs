use std::sync::Arc;

use crate::{
    error_log::ErrorLogSink,
    errors::{PattiError, Result},
    skip_take_lines::SkipTakeLines,
};

pub const DEFAULT_TRUTHY_VALUES: [&str; 3] = ["true", "1", "yes"];
pub const DEFAULT_FALSY_VALUES: [&str; 3] = ["false", "0", "no"];

/// Everything that steers a single parse. Build it via [`ParserOptions::builder`], or use
/// [`ParserOptions::default`] for plain, comma separated data with a header row.
#[derive(Debug)]
pub struct ParserOptions {
    pub delimiter: char,
    pub enclosure_char: Option<char>,
    pub has_header_row: bool,
    pub skip_empty_lines: bool,
    pub trim_fields: bool,
    pub case_insensitive_headers: bool,
    pub strict_mode: bool,
    /// Only consulted in strict mode: reject lines with more fields than mapped columns.
    pub strict_column_count: bool,
    pub error_log_sink: Option<Arc<dyn ErrorLogSink>>,
    pub boolean_truthy_values: Vec<String>,
    pub boolean_falsy_values: Vec<String>,
    pub skip_lines: Vec<Box<dyn SkipTakeLines>>,
}

impl ParserOptions {
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::new()
    }

    pub fn is_truthy(&self, s: &str) -> bool {
        contains_ignore_case(&self.boolean_truthy_values, s)
    }

    pub fn is_falsy(&self, s: &str) -> bool {
        contains_ignore_case(&self.boolean_falsy_values, s)
    }

    pub fn enforces_column_count(&self) -> bool {
        self.strict_mode && self.strict_column_count
    }

    pub(crate) fn skip_line(&self, line_num: usize, line: &str) -> bool {
        self.skip_lines.iter().any(|filter| filter.skip(line_num, line))
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptionsBuilder::new().into_options()
    }
}

fn contains_ignore_case(values: &[String], s: &str) -> bool {
    let s = s.to_lowercase();
    values.iter().any(|v| v.to_lowercase() == s)
}

pub struct ParserOptionsBuilder {
    delimiter: char,
    enclosure_char: Option<char>,
    has_header_row: bool,
    skip_empty_lines: bool,
    trim_fields: bool,
    case_insensitive_headers: bool,
    strict_mode: bool,
    strict_column_count: bool,
    error_log_sink: Option<Arc<dyn ErrorLogSink>>,
    boolean_truthy_values: Vec<String>,
    boolean_falsy_values: Vec<String>,
    skip_lines: Vec<Box<dyn SkipTakeLines>>,
}

impl ParserOptionsBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            enclosure_char: Some('"'),
            has_header_row: true,
            skip_empty_lines: true,
            trim_fields: true,
            case_insensitive_headers: true,
            strict_mode: false,
            strict_column_count: true,
            error_log_sink: None,
            boolean_truthy_values: DEFAULT_TRUTHY_VALUES.iter().map(|s| s.to_string()).collect(),
            boolean_falsy_values: DEFAULT_FALSY_VALUES.iter().map(|s| s.to_string()).collect(),
            skip_lines: Vec::new(),
        }
    }

    pub fn csv() -> Self {
        Self::new()
    }

    pub fn tsv() -> Self {
        Self::new().delimiter('\t').enclosure_char(None)
    }

    pub fn delimiter(mut self, c: char) -> ParserOptionsBuilder {
        self.delimiter = c;
        self
    }

    pub fn enclosure_char(mut self, c: Option<char>) -> ParserOptionsBuilder {
        self.enclosure_char = c;
        self
    }

    pub fn has_header_row(mut self, b: bool) -> ParserOptionsBuilder {
        self.has_header_row = b;
        self
    }

    pub fn skip_empty_lines(mut self, b: bool) -> ParserOptionsBuilder {
        self.skip_empty_lines = b;
        self
    }

    pub fn trim_fields(mut self, b: bool) -> ParserOptionsBuilder {
        self.trim_fields = b;
        self
    }

    pub fn case_insensitive_headers(mut self, b: bool) -> ParserOptionsBuilder {
        self.case_insensitive_headers = b;
        self
    }

    pub fn strict_mode(mut self, b: bool) -> ParserOptionsBuilder {
        self.strict_mode = b;
        self
    }

    pub fn strict_column_count(mut self, b: bool) -> ParserOptionsBuilder {
        self.strict_column_count = b;
        self
    }

    pub fn error_log_sink(mut self, sink: Arc<dyn ErrorLogSink>) -> ParserOptionsBuilder {
        self.error_log_sink = Some(sink);
        self
    }

    pub fn boolean_truthy_values<I, S>(mut self, values: I) -> ParserOptionsBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_truthy_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn boolean_falsy_values<I, S>(mut self, values: I) -> ParserOptionsBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_falsy_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_lines(mut self, s: Vec<Box<dyn SkipTakeLines>>) -> ParserOptionsBuilder {
        self.skip_lines = s;
        self
    }

    pub fn build(self) -> Result<ParserOptions> {
        if Some(self.delimiter) == self.enclosure_char {
            return Err(PattiError::Config {
                msg: format!(
                    "delimiter and enclosure character must differ (both are {:?})",
                    self.delimiter
                ),
            });
        }
        if self.boolean_truthy_values.is_empty() || self.boolean_falsy_values.is_empty() {
            return Err(PattiError::Config {
                msg: String::from("truthy and falsy boolean values must not be empty"),
            });
        }
        if let Some(dup) = self
            .boolean_truthy_values
            .iter()
            .find(|t| contains_ignore_case(&self.boolean_falsy_values, t))
        {
            return Err(PattiError::Config {
                msg: format!("'{}' is configured as truthy and falsy value at once", dup),
            });
        }
        Ok(self.into_options())
    }

    fn into_options(self) -> ParserOptions {
        ParserOptions {
            delimiter: self.delimiter,
            enclosure_char: self.enclosure_char,
            has_header_row: self.has_header_row,
            skip_empty_lines: self.skip_empty_lines,
            trim_fields: self.trim_fields,
            case_insensitive_headers: self.case_insensitive_headers,
            strict_mode: self.strict_mode,
            strict_column_count: self.strict_column_count,
            error_log_sink: self.error_log_sink,
            boolean_truthy_values: self.boolean_truthy_values,
            boolean_falsy_values: self.boolean_falsy_values,
            skip_lines: self.skip_lines,
        }
    }
}

impl Default for ParserOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
