use regex::Regex;
use std::fmt::Debug;

use crate::errors::{PattiError, Result};

/// Line filters that run before anything else looks at a line. A skipped line still counts
/// for the line numbering, it just never reaches the tokenizer.
pub trait SkipTakeLines: Debug + Send + Sync {
    fn skip(&self, line_num: usize, line_content: &str) -> bool;
}

#[derive(Debug)]
pub struct SkipLinesFromStart {
    skip_num_lines: usize,
}
impl SkipLinesFromStart {
    pub fn new(skip_num_lines: usize) -> Self {
        Self { skip_num_lines }
    }
}
impl SkipTakeLines for SkipLinesFromStart {
    fn skip(&self, line_num: usize, _line_content: &str) -> bool {
        line_num <= self.skip_num_lines
    }
}

#[derive(Debug)]
pub struct SkipLinesStartingWith {
    starts_with: String,
}
impl SkipLinesStartingWith {
    pub fn new<T>(starts_with: T) -> Self
    where
        T: Into<String> + Debug,
    {
        Self {
            starts_with: starts_with.into(),
        }
    }
}
impl SkipTakeLines for SkipLinesStartingWith {
    fn skip(&self, _line_num: usize, line_content: &str) -> bool {
        line_content.starts_with(&self.starts_with)
    }
}

#[derive(Debug)]
pub struct SkipLinesByRegex {
    regex: Regex,
}
impl SkipLinesByRegex {
    pub fn new<T>(regex_pattern: T) -> Result<Self>
    where
        T: AsRef<str> + Debug,
    {
        let re = Regex::new(regex_pattern.as_ref()).map_err(|e| PattiError::Config {
            msg: format!(
                "[ERROR_ON_REGEX_COMPILE] Cannot create SkipLinesByRegex by given regex str={}. Error: {}",
                regex_pattern.as_ref(),
                e
            ),
        })?;
        Ok(Self { regex: re })
    }
}
impl SkipTakeLines for SkipLinesByRegex {
    fn skip(&self, _line_num: usize, line_content: &str) -> bool {
        self.regex.is_match(line_content)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::skip_take_lines::*;

    fn test_data_01() -> Vec<&'static str> {
        vec![
            "Some preamble",
            "# comment",
            "",
            "column1,column2,column3,column4,column5",
            r###""SOMEDATA   ",1,10.12,"true",eur"###,
            r###""SOMEDATA   ",2,10.12,"true",eur"###,
            r###""","","","Totals:",5"###,
        ]
    }

    fn apply(check_line: &dyn SkipTakeLines) -> Vec<bool> {
        test_data_01()
            .iter()
            .enumerate()
            .map(|(i, &s)| check_line.skip(i + 1, s))
            .collect::<Vec<bool>>()
    }

    #[test]
    fn skip_one_lines_from_start() {
        assert_eq![
            vec![true, false, false, false, false, false, false],
            apply(&SkipLinesFromStart::new(1))
        ];
    }

    #[test]
    fn skip_lines_by_starts_with_hashbang() {
        assert_eq![
            vec![false, true, false, false, false, false, false],
            apply(&SkipLinesStartingWith::new("#"))
        ];
    }

    #[test]
    fn skip_lines_by_regex_empty_column_with_total() {
        let check_line = SkipLinesByRegex::new(r###"^"","","","Totals:",.*"###).unwrap();
        assert_eq![
            vec![false, false, false, false, false, false, true],
            apply(&check_line)
        ];
    }

    #[test]
    fn skip_lines_by_regex_invalid() {
        let err = SkipLinesByRegex::new("(unclosed").unwrap_err();
        assert_eq!(ErrorKind::Config, err.kind());
    }
}
