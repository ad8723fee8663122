use compact_str::CompactString;

use crate::errors::{Result, TokenizerError};

enum State {
    Unquoted,      // regular, unenclosed part of a field. Delimiters end the field here
    Quoted,        // inside an enclosure. Everything but the enclosure character is literal
    QuoteInQuoted, // we need this to decide if an enclosure character was escaped or closes the enclosure
}

/// Splits a single line into its raw fields.
///
/// Mostly written with the csv rfc (https://tools.ietf.org/html/rfc4180) in mind, but a bit more
/// forgiving: an enclosure character simply toggles the quoting state, wherever it occurs in a
/// field, and a doubled enclosure character inside an enclosure yields one literal enclosure
/// character. No trimming or any other normalization happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokenizer {
    max_inline_str_size: usize, // helper for compact string. Since we're not that concerned with space limitations, we allocate the max a compact string can allocate on the stack
    pub delim_char: char,
    pub encl_char: Option<char>,
}

impl LineTokenizer {
    pub fn new(delim: char, enclc: Option<char>) -> Self {
        Self {
            max_inline_str_size: std::mem::size_of::<String>(),
            delim_char: delim,
            encl_char: enclc,
        }
    }
    pub fn csv() -> Self {
        LineTokenizer::new(',', Some('"'))
    }
    pub fn tab() -> Self {
        LineTokenizer::new('\t', None)
    }

    /// Always yields at least one field. An empty line is one empty field, `n` unquoted
    /// delimiters are `n + 1` fields.
    pub fn tokenize(&self, line: &str) -> Result<Vec<String>> {
        let mut state = State::Unquoted;
        let mut data: Vec<CompactString> = Vec::new();
        let mut curr = CompactString::with_capacity(self.max_inline_str_size);

        for c in line.chars() {
            state = match state {
                State::Unquoted => self.scan_unquoted(c, &mut curr, &mut data),
                State::Quoted => match c {
                    _ if Some(c) == self.encl_char => State::QuoteInQuoted,
                    _ => {
                        curr.push(c);
                        State::Quoted
                    }
                },
                State::QuoteInQuoted => match c {
                    _ if Some(c) == self.encl_char => {
                        // enclosure character escaped successfully
                        curr.push(c);
                        State::Quoted
                    }
                    // the previous enclosure character closed the enclosure, treat c as unquoted
                    _ => self.scan_unquoted(c, &mut curr, &mut data),
                },
            }
        }

        if let State::Quoted = state {
            return Err(TokenizerError::UnclosedQuote {
                line: line.to_string(),
                token_num: data.len(),
            }
            .into());
        }
        data.push(curr);

        Ok(data
            .iter()
            .map(|t| String::from(t.as_str()))
            .collect::<Vec<String>>())
    }

    fn scan_unquoted(
        &self,
        c: char,
        curr: &mut CompactString,
        data: &mut Vec<CompactString>,
    ) -> State {
        match c {
            _ if c == self.delim_char => {
                let finished = std::mem::replace(
                    curr,
                    CompactString::with_capacity(self.max_inline_str_size),
                );
                data.push(finished);
                State::Unquoted
            }
            _ if Some(c) == self.encl_char => State::Quoted,
            _ => {
                curr.push(c);
                State::Unquoted
            }
        }
    }
}

impl Default for LineTokenizer {
    fn default() -> Self {
        Self::csv()
    }
}
