use serde::Deserialize;

/// JSON shape of [`ParserOptions`](crate::parser_config::ParserOptions). Everything is optional,
/// whatever is missing keeps its default.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserOpts {
    pub comment: Option<String>,
    pub delimiter: Option<char>,
    /// `null` switches quote handling off, a missing key keeps the default `"`.
    #[serde(default, deserialize_with = "deser_explicit_option")]
    pub enclosure_char: Option<Option<char>>,
    pub has_header_row: Option<bool>,
    pub skip_empty_lines: Option<bool>,
    pub trim_fields: Option<bool>,
    pub case_insensitive_headers: Option<bool>,
    pub strict_mode: Option<bool>,
    pub strict_column_count: Option<bool>,
    pub boolean_truthy_values: Option<Vec<String>>,
    pub boolean_falsy_values: Option<Vec<String>>,
    pub lines: Option<ParserOptLines>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserOptLines {
    pub comment: Option<String>,
    pub skip_lines_from_start: Option<usize>,
    pub skip_lines_by_startswith: Option<Vec<String>>,
    pub skip_lines_by_regex: Option<Vec<String>>,
}

fn deser_explicit_option<'de, D>(deserializer: D) -> Result<Option<Option<char>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<char>::deserialize(deserializer).map(Some)
}
