use crate::{
    conf::jsonconf::ParserOpts,
    errors::{PattiError, Result},
    parser_config::{ParserOptions, ParserOptionsBuilder},
    skip_take_lines::*,
};

impl TryFrom<ParserOpts> for ParserOptions {
    type Error = PattiError;

    fn try_from(cfg: ParserOpts) -> Result<Self> {
        let mut builder = ParserOptionsBuilder::new();

        if let Some(c) = cfg.delimiter {
            builder = builder.delimiter(c);
        }
        if let Some(c) = cfg.enclosure_char {
            builder = builder.enclosure_char(c);
        }
        if let Some(b) = cfg.has_header_row {
            builder = builder.has_header_row(b);
        }
        if let Some(b) = cfg.skip_empty_lines {
            builder = builder.skip_empty_lines(b);
        }
        if let Some(b) = cfg.trim_fields {
            builder = builder.trim_fields(b);
        }
        if let Some(b) = cfg.case_insensitive_headers {
            builder = builder.case_insensitive_headers(b);
        }
        if let Some(b) = cfg.strict_mode {
            builder = builder.strict_mode(b);
        }
        if let Some(b) = cfg.strict_column_count {
            builder = builder.strict_column_count(b);
        }
        if let Some(v) = cfg.boolean_truthy_values {
            builder = builder.boolean_truthy_values(v);
        }
        if let Some(v) = cfg.boolean_falsy_values {
            builder = builder.boolean_falsy_values(v);
        }

        if let Some(skip_take_lines_cfg) = cfg.lines {
            let mut skip_take_lines: Vec<Box<dyn SkipTakeLines>> = Vec::new();

            if let Some(v) = skip_take_lines_cfg.skip_lines_from_start {
                skip_take_lines.push(Box::new(SkipLinesFromStart::new(v)));
            }
            if let Some(v) = skip_take_lines_cfg.skip_lines_by_startswith {
                v.into_iter()
                    .for_each(|e| skip_take_lines.push(Box::new(SkipLinesStartingWith::new(e))));
            }
            if let Some(v) = skip_take_lines_cfg.skip_lines_by_regex {
                for c in v.iter() {
                    let tmp = SkipLinesByRegex::new(c)?; // <--- this is why this is a TryFrom
                    skip_take_lines.push(Box::new(tmp))
                }
            }

            if !skip_take_lines.is_empty() {
                builder = builder.skip_lines(skip_take_lines);
            }
        }

        builder.build()
    }
}

impl ParserOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: ParserOpts = serde_json::from_str(json).map_err(|e| PattiError::Config {
            msg: format!("cannot read parser options from json: {}", e),
        })?;
        cfg.try_into()
    }
}
