use log::trace;

use crate::{
    column_mapping::{resolve_index, validate_index, HeaderMap},
    errors::Result,
    parser_config::ParserOptions,
    record::Record,
    schema::Schema,
    value_converter::convert,
};

/// Turns the fields of one line into a record, slot by slot in schema order. The first failing
/// slot aborts the whole line; the half-filled record is dropped.
pub struct RecordBinder<'a> {
    schema: &'a Schema,
    opts: &'a ParserOptions,
}

impl<'a> RecordBinder<'a> {
    pub fn new(schema: &'a Schema, opts: &'a ParserOptions) -> Self {
        Self { schema, opts }
    }

    pub fn bind<T: Record>(
        &self,
        fields: &[String],
        header_map: Option<&HeaderMap>,
        line_number: usize,
    ) -> Result<T> {
        let mut record = T::blank();
        for entry in self.schema.entries() {
            let idx = resolve_index(&entry.mapping, header_map)?;
            validate_index(
                idx,
                fields.len(),
                self.schema.len(),
                self.opts.enforces_column_count(),
                line_number,
            )?;
            let raw = &fields[idx];
            let value = convert(raw, &entry.value_type, self.opts)
                .map_err(|e| e.with_property(&entry.slot))?;
            trace!("line {}: {} <- {:?}", line_number, entry.slot, value);
            record.assign(&entry.slot, value)?;
        }
        Ok(record)
    }
}
