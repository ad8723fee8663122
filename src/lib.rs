//! Parses delimited text lines into typed records.
//!
//! Lines are split into fields (RFC 4180 style quoting), the fields are mapped onto the slots of
//! a record type by header name or position, and each value is converted into the slot's type.
//! Parsing either stops at the first problem (strict mode) or collects the broken lines next to
//! the good records (lenient mode).
//!
//! ```
//! use patti_records::{csv_record, ParserOptions, RecordParser};
//!
//! csv_record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Person {
//!         pub name: String,
//!         pub age: i32,
//!     }
//! }
//!
//! let parser = RecordParser::<Person>::new(ParserOptions::default());
//! let res = parser.parse(["name,age", "John,30", "Jane,thirty"]).unwrap();
//!
//! assert!(res.has_errors());
//! assert_eq!(3, res.errors()[0].line_number);
//! assert_eq!(1, res.records().unwrap().len());
//! ```

pub mod column_mapping;
pub mod error_log;
pub mod errors;
pub mod line_tokenizer;
pub mod parse_result;
pub mod parser_config;
pub mod record;
pub mod record_binder;
pub mod record_parser;
pub mod schema;
pub mod skip_take_lines;
pub mod value;
pub mod value_converter;

#[cfg(feature = "jsonconf")]
pub mod conf;

pub use column_mapping::{ColumnMapping, HeaderMap};
pub use error_log::{ErrorLogSink, WriterErrorLog};
pub use errors::{ErrorKind, PattiError, Result};
pub use line_tokenizer::LineTokenizer;
pub use parse_result::{Acknowledged, ParseError, ParseResult};
pub use parser_config::{ParserOptions, ParserOptionsBuilder};
pub use record::{CsvEnum, FieldType, Record, Slot};
pub use record_parser::{parse_lines, RecordParser};
pub use schema::{schema_for, Schema};
pub use value::{EnumDescriptor, Value, ValueType};
