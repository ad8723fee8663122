use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::convert::From;
use std::fmt::Display;
use uuid::Uuid;

use crate::errors::{ConversionError, PattiError, Result};

/// Static description of a fieldless enum: its name plus every member name with its
/// discriminant, in declaration order.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub members: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    /// Case-insensitive, with the same Unicode lowercasing the header lookup uses.
    pub fn member_by_name(&self, name: &str) -> Option<i64> {
        let name = name.to_lowercase();
        self.members
            .iter()
            .find(|(n, _)| n.to_lowercase() == name)
            .map(|(_, d)| *d)
    }

    pub fn member_by_discriminant(&self, discriminant: i64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, d)| *d == discriminant)
            .map(|(n, _)| *n)
    }
}

/// The type a raw field gets converted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    Char,
    Int32,
    Int64,
    Float64,
    Decimal,
    Bool,
    DateTime,
    Uuid,
    Enum(&'static EnumDescriptor),
    Nullable(Box<ValueType>),
}

impl ValueType {
    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, ValueType::Nullable(_))
    }

    /// The type behind any number of nullable wrappers.
    pub fn underlying(&self) -> &ValueType {
        match self {
            ValueType::Nullable(inner) => inner.underlying(),
            other => other,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::String => write!(f, "String"),
            ValueType::Char => write!(f, "Char"),
            ValueType::Int32 => write!(f, "Int32"),
            ValueType::Int64 => write!(f, "Int64"),
            ValueType::Float64 => write!(f, "Float64"),
            ValueType::Decimal => write!(f, "Decimal"),
            ValueType::Bool => write!(f, "Bool"),
            ValueType::DateTime => write!(f, "DateTime"),
            ValueType::Uuid => write!(f, "Uuid"),
            ValueType::Enum(descr) => write!(f, "Enum({})", descr.name),
            ValueType::Nullable(inner) => write!(f, "Nullable<{}>", inner),
        }
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    Null,
    String(String),
    Char(char),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Decimal(Decimal),
    Bool(bool),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    /// Discriminant of the matched enum member.
    Enum(i64),
}

macro_rules! impl_from_type_for_value {
    ($enum_type:ident, $type:ty) => {
        impl From<$type> for Value {
            fn from(item: $type) -> Self {
                Value::$enum_type(item)
            }
        }
    };
}
impl_from_type_for_value!(String, String);
impl_from_type_for_value!(Char, char);
impl_from_type_for_value!(Int32, i32);
impl_from_type_for_value!(Int64, i64);
impl_from_type_for_value!(Float64, f64);
impl_from_type_for_value!(Bool, bool);
impl_from_type_for_value!(Decimal, Decimal);
impl_from_type_for_value!(DateTime, NaiveDateTime);
impl_from_type_for_value!(Uuid, Uuid);

macro_rules! impl_try_from_value_for_type {
    ($enum_type:ident, $type:ty) => {
        impl TryFrom<Value> for $type {
            type Error = PattiError;

            fn try_from(item: Value) -> Result<$type> {
                match item {
                    Value::$enum_type(v) => Ok(v),
                    _ => Err(PattiError::Conversion(
                        ConversionError::UnwrapToBaseTypeFailed {
                            src_value: format!("{:?}", item),
                            basic_type: stringify!($type),
                        },
                    )),
                }
            }
        }
    };
}
impl_try_from_value_for_type!(String, String);
impl_try_from_value_for_type!(Char, char);
impl_try_from_value_for_type!(Int32, i32);
impl_try_from_value_for_type!(Int64, i64);
impl_try_from_value_for_type!(Float64, f64);
impl_try_from_value_for_type!(Bool, bool);
impl_try_from_value_for_type!(Decimal, Decimal);
impl_try_from_value_for_type!(DateTime, NaiveDateTime);
impl_try_from_value_for_type!(Uuid, Uuid);

macro_rules! is_type {
    ($fn_name:ident, $enum_type:ident) => {
        pub fn $fn_name(&self) -> bool {
            matches!(self, Value::$enum_type(..))
        }
    };
}

impl Value {
    is_type!(is_string, String);
    is_type!(is_char, Char);
    is_type!(is_int32, Int32);
    is_type!(is_int64, Int64);
    is_type!(is_float64, Float64);
    is_type!(is_bool, Bool);
    is_type!(is_decimal, Decimal);
    is_type!(is_date_time, DateTime);
    is_type!(is_uuid, Uuid);
    is_type!(is_enum, Enum);

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
