use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    column_mapping::ColumnMapping,
    errors::Result,
    value::{EnumDescriptor, Value, ValueType},
};

/// A named, typed storage location on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub value_type: ValueType,
}

impl Slot {
    pub fn new(name: &'static str, value_type: ValueType) -> Self {
        Self { name, value_type }
    }
}

/// A destination type the parser can fill.
///
/// Usually implemented through [`csv_record!`](crate::csv_record), but nothing keeps you from
/// writing it by hand.
pub trait Record: Sized + 'static {
    /// Every bindable slot, in declaration order.
    fn slots() -> Vec<Slot>;

    /// Explicit slot -> column table. `None` maps the slots by declaration order, i.e. slot `n`
    /// reads column `n` (or the header named like the slot).
    fn column_mappings() -> Option<Vec<(String, ColumnMapping)>> {
        None
    }

    fn blank() -> Self;

    /// Fails with [`PattiError::SlotNotFound`](crate::errors::PattiError::SlotNotFound) for
    /// unknown slots.
    fn assign(&mut self, slot: &str, value: Value) -> Result<()>;
}

/// Rust types a slot can have.
pub trait FieldType: Sized {
    fn value_type() -> ValueType;
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_field_type {
    ($type:ty, $value_type:ident) => {
        impl FieldType for $type {
            fn value_type() -> ValueType {
                ValueType::$value_type
            }
            fn from_value(value: Value) -> Result<Self> {
                <$type>::try_from(value)
            }
        }
    };
}
impl_field_type!(String, String);
impl_field_type!(char, Char);
impl_field_type!(i32, Int32);
impl_field_type!(i64, Int64);
impl_field_type!(f64, Float64);
impl_field_type!(Decimal, Decimal);
impl_field_type!(bool, Bool);
impl_field_type!(NaiveDateTime, DateTime);
impl_field_type!(Uuid, Uuid);

impl<T: FieldType> FieldType for Option<T> {
    fn value_type() -> ValueType {
        ValueType::nullable(T::value_type())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

/// Fieldless enums that can be read from their member names or discriminants.
pub trait CsvEnum: Sized {
    fn descriptor() -> &'static EnumDescriptor;
    fn from_discriminant(discriminant: i64) -> Option<Self>;
}

/// Declares a struct and implements [`Record`] for it. The struct must implement `Default`,
/// that's what a blank record is made from.
///
/// An optional `mappings { .. }` block replaces the positional default mapping:
///
/// ```
/// use patti_records::{csv_record, ColumnMapping};
///
/// csv_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         pub name: String,
///         pub age: Option<i32>,
///     }
///     mappings {
///         "name" => ColumnMapping::named("Full Name"),
///         "age" => ColumnMapping::named("Age"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! csv_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $fty:ty ),* $(,)?
        }
        $( mappings { $( $slot:literal => $mapping:expr ),* $(,)? } )?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field : $fty ),*
        }

        impl $crate::record::Record for $name {
            fn slots() -> ::std::vec::Vec<$crate::record::Slot> {
                vec![
                    $( $crate::record::Slot::new(
                        stringify!($field),
                        <$fty as $crate::record::FieldType>::value_type(),
                    ) ),*
                ]
            }

            $(
            fn column_mappings() -> ::std::option::Option<
                ::std::vec::Vec<(::std::string::String, $crate::column_mapping::ColumnMapping)>,
            > {
                Some(vec![ $( (::std::string::String::from($slot), $mapping) ),* ])
            }
            )?

            fn blank() -> Self {
                <Self as ::std::default::Default>::default()
            }

            fn assign(
                &mut self,
                slot: &str,
                value: $crate::value::Value,
            ) -> $crate::errors::Result<()> {
                match slot {
                    $(
                    stringify!($field) => {
                        self.$field = <$fty as $crate::record::FieldType>::from_value(value)?;
                        Ok(())
                    }
                    )*
                    _ => Err($crate::errors::PattiError::SlotNotFound {
                        slot: slot.to_string(),
                        record_type: stringify!($name),
                    }),
                }
            }
        }
    };
}

/// Declares a fieldless enum that can be used as a record field type.
///
/// ```
/// use patti_records::csv_enum;
///
/// csv_enum! {
///     #[derive(Debug, Clone, Copy, Default, PartialEq)]
///     pub enum Priority {
///         #[default]
///         Low = 1,
///         High = 3,
///     }
/// }
/// ```
#[macro_export]
macro_rules! csv_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $disc:expr)? ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant $(= $disc)? ),*
        }

        impl $crate::record::CsvEnum for $name {
            fn descriptor() -> &'static $crate::value::EnumDescriptor {
                static DESCRIPTOR: $crate::value::EnumDescriptor = $crate::value::EnumDescriptor {
                    name: stringify!($name),
                    members: &[ $( (stringify!($variant), $name::$variant as i64) ),* ],
                };
                &DESCRIPTOR
            }

            fn from_discriminant(discriminant: i64) -> ::std::option::Option<Self> {
                match discriminant {
                    $( d if d == $name::$variant as i64 => Some($name::$variant), )*
                    _ => None,
                }
            }
        }

        impl $crate::record::FieldType for $name {
            fn value_type() -> $crate::value::ValueType {
                $crate::value::ValueType::Enum(<$name as $crate::record::CsvEnum>::descriptor())
            }

            fn from_value(value: $crate::value::Value) -> $crate::errors::Result<Self> {
                match value {
                    $crate::value::Value::Enum(d) => {
                        <$name as $crate::record::CsvEnum>::from_discriminant(d).ok_or_else(|| {
                            $crate::errors::ConversionError::value_from_string(
                                d.to_string(),
                                <Self as $crate::record::FieldType>::value_type().to_string(),
                            )
                            .into()
                        })
                    }
                    other => Err($crate::errors::ConversionError::UnwrapToBaseTypeFailed {
                        src_value: format!("{:?}", other),
                        basic_type: stringify!($name),
                    }
                    .into()),
                }
            }
        }
    };
}
