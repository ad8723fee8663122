use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    errors::ConversionError,
    parser_config::ParserOptions,
    value::{EnumDescriptor, Value, ValueType},
};

type ConversionResult = std::result::Result<Value, ConversionError>;

// Tried in order. The first one that fits wins.
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%m/%d/%Y %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

macro_rules! from_str_to_value {
    ($fn_name:ident, $enum_type:ident, $type:ty) => {
        fn $fn_name(raw: &str, target_type: &ValueType) -> ConversionResult {
            raw.trim()
                .parse::<$type>()
                .map(Value::$enum_type)
                .map_err(|_| ConversionError::value_from_string(raw, target_type.to_string()))
        }
    };
}

from_str_to_value!(int32_from_str, Int32, i32);
from_str_to_value!(int64_from_str, Int64, i64);
from_str_to_value!(float64_from_str, Float64, f64);

/// Converts one raw field into a typed value.
///
/// Empty (or whitespace only) input is absence of data: it becomes [`Value::Null`] for nullable
/// targets and an empty string for string targets. Every other target rejects it.
pub fn convert(raw: &str, target_type: &ValueType, opts: &ParserOptions) -> ConversionResult {
    if raw.trim().is_empty() {
        return match target_type {
            ValueType::Nullable(_) => Ok(Value::Null),
            ValueType::String => Ok(Value::String(String::new())),
            _ => Err(ConversionError::value_from_string(
                "",
                target_type.to_string(),
            )),
        };
    }

    let underlying = target_type.underlying();
    match underlying {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(ConversionError::value_from_string(
                    raw,
                    target_type.to_string(),
                )),
            }
        }
        ValueType::Int32 => int32_from_str(raw, target_type),
        ValueType::Int64 => int64_from_str(raw, target_type),
        ValueType::Float64 => float64_from_str(raw, target_type),
        ValueType::Decimal => decimal_from_str(raw, target_type),
        ValueType::Bool => bool_from_str(raw, opts),
        ValueType::DateTime => date_time_from_str(raw)
            .map(Value::DateTime)
            .ok_or_else(|| ConversionError::value_from_string(raw, target_type.to_string())),
        ValueType::Uuid => Uuid::parse_str(raw.trim())
            .map(Value::Uuid)
            .map_err(|_| ConversionError::value_from_string(raw, target_type.to_string())),
        ValueType::Enum(descr) => enum_from_str(raw, descr)
            .map(Value::Enum)
            .ok_or_else(|| ConversionError::value_from_string(raw, target_type.to_string())),
        // `underlying()` never hands out a nullable
        ValueType::Nullable(_) => Err(ConversionError::value_from_string(
            raw,
            target_type.to_string(),
        )),
    }
}

/// Exact digits, no binary float detour. Exponent notation is only tried when the plain
/// notation fails.
fn decimal_from_str(raw: &str, target_type: &ValueType) -> ConversionResult {
    let trimmed = raw.trim();
    Decimal::from_str_exact(trimmed)
        .or_else(|e| {
            if trimmed.contains(['e', 'E']) {
                Decimal::from_scientific(trimmed)
            } else {
                Err(e)
            }
        })
        .map(Value::Decimal)
        .map_err(|_| ConversionError::value_from_string(raw, target_type.to_string()))
}

fn bool_from_str(raw: &str, opts: &ParserOptions) -> ConversionResult {
    let trimmed = raw.trim();
    if opts.is_truthy(trimmed) {
        Ok(Value::Bool(true))
    } else if opts.is_falsy(trimmed) {
        Ok(Value::Bool(false))
    } else {
        Err(ConversionError::NoBooleanMatch {
            src_value: raw.to_string(),
            property_name: None,
        })
    }
}

fn date_time_from_str(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn enum_from_str(raw: &str, descr: &EnumDescriptor) -> Option<i64> {
    let trimmed = raw.trim();
    descr.member_by_name(trimmed).or_else(|| {
        i64::from_str(trimmed)
            .ok()
            .filter(|d| descr.member_by_discriminant(*d).is_some())
    })
}
