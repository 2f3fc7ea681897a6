//! Assembling multi-part form values into one typed value.
//!
//! Date selects submit `birth_date(1i)`, `birth_date(2i)`, `birth_date(3i)`
//! for year, month and day; datetime selects add hour, minute and second
//! at positions 4-6. Records that accept the pass-through keys use this
//! to build the final value.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::params::{is_blank, ParamKey};
use crate::schema::ColumnType;

/// Why a set of parts could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultipartError {
    #[error("part {0} is missing")]
    MissingPart(u32),
    #[error("part {position} is not a number: '{value}'")]
    NotANumber { position: u32, value: String },
    #[error("not a valid {0}")]
    OutOfRange(&'static str),
}

/// Parts keyed by numeric position.
fn positional(parts: &IndexMap<String, String>) -> IndexMap<u32, &str> {
    let mut by_position: IndexMap<u32, &str> = parts
        .iter()
        .filter_map(|(key, value)| {
            ParamKey::parse(key)
                .position()
                .map(|position| (position, value.as_str()))
        })
        .collect();
    by_position.sort_keys();
    by_position
}

fn number(parts: &IndexMap<u32, &str>, position: u32) -> Result<u32, MultipartError> {
    let raw = parts
        .get(&position)
        .copied()
        .filter(|v| !is_blank(v))
        .ok_or(MultipartError::MissingPart(position))?;
    raw.trim().parse().map_err(|_| MultipartError::NotANumber {
        position,
        value: raw.to_string(),
    })
}

fn optional_number(parts: &IndexMap<u32, &str>, position: u32) -> Result<u32, MultipartError> {
    match parts.get(&position) {
        Some(v) if !is_blank(v) => number(parts, position),
        _ => Ok(0),
    }
}

fn date(parts: &IndexMap<u32, &str>) -> Result<NaiveDate, MultipartError> {
    let year = number(parts, 1)?;
    let month = number(parts, 2)?;
    let day = number(parts, 3)?;
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or(MultipartError::OutOfRange("date"))
}

fn time(parts: &IndexMap<u32, &str>) -> Result<NaiveTime, MultipartError> {
    let hour = number(parts, 4)?;
    let minute = number(parts, 5)?;
    let second = optional_number(parts, 6)?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or(MultipartError::OutOfRange("time"))
}

/// Assemble `parts` (full `base(Ni)` keys → values) for a column of `column_type`.
///
/// All-blank parts assemble to null. Date, datetime and time columns produce
/// ISO 8601 strings; other types produce the part values as an array in
/// position order.
pub fn assemble(
    column_type: ColumnType,
    parts: &IndexMap<String, String>,
) -> Result<Value, MultipartError> {
    let parts = positional(parts);
    if parts.values().all(|v| is_blank(v)) {
        return Ok(Value::Null);
    }

    if !column_type.is_temporal() {
        return Ok(Value::Array(
            parts.values().map(|v| Value::String(v.to_string())).collect(),
        ));
    }

    let value = match column_type {
        ColumnType::Date => Value::String(date(&parts)?.format("%Y-%m-%d").to_string()),
        ColumnType::DateTime => {
            let datetime = NaiveDateTime::new(date(&parts)?, time(&parts)?);
            Value::String(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
        }
        _ => Value::String(time(&parts)?.format("%H:%M:%S").to_string()),
    };
    Ok(value)
}
