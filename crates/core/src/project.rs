//! Field rules for project records.
//!
//! Request bodies arrive with every field optional; these helpers turn the
//! raw values into validated ones and produce field-specific
//! [`CoreError::Validation`] messages. They never touch the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Entity name used in not-found errors.
pub const ENTITY_PROJECT: &str = "Project";

pub const FIELD_NAME: &str = "name";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_START_DATE: &str = "startDate";
pub const FIELD_DEADLINE: &str = "deadline";

/// Return the trimmed value of a required text field.
///
/// Missing, `null` and whitespace-only values are all "missing".
pub fn require_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Validate a value supplied for a required field in a partial update.
pub fn non_blank(field: &str, value: String) -> Result<String, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(value.trim().to_string())
}

/// Parse an optional date field.
///
/// Accepts `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp. `None`
/// and the empty string both mean "no date".
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "{field} must be an ISO-8601 date (YYYY-MM-DD) or timestamp, got '{raw}'"
            ))
        })
}

/// Resolve a path id into a [`RecordId`].
///
/// A blank id is a client error. Anything that is not a well-formed id can
/// never have been issued by the store, so it is reported as not found.
pub fn parse_record_id(entity: &'static str, raw: &str) -> Result<RecordId, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation(format!(
            "{} id is required",
            entity.to_lowercase()
        )));
    }
    raw.parse().map_err(|_| CoreError::NotFound {
        entity,
        id: raw.to_string(),
    })
}

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)` and a value gives `Some(Some(v))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
