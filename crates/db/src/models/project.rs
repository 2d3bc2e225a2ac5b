//! Project entity model and DTOs.

use relatorio_core::error::CoreError;
use relatorio_core::project::{
    deserialize_nullable, non_blank, parse_date, require_text, FIELD_DEADLINE, FIELD_NAME,
    FIELD_START_DATE, FIELD_STATUS,
};
use relatorio_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub status: String,
    pub current_status: String,
    pub start_date: Option<Timestamp>,
    pub deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The mutable part of the record.
    pub fn fields(&self) -> ProjectFields {
        ProjectFields {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            current_status: self.current_status.clone(),
            start_date: self.start_date,
            deadline: self.deadline,
        }
    }
}

/// Every mutable field of a project, already validated.
///
/// Used for both create and full replace: optional fields that were not
/// supplied are reset to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub status: String,
    pub current_status: String,
    pub start_date: Option<Timestamp>,
    pub deadline: Option<Timestamp>,
}

impl ProjectFields {
    /// Minimal field set with only the required values.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: status.into(),
            current_status: String::new(),
            start_date: None,
            deadline: None,
        }
    }

    /// Overlay the fields present in `patch`.
    pub fn apply(mut self, patch: &ProjectPatch) -> Self {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(current_status) = &patch.current_status {
            self.current_status = current_status.clone();
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        self
    }
}

/// Request body for `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub current_status: Option<String>,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

impl ProjectInput {
    /// Validate required fields and fill defaults for the optional ones.
    pub fn into_fields(self) -> Result<ProjectFields, CoreError> {
        let name = require_text(FIELD_NAME, self.name)?;
        let status = require_text(FIELD_STATUS, self.status)?;
        let start_date = parse_date(FIELD_START_DATE, self.start_date.as_deref())?;
        let deadline = parse_date(FIELD_DEADLINE, self.deadline.as_deref())?;

        Ok(ProjectFields {
            name,
            description: self.description.unwrap_or_default(),
            status,
            current_status: self.current_status.unwrap_or_default(),
            start_date,
            deadline,
        })
    }
}

/// Request body for `PATCH /projects/{id}`. Every field is optional. The
/// optional fields may be sent as `null` to reset them: text becomes `""`
/// and dates are cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatchInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub current_status: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub deadline: Option<Option<String>>,
}

impl ProjectPatchInput {
    /// Validate the supplied fields. At least one field must be present.
    pub fn into_patch(self) -> Result<ProjectPatch, CoreError> {
        let patch = ProjectPatch {
            name: self.name.map(|v| non_blank(FIELD_NAME, v)).transpose()?,
            description: self.description.map(Option::unwrap_or_default),
            status: self.status.map(|v| non_blank(FIELD_STATUS, v)).transpose()?,
            current_status: self.current_status.map(Option::unwrap_or_default),
            start_date: self
                .start_date
                .map(|v| parse_date(FIELD_START_DATE, v.as_deref()))
                .transpose()?,
            deadline: self
                .deadline
                .map(|v| parse_date(FIELD_DEADLINE, v.as_deref()))
                .transpose()?,
        };

        if patch.is_empty() {
            return Err(CoreError::Validation(
                "at least one updatable field must be provided".into(),
            ));
        }
        Ok(patch)
    }
}

/// Validated partial update. `None` means "leave unchanged"; for dates,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub current_status: Option<String>,
    pub start_date: Option<Option<Timestamp>>,
    pub deadline: Option<Option<Timestamp>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.current_status.is_none()
            && self.start_date.is_none()
            && self.deadline.is_none()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn input(name: Option<&str>, status: Option<&str>) -> ProjectInput {
        ProjectInput {
            name: name.map(str::to_string),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn into_fields_fills_defaults() {
        let fields = input(Some("Alpha"), Some("Active")).into_fields().unwrap();
        assert_eq!(fields, ProjectFields::new("Alpha", "Active"));
    }

    #[test]
    fn into_fields_requires_name() {
        assert_matches!(
            input(None, Some("Active")).into_fields(),
            Err(CoreError::Validation(msg)) if msg == "name is required"
        );
    }

    #[test]
    fn into_fields_requires_status() {
        assert_matches!(
            input(Some("Alpha"), Some("")).into_fields(),
            Err(CoreError::Validation(msg)) if msg == "status is required"
        );
    }

    #[test]
    fn into_fields_parses_dates() {
        let mut raw = input(Some("Alpha"), Some("Active"));
        raw.start_date = Some("2024-01-01".into());
        raw.deadline = Some(String::new());
        let fields = raw.into_fields().unwrap();
        assert_eq!(
            fields.start_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(fields.deadline, None);
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_matches!(
            ProjectPatchInput::default().into_patch(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn patch_with_null_date_clears_it() {
        let raw: ProjectPatchInput = serde_json::from_str(r#"{"deadline": null}"#).unwrap();
        let patch = raw.into_patch().unwrap();
        assert_eq!(patch.deadline, Some(None));

        let mut fields = ProjectFields::new("Alpha", "Active");
        fields.deadline = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(fields.apply(&patch).deadline, None);
    }

    #[test]
    fn patch_with_null_text_resets_it() {
        let raw: ProjectPatchInput =
            serde_json::from_str(r#"{"description": null, "currentStatus": null}"#).unwrap();
        let patch = raw.into_patch().unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.current_status.as_deref(), Some(""));

        let mut fields = ProjectFields::new("Alpha", "Active");
        fields.description = "Quarterly report".into();
        fields.current_status = "Blocked".into();
        let merged = fields.apply(&patch);
        assert_eq!(merged.description, "");
        assert_eq!(merged.current_status, "");
    }

    #[test]
    fn patch_with_absent_text_leaves_it() {
        let raw: ProjectPatchInput = serde_json::from_str(r#"{"status": "Done"}"#).unwrap();
        let patch = raw.into_patch().unwrap();
        assert_eq!(patch.description, None);
        assert_eq!(patch.current_status, None);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut base = ProjectFields::new("Alpha", "Active");
        base.start_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let patch = ProjectPatch {
            current_status: Some("Waiting on vendor".into()),
            ..Default::default()
        };

        let merged = base.clone().apply(&patch);
        assert_eq!(merged.current_status, "Waiting on vendor");
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.status, base.status);
        assert_eq!(merged.start_date, base.start_date);
        assert_eq!(merged.deadline, base.deadline);
    }

    #[test]
    fn patch_cannot_blank_status() {
        let raw = ProjectPatchInput {
            status: Some("  ".into()),
            ..Default::default()
        };
        assert_matches!(raw.into_patch(), Err(CoreError::Validation(_)));
    }
}
