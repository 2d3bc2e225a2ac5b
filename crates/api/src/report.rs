//! Dashboard view model: one table row per project plus the bar chart
//! series (project name vs progress).

use relatorio_core::progress::compute_progress;
use relatorio_core::types::{RecordId, Timestamp};
use relatorio_db::models::project::Project;
use serde::Serialize;

/// A table row with the computed progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRow {
    pub id: RecordId,
    pub name: String,
    pub status: String,
    pub current_status: String,
    pub start_date: Option<Timestamp>,
    pub deadline: Option<Timestamp>,
    pub progress: u8,
}

/// One bar of the progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub generated_at: Timestamp,
    pub rows: Vec<ProgressRow>,
    pub chart: Vec<ChartPoint>,
}

impl ProgressReport {
    /// Build the report for `projects` as of `now`, keeping their order.
    pub fn build(projects: &[Project], now: Timestamp) -> Self {
        let rows: Vec<ProgressRow> = projects
            .iter()
            .map(|p| ProgressRow {
                id: p.id,
                name: p.name.clone(),
                status: p.status.clone(),
                current_status: p.current_status.clone(),
                start_date: p.start_date,
                deadline: p.deadline,
                progress: compute_progress(p.start_date, p.deadline, now),
            })
            .collect();

        let chart = rows
            .iter()
            .map(|r| ChartPoint {
                label: r.name.clone(),
                value: r.progress,
            })
            .collect();

        Self {
            generated_at: now,
            rows,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use relatorio_db::models::project::ProjectFields;

    use super::*;

    fn project(fields: ProjectFields) -> Project {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Project {
            id: uuid::Uuid::now_v7(),
            name: fields.name,
            description: fields.description,
            status: fields.status,
            current_status: fields.current_status,
            start_date: fields.start_date,
            deadline: fields.deadline,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn rows_and_chart_follow_project_order() {
        let now = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();

        let mut halfway = ProjectFields::new("Halfway", "Active");
        halfway.start_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        halfway.deadline = Some(Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap());
        let undated = ProjectFields::new("Undated", "Draft");

        let report = ProgressReport::build(&[project(halfway), project(undated)], now);

        assert_eq!(report.generated_at, now);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].progress, 50);
        assert_eq!(report.rows[1].progress, 0);
        assert_eq!(
            report.chart,
            vec![
                ChartPoint {
                    label: "Halfway".into(),
                    value: 50
                },
                ChartPoint {
                    label: "Undated".into(),
                    value: 0
                },
            ]
        );
    }

    #[test]
    fn empty_project_list_gives_empty_report() {
        let report = ProgressReport::build(&[], Utc::now());
        assert!(report.rows.is_empty());
        assert!(report.chart.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let report = ProgressReport::build(&[project(ProjectFields::new("A", "x"))], Utc::now());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["generatedAt"].is_string());
        assert!(json["rows"][0].get("currentStatus").is_some());
        assert_eq!(json["chart"][0]["label"], "A");
        assert_eq!(json["chart"][0]["value"], 0);
    }
}
