use std::collections::HashMap;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Column, PgPool, Row};

use crate::error::DashboardError;
use crate::models::{CheckInInput, CheckInRecord, Conflicts, Role, Workload};
use crate::{export, scoring, session};

/// Column set every loaded table is projected onto, in export order.
pub const EXPECTED_COLUMNS: [&str; 13] = [
    "timestamp",
    "organization",
    "role",
    "mood",
    "workload",
    "sleep_hours",
    "focus",
    "conflicts",
    "stress",
    "motivation",
    "risk",
    "keyword_flag",
    "comment",
];

/// Raw tabular snapshot: a header row plus string cells, exactly what the
/// remote collected store hands back.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Narrow seam to the collected store: read all rows of one named table.
/// Keeping it this small lets the loader run against an in-memory fake.
pub trait SheetSource {
    async fn fetch_table(&self, table: &str) -> Result<SheetTable, DashboardError>;
}

/// Postgres-backed mirror of the collected sheet. Every data column is text;
/// the serial `id` only preserves row order and is ignored by the loader.
pub struct PgSheetSource {
    pool: PgPool,
}

impl PgSheetSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SheetSource for PgSheetSource {
    async fn fetch_table(&self, table: &str) -> Result<SheetTable, DashboardError> {
        let query = format!("SELECT * FROM {table} ORDER BY id");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| DashboardError::SourceUnavailable(err.to_string()))?;

        let header: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => return Ok(SheetTable::default()),
        };

        let mut cells = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = Vec::with_capacity(header.len());
            for index in 0..header.len() {
                // Non-text cells read as blank rather than failing the load.
                let value: Option<String> = row.try_get(index).unwrap_or(None);
                values.push(value.unwrap_or_default());
            }
            cells.push(values);
        }

        Ok(SheetTable {
            header,
            rows: cells,
        })
    }
}

/// Fetch and coerce the collected table. Store unavailability surfaces
/// verbatim; per-cell problems degrade to missing values.
pub async fn load_records<S: SheetSource>(
    source: &S,
    table: &str,
) -> Result<Vec<CheckInRecord>, DashboardError> {
    let sheet = source.fetch_table(table).await?;
    Ok(records_from_table(&sheet))
}

/// Project raw string cells onto the expected column set. Absent columns
/// become all-missing, extra columns are dropped, unparseable cells fail
/// soft to the missing sentinel.
pub fn records_from_table(sheet: &SheetTable) -> Vec<CheckInRecord> {
    let positions: HashMap<&str, usize> = sheet
        .header
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();

    sheet
        .rows
        .iter()
        .map(|row| {
            let cell = |name: &str| -> &str {
                positions
                    .get(name)
                    .and_then(|&index| row.get(index))
                    .map(String::as_str)
                    .unwrap_or("")
            };

            CheckInRecord {
                timestamp: parse_timestamp(cell("timestamp")),
                organization: cell("organization").to_string(),
                role: cell("role").to_string(),
                mood: parse_number(cell("mood")),
                workload: cell("workload").to_string(),
                sleep_hours: parse_number(cell("sleep_hours")),
                focus: parse_number(cell("focus")),
                conflicts: cell("conflicts").to_string(),
                stress: parse_number(cell("stress")),
                motivation: parse_number(cell("motivation")),
                risk: parse_number(cell("risk")),
                keyword_flag: parse_flag(cell("keyword_flag")),
                comment: cell("comment").to_string(),
            }
        })
        .collect()
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(parsed);
        }
    }
    if let Some(start_of_day) = NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(start_of_day);
    }
    tracing::debug!(%cell, "unparseable timestamp cell, treating as missing");
    None
}

fn parse_number(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(%cell, "unparseable numeric cell, treating as missing");
            None
        }
    }
}

fn parse_flag(cell: &str) -> Option<bool> {
    match cell.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        "" => None,
        other => {
            tracing::debug!(cell = other, "unparseable flag cell, treating as missing");
            None
        }
    }
}

pub async fn init_db(pool: &PgPool, table: &str) -> anyhow::Result<()> {
    let ddl = format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
         id BIGSERIAL PRIMARY KEY, \
         timestamp TEXT, organization TEXT, role TEXT, mood TEXT, \
         workload TEXT, sleep_hours TEXT, focus TEXT, conflicts TEXT, \
         stress TEXT, motivation TEXT, risk TEXT, keyword_flag TEXT, \
         comment TEXT)"
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool, table: &str) -> anyhow::Result<()> {
    let samples = [
        (
            "Platform team",
            Role::Collaborator,
            4,
            Workload::Medium,
            7,
            4,
            Conflicts::None,
            "Steady sprint, nothing blocking.",
            NaiveDate::from_ymd_opt(2026, 2, 2).context("invalid date")?,
        ),
        (
            "Platform team",
            Role::Manager,
            2,
            Workload::High,
            5,
            2,
            Conflicts::Mild,
            "Too much pressure around the release.",
            NaiveDate::from_ymd_opt(2026, 2, 3).context("invalid date")?,
        ),
        (
            "Support desk",
            Role::Collaborator,
            3,
            Workload::Medium,
            6,
            3,
            Conflicts::None,
            "",
            NaiveDate::from_ymd_opt(2026, 2, 4).context("invalid date")?,
        ),
    ];

    let insert = format!(
        "INSERT INTO {table} (timestamp, organization, role, mood, workload, \
         sleep_hours, focus, conflicts, stress, motivation, risk, keyword_flag, comment) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
    );

    for (organization, role, mood, workload, sleep_hours, focus, conflicts, comment, day) in
        samples
    {
        let input = CheckInInput {
            organization: organization.to_string(),
            role,
            mood,
            workload,
            sleep_hours,
            focus,
            conflicts,
            comment: comment.to_string(),
        };
        let scores = scoring::compute_scores(
            input.mood,
            input.workload,
            input.sleep_hours,
            input.focus,
            input.conflicts,
            &input.comment,
        );
        let submitted_at = day.and_hms_opt(9, 30, 0).context("invalid time")?;
        let record = session::build_record(&input, &scores, submitted_at);

        let mut query = sqlx::query(&insert);
        for value in export::record_cells(&record) {
            query = query.bind(value);
        }
        query.execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(header: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    struct InMemorySheet {
        table: SheetTable,
    }

    impl SheetSource for InMemorySheet {
        async fn fetch_table(&self, _table: &str) -> Result<SheetTable, DashboardError> {
            Ok(self.table.clone())
        }
    }

    struct UnreachableSheet;

    impl SheetSource for UnreachableSheet {
        async fn fetch_table(&self, _table: &str) -> Result<SheetTable, DashboardError> {
            Err(DashboardError::SourceUnavailable(
                "credentials rejected".to_string(),
            ))
        }
    }

    #[test]
    fn empty_and_header_only_sheets_load_as_empty() {
        assert!(records_from_table(&SheetTable::default()).is_empty());

        let header_only = sheet(&EXPECTED_COLUMNS, &[]);
        assert!(records_from_table(&header_only).is_empty());
    }

    #[test]
    fn cells_coerce_with_soft_failures() {
        let table = sheet(
            &["timestamp", "organization", "mood", "keyword_flag"],
            &[
                &["2026-02-03 18:45", "Platform team", "4", "true"],
                &["not a date", "Support desk", "often", "maybe"],
            ],
        );

        let records = records_from_table(&table);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(
            first.timestamp,
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap().and_hms_opt(18, 45, 0)
        );
        assert_eq!(first.organization, "Platform team");
        assert_eq!(first.mood, Some(4));
        assert_eq!(first.keyword_flag, Some(true));

        let second = &records[1];
        assert_eq!(second.timestamp, None);
        assert_eq!(second.mood, None);
        assert_eq!(second.keyword_flag, None);
    }

    #[test]
    fn absent_columns_become_all_missing_and_extras_are_dropped() {
        let table = sheet(
            &["organization", "shoe_size", "risk"],
            &[&["Platform team", "44", "61"]],
        );

        let records = records_from_table(&table);
        let record = &records[0];
        assert_eq!(record.organization, "Platform team");
        assert_eq!(record.risk, Some(61));
        assert_eq!(record.timestamp, None);
        assert_eq!(record.mood, None);
        assert_eq!(record.role, "");
        assert_eq!(record.comment, "");
    }

    #[test]
    fn column_order_in_the_source_does_not_matter() {
        let table = sheet(
            &["comment", "timestamp", "organization"],
            &[&["all fine", "2026-02-04", "Support desk"]],
        );

        let record = &records_from_table(&table)[0];
        assert_eq!(record.comment, "all fine");
        assert_eq!(record.organization, "Support desk");
        assert_eq!(
            record.timestamp,
            NaiveDate::from_ymd_opt(2026, 2, 4).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[tokio::test]
    async fn load_records_reads_through_the_source_seam() {
        let source = InMemorySheet {
            table: sheet(
                &["organization", "role"],
                &[&["Platform team", "Manager"], &["Support desk", "HR"]],
            ),
        };

        let records = load_records(&source, "check_ins").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].role, "HR");
    }

    #[tokio::test]
    async fn unavailable_source_surfaces_verbatim() {
        let err = load_records(&UnreachableSheet, "check_ins")
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::SourceUnavailable(_)));
        assert!(err.to_string().contains("credentials rejected"));
    }
}
