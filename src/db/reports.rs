// src/db/reports.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::machine::MachineCategory;
use crate::domain::report::MaintenanceReport;
use crate::errors::ServerError;

const REPORT_COLUMNS: &str = r#"
    id, machine_id, machine_name, machine_category,
    technician_id, technician_name, start_time, end_time,
    downtime_minutes, report_type, description, status_after,
    submitted_by, created_at
"#;

/// Fields from the report form; `machine_name`/`machine_category` are
/// denormalized from the selected machine at submission time, matching how
/// the report tables and exports read them back.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub machine_id: String,
    pub machine_name: String,
    pub machine_category: MachineCategory,
    pub technician_id: i64,
    pub technician_name: String,
    pub start_time: i64,
    pub end_time: i64,
    pub downtime_minutes: i64,
    pub report_type: String,
    pub description: String,
    pub status_after: String,
}

fn map_report(row: &Row<'_>) -> rusqlite::Result<MaintenanceReport> {
    let category: String = row.get(3)?;
    Ok(MaintenanceReport {
        id: row.get(0)?,
        machine_id: row.get(1)?,
        machine_name: row.get(2)?,
        machine_category: MachineCategory::parse(&category).unwrap_or(MachineCategory::General),
        technician_id: row.get(4)?,
        technician_name: row.get(5)?,
        start_time: row.get(6)?,
        end_time: row.get(7)?,
        downtime_minutes: row.get(8)?,
        report_type: row.get(9)?,
        description: row.get(10)?,
        status_after: row.get(11)?,
        submitted_by: row.get(12)?,
        created_at: row.get(13)?,
    })
}

pub fn create_report(
    conn: &Connection,
    input: &ReportInput,
    submitted_by: i64,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into reports (
            machine_id, machine_name, machine_category,
            technician_id, technician_name, start_time, end_time,
            downtime_minutes, report_type, description, status_after,
            submitted_by, created_at
        ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            input.machine_id,
            input.machine_name,
            input.machine_category.as_str(),
            input.technician_id,
            input.technician_name,
            input.start_time,
            input.end_time,
            input.downtime_minutes,
            input.report_type,
            input.description,
            input.status_after,
            submitted_by,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert report failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Update an existing report in place. `submitted_by` and `created_at`
/// never change on edit.
pub fn update_report(conn: &Connection, id: i64, input: &ReportInput) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            r#"
            update reports set
                machine_id = ?, machine_name = ?, machine_category = ?,
                technician_id = ?, technician_name = ?, start_time = ?, end_time = ?,
                downtime_minutes = ?, report_type = ?, description = ?, status_after = ?
            where id = ?
            "#,
            params![
                input.machine_id,
                input.machine_name,
                input.machine_category.as_str(),
                input.technician_id,
                input.technician_name,
                input.start_time,
                input.end_time,
                input.downtime_minutes,
                input.report_type,
                input.description,
                input.status_after,
                id
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update report failed: {e}")))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_report(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from reports where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete report failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn get_report(conn: &Connection, id: i64) -> Result<Option<MaintenanceReport>, ServerError> {
    conn.query_row(
        &format!("select {REPORT_COLUMNS} from reports where id = ?"),
        params![id],
        |row| map_report(row),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("report lookup failed: {e}")))
}

/// Newest-first listing, optionally restricted to one machine category.
pub fn list_reports(
    conn: &Connection,
    category: Option<MachineCategory>,
) -> Result<Vec<MaintenanceReport>, ServerError> {
    match category {
        Some(cat) => query_reports(
            conn,
            &format!(
                "select {REPORT_COLUMNS} from reports where machine_category = ? \
                 order by created_at desc, id desc"
            ),
            params![cat.as_str()],
        ),
        None => query_reports(
            conn,
            &format!("select {REPORT_COLUMNS} from reports order by created_at desc, id desc"),
            params![],
        ),
    }
}

fn query_reports(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<MaintenanceReport>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(args, |row| map_report(row))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
