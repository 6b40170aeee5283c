// src/db/machines.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::machine::{
    Machine, MachineCategory, MachineDetails, MachineStatus, ServiceCheckpoint,
};
use crate::domain::monitor::GaugeKind;
use crate::errors::ServerError;

const MACHINE_COLUMNS: &str = r#"
    id, machine_id, name, category, location, status,
    current_runtime_hours, service_interval_hours, last_run_start, details,
    runtime_notified_threshold, runtime_notified_value, runtime_notified_at,
    odometer_notified_threshold, odometer_notified_value, odometer_notified_at,
    created_at, updated_at
"#;

/// Fields supplied by the machine form. `machine_id` is immutable after
/// creation; updates go through `update_machine` which never touches it.
#[derive(Debug, Clone)]
pub struct MachineInput {
    pub machine_id: String,
    pub name: String,
    pub category: MachineCategory,
    pub location: String,
    pub current_runtime_hours: f64,
    pub service_interval_hours: f64,
    pub details: MachineDetails,
}

fn checkpoint_from(
    threshold: Option<f64>,
    value: Option<f64>,
    at: Option<i64>,
) -> Option<ServiceCheckpoint> {
    match (threshold, value, at) {
        (Some(threshold), Some(value), Some(at)) => Some(ServiceCheckpoint {
            threshold,
            value,
            at,
        }),
        _ => None,
    }
}

fn map_machine(row: &Row<'_>) -> rusqlite::Result<Machine> {
    let category: String = row.get(3)?;
    let status: String = row.get(5)?;
    let details_json: String = row.get(9)?;

    Ok(Machine {
        id: row.get(0)?,
        machine_id: row.get(1)?,
        name: row.get(2)?,
        // unknown labels degrade to defaults rather than failing the row
        category: MachineCategory::parse(&category).unwrap_or(MachineCategory::General),
        location: row.get(4)?,
        status: MachineStatus::parse(&status).unwrap_or(MachineStatus::Stop),
        current_runtime_hours: row.get(6)?,
        service_interval_hours: row.get(7)?,
        last_run_start: row.get(8)?,
        details: serde_json::from_str(&details_json).unwrap_or_default(),
        runtime_checkpoint: checkpoint_from(row.get(10)?, row.get(11)?, row.get(12)?),
        odometer_checkpoint: checkpoint_from(row.get(13)?, row.get(14)?, row.get(15)?),
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

pub fn create_machine(
    conn: &Connection,
    input: &MachineInput,
    now: i64,
) -> Result<i64, ServerError> {
    let details_json = serde_json::to_string(&input.details)
        .map_err(|e| ServerError::DbError(format!("serialize details failed: {e}")))?;

    let inserted = conn
        .execute(
            r#"
            insert or ignore into machines (
                machine_id, name, category, location, status,
                current_runtime_hours, service_interval_hours, details,
                created_at, updated_at
            ) values (?, ?, ?, ?, 'STOP', ?, ?, ?, ?, ?)
            "#,
            params![
                input.machine_id,
                input.name,
                input.category.as_str(),
                input.location,
                input.current_runtime_hours,
                input.service_interval_hours,
                details_json,
                now,
                now
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert machine failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::BadRequest(format!(
            "Machine ID {} already exists.",
            input.machine_id
        )));
    }

    Ok(conn.last_insert_rowid())
}

pub fn update_machine(
    conn: &Connection,
    machine_id: &str,
    input: &MachineInput,
    now: i64,
) -> Result<(), ServerError> {
    let details_json = serde_json::to_string(&input.details)
        .map_err(|e| ServerError::DbError(format!("serialize details failed: {e}")))?;

    let changed = conn
        .execute(
            r#"
            update machines set
                name = ?, category = ?, location = ?,
                current_runtime_hours = ?, service_interval_hours = ?,
                details = ?, updated_at = ?
            where machine_id = ?
            "#,
            params![
                input.name,
                input.category.as_str(),
                input.location,
                input.current_runtime_hours,
                input.service_interval_hours,
                details_json,
                now,
                machine_id
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update machine failed: {e}")))?;

    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_machine(conn: &Connection, machine_id: &str) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from machines where machine_id = ?", params![machine_id])
        .map_err(|e| ServerError::DbError(format!("delete machine failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn get_by_machine_id(
    conn: &Connection,
    machine_id: &str,
) -> Result<Option<Machine>, ServerError> {
    conn.query_row(
        &format!("select {MACHINE_COLUMNS} from machines where machine_id = ?"),
        params![machine_id],
        |row| map_machine(row),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("machine lookup failed: {e}")))
}

pub fn list_all(conn: &Connection) -> Result<Vec<Machine>, ServerError> {
    query_machines(
        conn,
        &format!("select {MACHINE_COLUMNS} from machines order by machine_id"),
        params![],
    )
}

pub fn list_by_category(
    conn: &Connection,
    category: MachineCategory,
) -> Result<Vec<Machine>, ServerError> {
    query_machines(
        conn,
        &format!("select {MACHINE_COLUMNS} from machines where category = ? order by machine_id"),
        params![category.as_str()],
    )
}

fn query_machines(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Machine>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(args, |row| map_machine(row))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Commit a status transition through the RUN accounting state machine and
/// persist the result. Returns the updated machine.
pub fn set_status(
    conn: &Connection,
    machine_id: &str,
    next: MachineStatus,
    now: i64,
) -> Result<Machine, ServerError> {
    let mut machine = get_by_machine_id(conn, machine_id)?.ok_or(ServerError::NotFound)?;
    machine.apply_status(next, now);

    conn.execute(
        r#"
        update machines set
            status = ?, current_runtime_hours = ?, last_run_start = ?, updated_at = ?
        where machine_id = ?
        "#,
        params![
            machine.status.as_str(),
            machine.current_runtime_hours,
            machine.last_run_start,
            now,
            machine_id
        ],
    )
    .map_err(|e| ServerError::DbError(format!("status update failed: {e}")))?;

    machine.updated_at = now;
    Ok(machine)
}

/// Advance the last-notified service checkpoint after a notification was
/// actually emitted for this machine.
pub fn set_checkpoint(
    conn: &Connection,
    machine_id: &str,
    gauge: GaugeKind,
    checkpoint: ServiceCheckpoint,
) -> Result<(), ServerError> {
    let sql = match gauge {
        GaugeKind::RuntimeHours => {
            r#"
            update machines set
                runtime_notified_threshold = ?,
                runtime_notified_value = ?,
                runtime_notified_at = ?
            where machine_id = ?
            "#
        }
        GaugeKind::OdometerKm => {
            r#"
            update machines set
                odometer_notified_threshold = ?,
                odometer_notified_value = ?,
                odometer_notified_at = ?
            where machine_id = ?
            "#
        }
    };

    conn.execute(
        sql,
        params![
            checkpoint.threshold,
            checkpoint.value,
            checkpoint.at,
            machine_id
        ],
    )
    .map_err(|e| ServerError::DbError(format!("checkpoint update failed: {e}")))?;
    Ok(())
}
