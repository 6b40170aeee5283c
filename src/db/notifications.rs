// src/db/notifications.rs
use rusqlite::{params, Connection, Row};

use crate::domain::monitor::AlertLevel;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct NotificationRow {
    pub id: i64,
    pub to_user_id: i64,
    pub machine_id: String,
    pub machine_label: String,
    pub message: String,
    pub level: AlertLevel,
    pub is_read: bool,
    pub triggered_threshold: f64,
    pub current_value: f64,
    pub interval_value: f64,
    pub created_at: i64,
}

fn map_notification(row: &Row<'_>) -> rusqlite::Result<NotificationRow> {
    let level: String = row.get(5)?;
    Ok(NotificationRow {
        id: row.get(0)?,
        to_user_id: row.get(1)?,
        machine_id: row.get(2)?,
        machine_label: row.get(3)?,
        message: row.get(4)?,
        level: AlertLevel::parse(&level).unwrap_or(AlertLevel::Warning),
        is_read: row.get::<_, i64>(6)? != 0,
        triggered_threshold: row.get(7)?,
        current_value: row.get(8)?,
        interval_value: row.get(9)?,
        created_at: row.get(10)?,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn insert_notification(
    conn: &Connection,
    to_user_id: i64,
    machine_id: &str,
    machine_label: &str,
    message: &str,
    level: AlertLevel,
    triggered_threshold: f64,
    current_value: f64,
    interval_value: f64,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into notifications (
            to_user_id, machine_id, machine_label, message, level,
            is_read, triggered_threshold, current_value, interval_value, created_at
        ) values (?, ?, ?, ?, ?, 0, ?, ?, ?, ?)
        "#,
        params![
            to_user_id,
            machine_id,
            machine_label,
            message,
            level.as_str(),
            triggered_threshold,
            current_value,
            interval_value,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert notification failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Duplicate guard: an unread notification of the same level for the same
/// machine and recipient means a fresh one would only pile up.
pub fn has_unread(
    conn: &Connection,
    machine_id: &str,
    level: AlertLevel,
    to_user_id: i64,
) -> Result<bool, ServerError> {
    let count: i64 = conn
        .query_row(
            r#"
            select count(*) from notifications
            where machine_id = ? and level = ? and to_user_id = ? and is_read = 0
            "#,
            params![machine_id, level.as_str(), to_user_id],
            |row| row.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("unread guard query failed: {e}")))?;
    Ok(count > 0)
}

pub fn unread_count(conn: &Connection, to_user_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from notifications where to_user_id = ? and is_read = 0",
        params![to_user_id],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("unread count failed: {e}")))
}

/// Newest-first notifications for the dropdown/page.
pub fn list_recent(
    conn: &Connection,
    to_user_id: i64,
    limit: i64,
) -> Result<Vec<NotificationRow>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select id, to_user_id, machine_id, machine_label, message, level,
                   is_read, triggered_threshold, current_value, interval_value, created_at
            from notifications
            where to_user_id = ?
            order by created_at desc, id desc
            limit ?
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![to_user_id, limit], |row| map_notification(row))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Flip `is_read`; only the recipient may do so.
pub fn mark_read(conn: &Connection, id: i64, to_user_id: i64) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            "update notifications set is_read = 1 where id = ? and to_user_id = ?",
            params![id, to_user_id],
        )
        .map_err(|e| ServerError::DbError(format!("mark read failed: {e}")))?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
