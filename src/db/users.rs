// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::Role;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Insert a new profile with the default technician role. Email should
/// already be normalized by the caller (trim/lowercase). Returns the new
/// user id, or BadRequest when the email is already registered.
pub fn create_user(
    conn: &Connection,
    email: &str,
    display_name: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let inserted = conn
        .execute(
            r#"
            insert or ignore into users (email, display_name, password_hash, role, created_at)
            values (?, ?, ?, 'technician', ?)
            "#,
            params![email, display_name, password_hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::BadRequest(
            "This email is already registered.".into(),
        ));
    }

    conn.query_row(
        "select id from users where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select user id failed: {e}")))
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, email, display_name, password_hash, role from users where email = ?",
        params![email],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                display_name: row.get(2)?,
                password_hash: row.get(3)?,
                role: Role::parse_or_default(&row.get::<_, String>(4)?),
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("user lookup failed: {e}")))
}

/// Used by tests and operational tooling; there is no in-app promotion flow.
pub fn set_role(conn: &Connection, user_id: i64, role: Role) -> Result<(), ServerError> {
    conn.execute(
        "update users set role = ? where id = ?",
        params![role.as_str(), user_id],
    )
    .map_err(|e| ServerError::DbError(format!("set role failed: {e}")))?;
    Ok(())
}
